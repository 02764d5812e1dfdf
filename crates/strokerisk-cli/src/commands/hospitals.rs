use std::sync::Arc;

use anyhow::Result;
use strokerisk_application::StrokeRiskApp;
use strokerisk_core::config::AppConfig;
use strokerisk_core::hospital::Coordinates;
use strokerisk_infrastructure::TracingNotifier;

use crate::output;

/// Prints the hospitals nearest to the given point, or to the configured
/// default location.
pub async fn run(config: AppConfig, lat: Option<f64>, lng: Option<f64>) -> Result<()> {
    let app = StrokeRiskApp::new(config, Arc::new(TracingNotifier));
    let origin = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
        (None, None) => None,
        _ => anyhow::bail!("--lat and --lng must be given together"),
    };

    let hospitals = app.emergency.nearest_hospitals(origin).await?;
    output::print_hospitals(&hospitals);
    app.shutdown();
    Ok(())
}
