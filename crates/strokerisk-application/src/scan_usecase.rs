//! Scan, history and analytics views.

use std::sync::Arc;

use strokerisk_core::Result;
use strokerisk_core::scan::{
    RiskFilter, RiskResult, ScanHistory, ScanService, ScanSummary, filter_history, latest,
};
use tracing::warn;

pub struct ScanUseCase {
    scanner: Arc<dyn ScanService>,
    history: Arc<dyn ScanHistory>,
}

impl ScanUseCase {
    pub fn new(scanner: Arc<dyn ScanService>, history: Arc<dyn ScanHistory>) -> Self {
        Self { scanner, history }
    }

    /// Submits a captured frame. Analysis failures are retryable with a new
    /// capture.
    pub async fn analyze(&self, image_data: &str) -> Result<RiskResult> {
        self.scanner.submit_scan(image_data).await.inspect_err(|err| {
            warn!("Scan failed: {}", err);
        })
    }

    /// Past results matching `filter`, newest first.
    pub async fn history(&self, filter: RiskFilter) -> Result<Vec<RiskResult>> {
        let scans = self.history.list_scans().await?;
        Ok(filter_history(&scans, filter))
    }

    /// Most recent result, shown on the results view.
    pub async fn latest(&self) -> Result<Option<RiskResult>> {
        let scans = self.history.list_scans().await?;
        Ok(latest(&scans).cloned())
    }

    pub async fn summary(&self) -> Result<ScanSummary> {
        let scans = self.history.list_scans().await?;
        Ok(ScanSummary::from_scans(&scans))
    }
}
