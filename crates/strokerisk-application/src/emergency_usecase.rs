//! Hospital finder and emergency contact.

use std::sync::Arc;

use strokerisk_core::Result;
use strokerisk_core::hospital::{Coordinates, Hospital, HospitalLocator};
use tracing::info;

pub struct EmergencyUseCase {
    locator: Arc<dyn HospitalLocator>,
    default_location: Coordinates,
    phone_number: String,
}

impl EmergencyUseCase {
    pub fn new(
        locator: Arc<dyn HospitalLocator>,
        default_location: Coordinates,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            locator,
            default_location,
            phone_number: phone_number.into(),
        }
    }

    /// Number to dial in an emergency.
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Hospitals nearest to `origin`, or to the configured default location.
    pub async fn nearest_hospitals(&self, origin: Option<Coordinates>) -> Result<Vec<Hospital>> {
        let origin = origin.unwrap_or(self.default_location);
        let hospitals = self.locator.find_nearest(origin).await?;
        info!("{} hospitals found", hospitals.len());
        Ok(hospitals)
    }

    /// Nearest primary stroke center, if any is in range.
    pub async fn nearest_stroke_center(&self, origin: Option<Coordinates>) -> Result<Option<Hospital>> {
        Ok(self
            .nearest_hospitals(origin)
            .await?
            .into_iter()
            .find(|h| h.is_primary_stroke_center))
    }
}
