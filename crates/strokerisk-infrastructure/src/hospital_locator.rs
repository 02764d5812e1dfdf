//! Fixed list of nearby hospitals.

use async_trait::async_trait;
use strokerisk_core::Result;
use strokerisk_core::config::MockSettings;
use strokerisk_core::hospital::{Coordinates, Hospital, HospitalLocator};
use tracing::debug;

use crate::latency::simulate;

pub struct StaticHospitalLocator {
    hospitals: Vec<Hospital>,
    latency: MockSettings,
}

impl StaticHospitalLocator {
    /// Creates a locator over the demo hospitals.
    pub fn new(latency: MockSettings) -> Self {
        Self::with_hospitals(demo_hospitals(), latency)
    }

    pub fn with_hospitals(hospitals: Vec<Hospital>, latency: MockSettings) -> Self {
        Self { hospitals, latency }
    }
}

fn demo_hospitals() -> Vec<Hospital> {
    vec![
        Hospital {
            id: "1".to_string(),
            name: "City General Hospital".to_string(),
            address: "123 Main St, Metropolis".to_string(),
            phone: "+1 555-0123".to_string(),
            distance: 0.0,
            is_primary_stroke_center: true,
            coordinates: Coordinates::new(40.7128, -74.0060),
            wait_time: Some(15),
        },
        Hospital {
            id: "2".to_string(),
            name: "Westside Medical Center".to_string(),
            address: "456 West Ave, Metropolis".to_string(),
            phone: "+1 555-0456".to_string(),
            distance: 0.0,
            is_primary_stroke_center: false,
            coordinates: Coordinates::new(40.7200, -74.0100),
            wait_time: Some(30),
        },
    ]
}

#[async_trait]
impl HospitalLocator for StaticHospitalLocator {
    async fn find_nearest(&self, origin: Coordinates) -> Result<Vec<Hospital>> {
        simulate(self.latency.hospital_latency()).await;

        let mut found: Vec<Hospital> = self
            .hospitals
            .iter()
            .map(|h| Hospital {
                // one decimal, as displayed
                distance: (origin.distance_km(&h.coordinates) * 10.0).round() / 10.0,
                ..h.clone()
            })
            .collect();
        found.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        debug!("Found {} hospitals near ({}, {})", found.len(), origin.lat, origin.lng);
        Ok(found)
    }
}
