//! Nearby hospital lookup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in kilometres (haversine).
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Distance from the query point, in km.
    pub distance: f64,
    pub is_primary_stroke_center: bool,
    pub coordinates: Coordinates,
    /// Estimated wait in minutes, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<u32>,
}

#[async_trait]
pub trait HospitalLocator: Send + Sync {
    /// Hospitals near `origin`, nearest first.
    async fn find_nearest(&self, origin: Coordinates) -> Result<Vec<Hospital>>;
}
