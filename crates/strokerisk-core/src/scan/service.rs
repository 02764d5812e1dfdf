//! Scan and history collaborator interfaces.

use async_trait::async_trait;

use super::model::RiskResult;
use crate::error::Result;

/// Analyses a captured frame and returns a risk assessment.
#[async_trait]
pub trait ScanService: Send + Sync {
    /// Fails with [`crate::StrokeRiskError::Analysis`] when the frame cannot
    /// be analysed; the caller may retry with a new capture.
    async fn submit_scan(&self, image_data: &str) -> Result<RiskResult>;
}

/// Past scan results of the signed-in user, oldest first.
#[async_trait]
pub trait ScanHistory: Send + Sync {
    async fn list_scans(&self) -> Result<Vec<RiskResult>>;

    async fn record_scan(&self, result: &RiskResult) -> Result<()>;
}
