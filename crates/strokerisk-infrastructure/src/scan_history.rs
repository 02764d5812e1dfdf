//! In-memory scan history.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use strokerisk_core::Result;
use strokerisk_core::config::MockSettings;
use strokerisk_core::scan::{RiskLevel, RiskResult, ScanHistory};
use tokio::sync::RwLock;
use tracing::debug;

use crate::latency::simulate;

pub struct InMemoryScanHistory {
    scans: RwLock<Vec<RiskResult>>,
    latency: MockSettings,
}

impl InMemoryScanHistory {
    /// Creates a history holding one all-clear scan from the day before.
    pub fn new(latency: MockSettings) -> Self {
        let seeded = RiskResult {
            risk_score: 15,
            risk_level: RiskLevel::Low,
            confidence: 92,
            factors: Vec::new(),
            recommendations: vec!["All clear".to_string()],
            timestamp: Utc::now() - Duration::days(1),
        };
        Self::with_scans(vec![seeded], latency)
    }

    pub fn empty(latency: MockSettings) -> Self {
        Self::with_scans(Vec::new(), latency)
    }

    fn with_scans(scans: Vec<RiskResult>, latency: MockSettings) -> Self {
        Self {
            scans: RwLock::new(scans),
            latency,
        }
    }
}

#[async_trait]
impl ScanHistory for InMemoryScanHistory {
    async fn list_scans(&self) -> Result<Vec<RiskResult>> {
        simulate(self.latency.history_latency()).await;
        Ok(self.scans.read().await.clone())
    }

    async fn record_scan(&self, result: &RiskResult) -> Result<()> {
        let mut scans = self.scans.write().await;
        scans.push(result.clone());
        debug!("Recorded scan #{} ({})", scans.len(), result.risk_level);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_history() {
        let history = InMemoryScanHistory::new(MockSettings::instant());
        let scans = history.list_scans().await.unwrap();
        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].risk_score, 15);
        assert_eq!(scans[0].risk_level, RiskLevel::Low);
        assert!(scans[0].timestamp < Utc::now());
    }

    #[tokio::test]
    async fn test_record_appends() {
        let history = InMemoryScanHistory::empty(MockSettings::instant());
        let result = RiskResult {
            risk_score: 80,
            risk_level: RiskLevel::High,
            confidence: 90,
            factors: Vec::new(),
            recommendations: Vec::new(),
            timestamp: Utc::now(),
        };
        history.record_scan(&result).await.unwrap();
        assert_eq!(history.list_scans().await.unwrap(), vec![result]);
    }
}
