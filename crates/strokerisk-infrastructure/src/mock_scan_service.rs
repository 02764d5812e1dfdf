//! Simulated stroke-risk analysis.
//!
//! Scores are random placeholders; nothing here looks at the image beyond
//! checking that one was captured.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strokerisk_core::config::MockSettings;
use strokerisk_core::scan::{RiskLevel, RiskResult, RiskThresholds, ScanHistory, ScanService};
use strokerisk_core::{Result, StrokeRiskError};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::latency::simulate;

const FACTORS: [&str; 2] = [
    "Facial asymmetry detected",
    "Slurred speech patterns (simulated)",
];

enum Scoring {
    Random(Mutex<StdRng>),
    Fixed { score: u8, confidence: u8 },
}

pub struct MockScanService {
    scoring: Scoring,
    thresholds: RiskThresholds,
    history: Arc<dyn ScanHistory>,
    latency: MockSettings,
}

impl MockScanService {
    /// Creates a service drawing scores from an entropy-seeded generator.
    /// Every result is appended to `history`.
    pub fn new(history: Arc<dyn ScanHistory>, thresholds: RiskThresholds, latency: MockSettings) -> Self {
        Self::with_scoring(
            Scoring::Random(Mutex::new(StdRng::from_entropy())),
            history,
            thresholds,
            latency,
        )
    }

    /// Deterministic random scores.
    pub fn with_seed(
        seed: u64,
        history: Arc<dyn ScanHistory>,
        thresholds: RiskThresholds,
        latency: MockSettings,
    ) -> Self {
        Self::with_scoring(
            Scoring::Random(Mutex::new(StdRng::seed_from_u64(seed))),
            history,
            thresholds,
            latency,
        )
    }

    /// Always reports `score` (clamped to 100) with confidence 90.
    pub fn with_fixed_score(
        score: u8,
        history: Arc<dyn ScanHistory>,
        thresholds: RiskThresholds,
        latency: MockSettings,
    ) -> Self {
        Self::with_scoring(
            Scoring::Fixed {
                score: score.min(100),
                confidence: 90,
            },
            history,
            thresholds,
            latency,
        )
    }

    fn with_scoring(
        scoring: Scoring,
        history: Arc<dyn ScanHistory>,
        thresholds: RiskThresholds,
        latency: MockSettings,
    ) -> Self {
        Self {
            scoring,
            thresholds,
            history,
            latency,
        }
    }

    async fn draw(&self) -> (u8, u8) {
        match &self.scoring {
            Scoring::Random(rng) => {
                let mut rng = rng.lock().await;
                (rng.gen_range(0..100), rng.gen_range(85..95))
            }
            Scoring::Fixed { score, confidence } => (*score, *confidence),
        }
    }
}

fn recommendations(level: RiskLevel) -> Vec<String> {
    let lines: [&str; 2] = match level {
        RiskLevel::High => ["Call Emergency Services immediately", "Do not drive yourself"],
        RiskLevel::Medium | RiskLevel::Low => ["Monitor symptoms", "Consult a doctor"],
    };
    lines.iter().map(|s| s.to_string()).collect()
}

#[async_trait]
impl ScanService for MockScanService {
    async fn submit_scan(&self, image_data: &str) -> Result<RiskResult> {
        if image_data.trim().is_empty() {
            warn!("Scan rejected: no image captured");
            return Err(StrokeRiskError::analysis("No image data captured"));
        }

        simulate(self.latency.scan_latency()).await;

        let (risk_score, confidence) = self.draw().await;
        let risk_level = self.thresholds.classify(risk_score);
        let result = RiskResult {
            risk_score,
            risk_level,
            confidence,
            factors: FACTORS.iter().map(|s| s.to_string()).collect(),
            recommendations: recommendations(risk_level),
            timestamp: Utc::now(),
        };

        self.history.record_scan(&result).await?;
        info!("Scan analysed: score={} level={}", risk_score, risk_level);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_history::InMemoryScanHistory;

    fn history() -> Arc<InMemoryScanHistory> {
        Arc::new(InMemoryScanHistory::empty(MockSettings::instant()))
    }

    #[tokio::test]
    async fn test_fixed_scores_classify() {
        for (score, level) in [(75, RiskLevel::High), (50, RiskLevel::Medium), (10, RiskLevel::Low)] {
            let service = MockScanService::with_fixed_score(
                score,
                history(),
                RiskThresholds::default(),
                MockSettings::instant(),
            );
            let result = service.submit_scan("data:image/jpeg;base64,AAAA").await.unwrap();
            assert_eq!(result.risk_level, level);
        }
    }

    #[tokio::test]
    async fn test_high_risk_recommendations() {
        let service = MockScanService::with_fixed_score(
            90,
            history(),
            RiskThresholds::default(),
            MockSettings::instant(),
        );
        let result = service.submit_scan("frame").await.unwrap();
        assert_eq!(result.recommendations[0], "Call Emergency Services immediately");
        assert_eq!(result.factors.len(), 2);
    }

    #[tokio::test]
    async fn test_random_scores_stay_in_range() {
        let history = history();
        let service = MockScanService::with_seed(
            7,
            history.clone(),
            RiskThresholds::default(),
            MockSettings::instant(),
        );
        for _ in 0..20 {
            let result = service.submit_scan("frame").await.unwrap();
            assert!(result.risk_score < 100);
            assert!((85..95).contains(&result.confidence));
        }
        assert_eq!(history.list_scans().await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_empty_image_is_analysis_error() {
        let history = history();
        let service = MockScanService::new(history.clone(), RiskThresholds::default(), MockSettings::instant());
        let err = service.submit_scan("  ").await.unwrap_err();
        assert!(matches!(err, StrokeRiskError::Analysis(_)));
        assert!(history.list_scans().await.unwrap().is_empty());
    }
}
