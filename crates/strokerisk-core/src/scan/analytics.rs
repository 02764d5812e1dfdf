//! Aggregates shown on the analytics and history views.

use serde::Serialize;

use super::model::{RiskFilter, RiskLevel, RiskResult};

/// One point of the risk trend sparkline (1-based scan index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub index: usize,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub total_scans: usize,
    /// Rounded mean score; 0 when there are no scans.
    pub average_risk: u8,
    pub latest_level: Option<RiskLevel>,
    pub trend: Vec<TrendPoint>,
    pub low_count: usize,
    pub medium_count: usize,
    pub high_count: usize,
}

impl ScanSummary {
    pub fn from_scans(scans: &[RiskResult]) -> Self {
        let count = |level: RiskLevel| scans.iter().filter(|s| s.risk_level == level).count();
        let total: u32 = scans.iter().map(|s| u32::from(s.risk_score)).sum();
        let average_risk = if scans.is_empty() {
            0
        } else {
            (f64::from(total) / scans.len() as f64).round() as u8
        };

        Self {
            total_scans: scans.len(),
            average_risk,
            latest_level: latest(scans).map(|s| s.risk_level),
            trend: scans
                .iter()
                .enumerate()
                .map(|(i, s)| TrendPoint {
                    index: i + 1,
                    score: s.risk_score,
                })
                .collect(),
            low_count: count(RiskLevel::Low),
            medium_count: count(RiskLevel::Medium),
            high_count: count(RiskLevel::High),
        }
    }
}

/// Most recent result by timestamp.
pub fn latest(scans: &[RiskResult]) -> Option<&RiskResult> {
    scans.iter().max_by_key(|s| s.timestamp)
}

/// Results matching `filter`, newest first.
pub fn filter_history(scans: &[RiskResult], filter: RiskFilter) -> Vec<RiskResult> {
    let mut matching: Vec<RiskResult> = scans.iter().filter(|s| filter.matches(s)).cloned().collect();
    matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn scan(score: u8, level: RiskLevel, days_ago: i64) -> RiskResult {
        RiskResult {
            risk_score: score,
            risk_level: level,
            confidence: 90,
            factors: vec![],
            recommendations: vec![],
            timestamp: Utc::now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = ScanSummary::from_scans(&[]);
        assert_eq!(summary.total_scans, 0);
        assert_eq!(summary.average_risk, 0);
        assert!(summary.latest_level.is_none());
        assert!(summary.trend.is_empty());
    }

    #[test]
    fn test_summary_rounds_average() {
        let scans = vec![
            scan(15, RiskLevel::Low, 3),
            scan(50, RiskLevel::Medium, 2),
            scan(76, RiskLevel::High, 1),
        ];
        let summary = ScanSummary::from_scans(&scans);
        assert_eq!(summary.total_scans, 3);
        assert_eq!(summary.average_risk, 47);
        assert_eq!(summary.latest_level, Some(RiskLevel::High));
        assert_eq!(summary.trend[1], TrendPoint { index: 2, score: 50 });
        assert_eq!((summary.low_count, summary.medium_count, summary.high_count), (1, 1, 1));
    }

    #[test]
    fn test_filter_history_newest_first() {
        let scans = vec![
            scan(10, RiskLevel::Low, 5),
            scan(80, RiskLevel::High, 4),
            scan(20, RiskLevel::Low, 1),
        ];
        let lows = filter_history(&scans, RiskFilter::Low);
        assert_eq!(lows.iter().map(|s| s.risk_score).collect::<Vec<_>>(), vec![20, 10]);
        assert_eq!(filter_history(&scans, RiskFilter::All).len(), 3);
        assert!(filter_history(&scans, RiskFilter::Medium).is_empty());
    }
}
