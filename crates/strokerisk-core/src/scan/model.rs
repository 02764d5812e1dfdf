//! Risk assessment results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Score cut-offs for the risk levels.
///
/// These are illustrative demo values, not derived from any model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Scores strictly above this are at least MEDIUM.
    pub medium_above: u8,
    /// Scores strictly above this are HIGH.
    pub high_above: u8,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium_above: 30,
            high_above: 70,
        }
    }
}

impl RiskThresholds {
    pub fn classify(&self, score: u8) -> RiskLevel {
        if score > self.high_above {
            RiskLevel::High
        } else if score > self.medium_above {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Outcome of one (simulated) stroke-risk scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    /// 0..=100
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    /// 0..=100
    pub confidence: u8,
    pub factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// History filter offered by the scan history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RiskFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl RiskFilter {
    pub fn matches(self, result: &RiskResult) -> bool {
        match self {
            Self::All => true,
            Self::High => result.risk_level == RiskLevel::High,
            Self::Medium => result.risk_level == RiskLevel::Medium,
            Self::Low => result.risk_level == RiskLevel::Low,
        }
    }
}
