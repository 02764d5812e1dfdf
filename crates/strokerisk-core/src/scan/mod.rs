//! Scan results, history and analytics.

mod analytics;
mod model;
mod service;

pub use analytics::{ScanSummary, TrendPoint, filter_history, latest};
pub use model::{RiskFilter, RiskLevel, RiskResult, RiskThresholds};
pub use service::{ScanHistory, ScanService};
