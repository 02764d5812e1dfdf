pub mod config_service;
pub mod hospital_locator;
mod latency;
pub mod mock_auth_service;
pub mod mock_scan_service;
pub mod paths;
pub mod profile_repository;
pub mod scan_history;
pub mod tracing_notifier;

pub use crate::config_service::ConfigService;
pub use crate::hospital_locator::StaticHospitalLocator;
pub use crate::mock_auth_service::MockAuthService;
pub use crate::mock_scan_service::MockScanService;
pub use crate::paths::StrokeRiskPaths;
pub use crate::profile_repository::InMemoryProfileRepository;
pub use crate::scan_history::InMemoryScanHistory;
pub use crate::tracing_notifier::TracingNotifier;
