//! Use cases of the StrokeRisk application.
//!
//! Each use case orchestrates core state machines and collaborator traits;
//! [`StrokeRiskApp`] wires them to the in-process mocks from a configuration.

pub mod app;
pub mod auth_usecase;
pub mod emergency_usecase;
pub mod profile_usecase;
pub mod scan_usecase;
pub mod session_context;

pub use app::StrokeRiskApp;
pub use auth_usecase::AuthUseCase;
pub use emergency_usecase::EmergencyUseCase;
pub use profile_usecase::ProfileWizardUseCase;
pub use scan_usecase::ScanUseCase;
pub use session_context::{GuardHandle, SessionContext};
