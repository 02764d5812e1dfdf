pub mod auth;
pub mod config;
pub mod error;
pub mod form;
pub mod hospital;
pub mod notification;
pub mod profile;
pub mod scan;
pub mod session;
pub mod validation;
pub mod wizard;

// Re-export common error type
pub use error::{AuthFailure, Result, StrokeRiskError};
