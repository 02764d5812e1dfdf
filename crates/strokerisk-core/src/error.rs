//! Error types for the StrokeRisk application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::FieldErrorMap;

/// Reasons an authentication attempt can be refused by the identity backend.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthFailure {
    /// Email/password pair did not match an account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Signup refused, e.g. the email already belongs to an account.
    #[error("Account rejected: {reason}")]
    AccountRejected { reason: String },

    /// Password accepted by the form but refused by the backend policy.
    #[error("Weak password: {reason}")]
    WeakPassword { reason: String },

    /// Federated (OAuth) sign-in failed.
    #[error("OAuth error ({provider}): {message}")]
    OAuth { provider: String, message: String },
}

/// A shared error type for the entire StrokeRisk application.
///
/// Every variant returns control to the user with prior input intact; none
/// of them is fatal to the process. An absent session is not an error at
/// all, it is a routing decision made by the session gate.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum StrokeRiskError {
    /// Per-field validation failure, shown inline next to the fields
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FieldErrorMap),

    /// Identity backend refused the attempt
    #[error("Authentication failed: {0}")]
    Authentication(AuthFailure),

    /// Profile save (or other write) failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Scan analysis failed
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Operation not allowed in the current workflow state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StrokeRiskError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Creates an Analysis error
    pub fn analysis(message: impl Into<String>) -> Self {
        Self::Analysis(message.into())
    }

    /// Creates an InvalidState error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the inline field errors carried by a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrorMap> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Whether re-submitting the same input may succeed.
    ///
    /// Validation errors need a user correction first, so they are not
    /// retryable in this sense.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Authentication(_) | Self::Persistence(_) | Self::Analysis(_)
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<AuthFailure> for StrokeRiskError {
    fn from(err: AuthFailure) -> Self {
        Self::Authentication(err)
    }
}

impl From<std::io::Error> for StrokeRiskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for StrokeRiskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for StrokeRiskError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for StrokeRiskError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (for binaries bridging back into the core)
impl From<anyhow::Error> for StrokeRiskError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, StrokeRiskError>`.
pub type Result<T> = std::result::Result<T, StrokeRiskError>;
