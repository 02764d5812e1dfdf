//! Session identity as reported by the identity backend.

use serde::{Deserialize, Serialize};

/// The signed-in user, as far as this layer needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl AuthUser {
    /// Name shown in greetings: the display name, falling back to the email.
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// Externally owned session state.
///
/// Starts as `Settling` until the backend reports for the first time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "user", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Settling,
    Present(AuthUser),
    Absent,
}

impl SessionState {
    pub fn is_settling(&self) -> bool {
        matches!(self, Self::Settling)
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Self::Present(user) => Some(user),
            _ => None,
        }
    }
}
