//! Identity backend contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tokio::sync::watch;

use crate::error::Result;
use crate::session::{AuthUser, SessionState};

/// Third-party identity providers offered on the sign-in screens.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FederatedProvider {
    Google,
    Microsoft,
    Yahoo,
}

impl FederatedProvider {
    /// Provider id as understood by the identity backend.
    pub fn provider_id(self) -> &'static str {
        match self {
            Self::Google => "google.com",
            Self::Microsoft => "microsoft.com",
            Self::Yahoo => "yahoo.com",
        }
    }
}

/// Service for signing users in and out.
///
/// Implementations own the session state and publish every change on the
/// stream returned by [`subscribe`](AuthService::subscribe). Consumers only
/// ever read that stream.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Signs in with email and password.
    ///
    /// Fails with `AuthFailure::InvalidCredentials` when the pair does not
    /// match an account.
    async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<AuthUser>;

    /// Creates an account and signs it in. `name` becomes the display name
    /// when it is not blank.
    async fn sign_up_with_email(&self, name: &str, email: &str, password: &str) -> Result<AuthUser>;

    /// Signs in through a federated provider.
    async fn sign_in_with_provider(&self, provider: FederatedProvider) -> Result<AuthUser>;

    async fn sign_out(&self) -> Result<()>;

    /// Subscribes to session changes. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> watch::Receiver<SessionState>;

    /// Latest reported session state.
    fn current_session(&self) -> SessionState;
}
