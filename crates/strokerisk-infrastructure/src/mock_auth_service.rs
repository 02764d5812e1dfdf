//! In-process identity backend.
//!
//! Stands in for a hosted auth provider: keeps accounts in memory, simulates
//! network latency and publishes session changes on a watch channel.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use strokerisk_core::auth::{AuthService, FederatedProvider};
use strokerisk_core::config::MockSettings;
use strokerisk_core::session::{AuthUser, SessionState};
use strokerisk_core::{AuthFailure, Result};
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::latency::simulate;

/// Minimum password length enforced by the backend policy.
const MIN_PASSWORD_LEN: usize = 6;

pub const DEMO_EMAIL: &str = "user@example.com";
pub const DEMO_PASSWORD: &str = "password123";
pub const DEMO_NAME: &str = "John Doe";

/// Accounts are looked up case-insensitively by email.
fn account_key(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[derive(Debug, Clone)]
struct Account {
    user: AuthUser,
    password: String,
}

pub struct MockAuthService {
    accounts: RwLock<HashMap<String, Account>>,
    disabled_providers: HashSet<FederatedProvider>,
    session: watch::Sender<SessionState>,
    latency: MockSettings,
}

impl MockAuthService {
    /// Creates the backend with the demo account registered. The session
    /// stays `Settling` until [`settle`](Self::settle) is called.
    pub fn new(latency: MockSettings) -> Self {
        let demo = Account {
            user: AuthUser {
                uid: "1".to_string(),
                email: DEMO_EMAIL.to_string(),
                display_name: Some(DEMO_NAME.to_string()),
            },
            password: DEMO_PASSWORD.to_string(),
        };
        let (session, _) = watch::channel(SessionState::Settling);

        Self {
            accounts: RwLock::new(HashMap::from([(account_key(DEMO_EMAIL), demo)])),
            disabled_providers: HashSet::new(),
            session,
            latency,
        }
    }

    /// Makes sign-in through `provider` fail, as if it were not enabled on
    /// the backend.
    pub fn with_disabled_provider(mut self, provider: FederatedProvider) -> Self {
        self.disabled_providers.insert(provider);
        self
    }

    /// Reports the initial session state: nobody is signed in.
    ///
    /// Does nothing once a state other than `Settling` has been published.
    pub fn settle(&self) {
        let changed = self.session.send_if_modified(|state| {
            if state.is_settling() {
                *state = SessionState::Absent;
                true
            } else {
                false
            }
        });
        if changed {
            debug!("Auth backend settled: no session");
        }
    }

    fn publish(&self, state: SessionState) {
        self.session.send_replace(state);
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<AuthUser> {
        simulate(self.latency.auth_latency()).await;

        let user = {
            let accounts = self.accounts.read().await;
            match accounts.get(&account_key(email)) {
                Some(account) if account.password == password => account.user.clone(),
                _ => {
                    warn!("Sign-in refused for {}", email);
                    return Err(AuthFailure::InvalidCredentials.into());
                }
            }
        };

        info!("Signed in: {}", user.email);
        self.publish(SessionState::Present(user.clone()));
        Ok(user)
    }

    async fn sign_up_with_email(&self, name: &str, email: &str, password: &str) -> Result<AuthUser> {
        simulate(self.latency.auth_latency()).await;

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthFailure::WeakPassword {
                reason: format!("Password should be at least {} characters", MIN_PASSWORD_LEN),
            }
            .into());
        }

        let user = {
            let key = account_key(email);
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&key) {
                warn!("Sign-up refused, email already registered: {}", email);
                return Err(AuthFailure::AccountRejected {
                    reason: "Email already in use".to_string(),
                }
                .into());
            }

            let name = name.trim();
            let user = AuthUser {
                uid: Uuid::new_v4().to_string(),
                email: email.to_string(),
                display_name: (!name.is_empty()).then(|| name.to_string()),
            };
            accounts.insert(
                key,
                Account {
                    user: user.clone(),
                    password: password.to_string(),
                },
            );
            user
        };

        info!("Account created: {}", user.email);
        self.publish(SessionState::Present(user.clone()));
        Ok(user)
    }

    async fn sign_in_with_provider(&self, provider: FederatedProvider) -> Result<AuthUser> {
        simulate(self.latency.auth_latency()).await;

        if self.disabled_providers.contains(&provider) {
            warn!("Federated sign-in refused: {} is disabled", provider);
            return Err(AuthFailure::OAuth {
                provider: provider.provider_id().to_string(),
                message: "Provider is not enabled".to_string(),
            }
            .into());
        }

        let user = AuthUser {
            uid: Uuid::new_v4().to_string(),
            email: format!("{}.user@{}", provider, provider.provider_id()),
            display_name: Some(format!("{} User", provider)),
        };

        info!("Signed in with {}: {}", provider, user.email);
        self.publish(SessionState::Present(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<()> {
        simulate(self.latency.sign_out_latency()).await;
        info!("Signed out");
        self.publish(SessionState::Absent);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.session.subscribe()
    }

    fn current_session(&self) -> SessionState {
        self.session.borrow().clone()
    }
}
