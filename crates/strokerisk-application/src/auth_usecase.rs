//! Sign-in and sign-up flows.
//!
//! Form input is validated through the resolver before the identity backend
//! is called; the backend's verdict is reported through the [`Notifier`].

use std::sync::Arc;

use strokerisk_core::auth::{AuthService, FederatedProvider};
use strokerisk_core::form::SchemaResolver;
use strokerisk_core::notification::{Notification, Notifier};
use strokerisk_core::session::AuthUser;
use strokerisk_core::validation::{Candidate, LoginSchema, SignupSchema};
use strokerisk_core::{Result, StrokeRiskError};
use tracing::{debug, info, warn};

pub struct AuthUseCase {
    auth: Arc<dyn AuthService>,
    notifier: Arc<dyn Notifier>,
    login: SchemaResolver<LoginSchema>,
    signup: SchemaResolver<SignupSchema>,
}

impl AuthUseCase {
    pub fn new(auth: Arc<dyn AuthService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            auth,
            notifier,
            login: SchemaResolver::new(LoginSchema),
            signup: SchemaResolver::new(SignupSchema),
        }
    }

    /// Validates the login form and signs in.
    ///
    /// Invalid input returns the field errors without contacting the backend
    /// or raising a notification.
    pub async fn login(&self, form: &Candidate) -> Result<AuthUser> {
        let credentials = self.login.resolve(form).into_result().map_err(|errors| {
            debug!("Login form rejected: {:?}", errors.keys().collect::<Vec<_>>());
            StrokeRiskError::Validation(errors)
        })?;

        match self
            .auth
            .sign_in_with_email(&credentials.email, &credentials.password)
            .await
        {
            Ok(user) => {
                self.notifier
                    .notify(Notification::success("Login Successful").with_description("Welcome back!"));
                Ok(user)
            }
            Err(err) => {
                warn!("Login failed: {}", err);
                self.notifier.notify(
                    Notification::error("Login Failed").with_description(failure_description(&err)),
                );
                Err(err)
            }
        }
    }

    /// Validates the signup form, creates the account and signs it in.
    pub async fn signup(&self, form: &Candidate) -> Result<AuthUser> {
        let record = self.signup.resolve(form).into_result().map_err(|errors| {
            debug!("Signup form rejected: {:?}", errors.keys().collect::<Vec<_>>());
            StrokeRiskError::Validation(errors)
        })?;

        match self
            .auth
            .sign_up_with_email(record.name.trim(), &record.email, &record.password)
            .await
        {
            Ok(user) => {
                info!("New account {}", user.uid);
                self.notifier
                    .notify(Notification::success("Account Created").with_description("Welcome!"));
                Ok(user)
            }
            Err(err) => {
                warn!("Signup failed: {}", err);
                self.notifier.notify(
                    Notification::error("Signup Failed").with_description(failure_description(&err)),
                );
                Err(err)
            }
        }
    }

    /// Signs in through a federated provider from the login screen.
    pub async fn login_with_provider(&self, provider: FederatedProvider) -> Result<AuthUser> {
        self.federated(provider, "Login Successful", "Login Failed").await
    }

    /// Signs in through a federated provider from the signup screen.
    pub async fn signup_with_provider(&self, provider: FederatedProvider) -> Result<AuthUser> {
        self.federated(provider, "Signup Successful", "Signup Failed").await
    }

    async fn federated(
        &self,
        provider: FederatedProvider,
        success_title: &str,
        failure_title: &str,
    ) -> Result<AuthUser> {
        match self.auth.sign_in_with_provider(provider).await {
            Ok(user) => {
                self.notifier.notify(Notification::success(success_title));
                Ok(user)
            }
            Err(err) => {
                warn!("{} sign-in failed: {}", provider, err);
                self.notifier.notify(
                    Notification::error(failure_title).with_description(failure_description(&err)),
                );
                Err(err)
            }
        }
    }

    pub async fn logout(&self) -> Result<()> {
        self.auth.sign_out().await
    }
}

fn failure_description(err: &StrokeRiskError) -> String {
    match err {
        StrokeRiskError::Authentication(failure) => failure.to_string(),
        other => other.to_string(),
    }
}
