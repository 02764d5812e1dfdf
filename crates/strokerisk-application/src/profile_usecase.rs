//! Medical profile questionnaire use case.
//!
//! Wraps a [`WizardController`] behind an async lock. The lock is never held
//! across the collaborator call; the controller's `Submitting` phase is what
//! rejects duplicate submissions and edits in the meantime.

use std::sync::Arc;

use serde_json::Value;
use strokerisk_core::Result;
use strokerisk_core::notification::{Notification, Notifier};
use strokerisk_core::profile::{MedicalProfile, ProfileField, ProfileRepository};
use strokerisk_core::wizard::{ProfileDraft, WizardController, WizardStep};
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, info, warn};

pub struct ProfileWizardUseCase {
    repository: Arc<dyn ProfileRepository>,
    notifier: Arc<dyn Notifier>,
    wizard: Arc<RwLock<WizardController>>,
    needs_onboarding: bool,
}

impl ProfileWizardUseCase {
    /// Opens a wizard session.
    ///
    /// Starts from the stored profile when there is one (an edit session),
    /// otherwise from the questionnaire defaults (onboarding).
    pub async fn open(repository: Arc<dyn ProfileRepository>, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let stored = repository.get_profile().await?;
        let needs_onboarding = stored.is_none();
        let draft = match &stored {
            Some(profile) => ProfileDraft::from_profile(&profile.data),
            None => ProfileDraft::with_defaults(),
        };
        info!("Profile wizard opened (onboarding={})", needs_onboarding);

        Ok(Self {
            repository,
            notifier,
            wizard: Arc::new(RwLock::new(WizardController::with_draft(draft))),
            needs_onboarding,
        })
    }

    /// Whether the user had no stored profile when the session opened.
    pub fn needs_onboarding(&self) -> bool {
        self.needs_onboarding
    }

    /// Read access for renderers (`form()`, `errors()`, `progress_percent()`).
    pub async fn controller(&self) -> RwLockReadGuard<'_, WizardController> {
        self.wizard.read().await
    }

    pub async fn current_step(&self) -> WizardStep {
        self.wizard.read().await.current_step()
    }

    pub async fn set_field(&self, field: ProfileField, value: impl Into<Value>) -> Result<()> {
        let mut wizard = self.wizard.write().await;
        wizard.set_field(field, value)?;
        if let Some(error) = wizard.errors().get(field.key()) {
            debug!("{} rejected: {}", field.key(), error.message);
        }
        Ok(())
    }

    pub async fn advance(&self) -> Result<WizardStep> {
        let mut wizard = self.wizard.write().await;
        let from = wizard.current_step();
        match wizard.advance() {
            Ok(step) => {
                if step != from {
                    debug!("Wizard advanced {} -> {}", from.ordinal(), step.ordinal());
                }
                Ok(step)
            }
            Err(err) => {
                debug!("Wizard stayed on step {}: {}", from.ordinal(), err);
                Err(err.into())
            }
        }
    }

    pub async fn retreat(&self) -> Result<WizardStep> {
        Ok(self.wizard.write().await.retreat()?)
    }

    /// Validates the whole draft and stores it.
    ///
    /// A validation failure leaves the wizard on Review with the errors
    /// visible. A storage failure also stays on Review with the draft
    /// intact, notifies the user and may be retried.
    pub async fn submit(&self) -> Result<MedicalProfile> {
        let input = self.wizard.write().await.begin_submit()?;
        let mut pending = PendingSubmission::new(self.wizard.clone());
        debug!("Submitting profile");

        let outcome = self.repository.update_profile(&input).await;
        let mut wizard = self.wizard.write().await;
        pending.disarm();

        match outcome {
            Ok(profile) => {
                wizard.complete_submit()?;
                drop(wizard);
                info!("Profile {} saved", profile.id);
                self.notifier.notify(
                    Notification::success("Profile Updated")
                        .with_description("Your medical profile has been saved."),
                );
                Ok(profile)
            }
            Err(err) => {
                wizard.abort_submit()?;
                drop(wizard);
                warn!("Profile save failed: {}", err);
                self.notifier.notify(
                    Notification::error("Update Failed")
                        .with_description("Could not save profile. Please try again."),
                );
                Err(err)
            }
        }
    }
}

/// Returns the wizard to Review when a submission future is dropped before
/// its outcome was applied.
struct PendingSubmission {
    wizard: Arc<RwLock<WizardController>>,
    armed: bool,
}

impl PendingSubmission {
    fn new(wizard: Arc<RwLock<WizardController>>) -> Self {
        Self { wizard, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PendingSubmission {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!("Profile submission cancelled before completion");
        match self.wizard.try_write() {
            Ok(mut wizard) => {
                let _ = wizard.abort_submit();
            }
            // A reader holds the lock; abort once it is released.
            Err(_) => {
                if let Ok(handle) = tokio::runtime::Handle::try_current() {
                    let wizard = self.wizard.clone();
                    handle.spawn(async move {
                        let _ = wizard.write().await.abort_submit();
                    });
                }
            }
        }
    }
}
