mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use common::RecordingNotifier;
use strokerisk_application::ProfileWizardUseCase;
use strokerisk_core::config::MockSettings;
use strokerisk_core::notification::NotificationLevel;
use strokerisk_core::profile::{MedicalProfile, MedicalProfileInput, ProfileField, ProfileRepository};
use strokerisk_core::wizard::{StepForm, WizardPhase, WizardStep};
use strokerisk_core::{Result, StrokeRiskError};
use strokerisk_infrastructure::InMemoryProfileRepository;
use tokio::sync::Notify;

async fn open(repo: Arc<dyn ProfileRepository>) -> (ProfileWizardUseCase, Arc<RecordingNotifier>) {
    let notifier = RecordingNotifier::new();
    let wizard = ProfileWizardUseCase::open(repo, notifier.clone()).await.unwrap();
    (wizard, notifier)
}

async fn walk_to_review(wizard: &ProfileWizardUseCase) {
    for _ in 0..4 {
        wizard.advance().await.unwrap();
    }
    assert_eq!(wizard.current_step().await, WizardStep::Review);
}

#[tokio::test]
async fn test_edit_session_starts_from_stored_profile() {
    let repo = Arc::new(InMemoryProfileRepository::new(MockSettings::instant()));
    let (wizard, _) = open(repo).await;

    assert!(!wizard.needs_onboarding());
    let controller = wizard.controller().await;
    assert_eq!(controller.current_step(), WizardStep::BasicInformation);
    match controller.form() {
        StepForm::BasicInformation { age, .. } => {
            assert_eq!(age.value.and_then(|v| v.as_u64()), Some(45));
        }
        other => panic!("unexpected form: {other:?}"),
    }
}

#[tokio::test]
async fn test_onboarding_flow_saves_profile() {
    let repo = Arc::new(InMemoryProfileRepository::empty(MockSettings::instant()));
    let (wizard, notifier) = open(repo.clone()).await;
    assert!(wizard.needs_onboarding());

    wizard.set_field(ProfileField::Age, "15").await.unwrap();
    let err = wizard.advance().await.unwrap_err();
    assert_eq!(
        err.field_errors().unwrap()["age"].message,
        "Number must be greater than or equal to 18"
    );
    assert_eq!(wizard.current_step().await, WizardStep::BasicInformation);

    wizard.set_field(ProfileField::Age, "18").await.unwrap();
    wizard.set_field(ProfileField::SystolicBp, "135").await.unwrap();
    wizard.set_field(ProfileField::HasHypertension, true).await.unwrap();
    walk_to_review(&wizard).await;

    let saved = wizard.submit().await.unwrap();
    assert_eq!(saved.data.age, 18);
    assert_eq!(saved.data.systolic_bp, 135);
    assert!(saved.data.has_hypertension);
    assert_eq!(repo.get_profile().await.unwrap(), Some(saved));

    assert_eq!(wizard.controller().await.phase(), WizardPhase::Submitted);
    let toast = notifier.last().unwrap();
    assert_eq!(toast.title, "Profile Updated");
    assert_eq!(
        toast.description.as_deref(),
        Some("Your medical profile has been saved.")
    );

    assert!(wizard.set_field(ProfileField::Age, 50).await.is_err());
}

#[tokio::test]
async fn test_failed_save_keeps_draft_and_allows_retry() {
    let repo = Arc::new(InMemoryProfileRepository::new(MockSettings::instant()));
    repo.fail_next_updates(1);
    let (wizard, notifier) = open(repo).await;
    wizard.set_field(ProfileField::Bmi, "27.5").await.unwrap();
    walk_to_review(&wizard).await;

    let err = wizard.submit().await.unwrap_err();
    assert!(matches!(err, StrokeRiskError::Persistence(_)));
    assert!(err.is_retryable());
    {
        let controller = wizard.controller().await;
        assert_eq!(controller.current_step(), WizardStep::Review);
        assert_eq!(controller.phase(), WizardPhase::Editing);
    }
    let toast = notifier.last().unwrap();
    assert_eq!(toast.level, NotificationLevel::Error);
    assert_eq!(toast.title, "Update Failed");

    let saved = wizard.submit().await.unwrap();
    assert_eq!(saved.data.bmi, 27.5);
    assert_eq!(notifier.count(NotificationLevel::Success), 1);
}

#[tokio::test]
async fn test_submit_outside_review_is_invalid_state() {
    let repo = Arc::new(InMemoryProfileRepository::new(MockSettings::instant()));
    let (wizard, notifier) = open(repo).await;

    let err = wizard.submit().await.unwrap_err();
    assert!(matches!(err, StrokeRiskError::InvalidState(_)));
    assert!(notifier.all().is_empty());
}

/// Repository whose update blocks until released.
struct HeldRepository {
    release: Notify,
    entered: Notify,
}

#[async_trait]
impl ProfileRepository for HeldRepository {
    async fn get_profile(&self) -> Result<Option<MedicalProfile>> {
        Ok(None)
    }

    async fn update_profile(&self, input: &MedicalProfileInput) -> Result<MedicalProfile> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(MedicalProfile::new("1", input.clone()))
    }
}

#[tokio::test]
async fn test_in_flight_submission_rejects_everything_else() {
    let repo = Arc::new(HeldRepository {
        release: Notify::new(),
        entered: Notify::new(),
    });
    let (wizard, _) = open(repo.clone()).await;
    walk_to_review(&wizard).await;
    let wizard = Arc::new(wizard);

    let first = tokio::spawn({
        let wizard = wizard.clone();
        async move { wizard.submit().await }
    });
    repo.entered.notified().await;

    for err in [
        wizard.submit().await.unwrap_err(),
        wizard.retreat().await.unwrap_err(),
        wizard.advance().await.unwrap_err(),
        wizard.set_field(ProfileField::Age, 30).await.unwrap_err(),
    ] {
        assert!(matches!(err, StrokeRiskError::InvalidState(_)), "{err:?}");
    }

    repo.release.notify_one();
    assert!(first.await.unwrap().is_ok());
    assert!(wizard.controller().await.is_submitted());
}

/// Repository whose first update never finishes.
struct StallingRepository {
    stall_next: AtomicBool,
}

#[async_trait]
impl ProfileRepository for StallingRepository {
    async fn get_profile(&self) -> Result<Option<MedicalProfile>> {
        Ok(None)
    }

    async fn update_profile(&self, input: &MedicalProfileInput) -> Result<MedicalProfile> {
        if self.stall_next.swap(false, Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        Ok(MedicalProfile::new("1", input.clone()))
    }
}

#[tokio::test]
async fn test_cancelled_submission_returns_to_review() {
    let repo = Arc::new(StallingRepository {
        stall_next: AtomicBool::new(true),
    });
    let (wizard, notifier) = open(repo).await;
    walk_to_review(&wizard).await;

    let timed_out = tokio::time::timeout(Duration::from_millis(20), wizard.submit()).await;
    assert!(timed_out.is_err());
    {
        let controller = wizard.controller().await;
        assert_eq!(controller.phase(), WizardPhase::Editing);
        assert_eq!(controller.current_step(), WizardStep::Review);
    }
    assert!(notifier.all().is_empty());

    wizard.retreat().await.unwrap();
    wizard.set_field(ProfileField::Bmi, "24.0").await.unwrap();
    assert_eq!(wizard.advance().await.unwrap(), WizardStep::Review);

    let saved = wizard.submit().await.unwrap();
    assert_eq!(saved.id, "1");
    assert_eq!(saved.data.bmi, 24.0);
    assert!(wizard.controller().await.is_submitted());
}
