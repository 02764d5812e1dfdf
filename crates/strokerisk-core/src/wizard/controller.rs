//! Step wizard state machine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::draft::ProfileDraft;
use super::form_view::StepForm;
use super::step::{STEP_COUNT, WizardStep};
use crate::error::StrokeRiskError;
use crate::form::{FieldErrorMap, SchemaResolver};
use crate::profile::{MedicalProfileInput, ProfileField};
use crate::validation::ProfileSchema;

/// Lifecycle of one wizard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardPhase {
    /// Answers may be edited and steps navigated.
    Editing,
    /// Final submission handed off; waiting for the profile collaborator.
    Submitting,
    /// Terminal: the profile was stored.
    Submitted,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("{} field(s) need attention", .0.len())]
    Validation(FieldErrorMap),

    #[error("final submission is only available from the review step")]
    NotOnReview,

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("the profile has already been submitted")]
    AlreadySubmitted,

    #[error("no submission is in progress")]
    NoSubmissionPending,
}

impl From<WizardError> for StrokeRiskError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::Validation(errors) => StrokeRiskError::Validation(errors),
            other => StrokeRiskError::InvalidState(other.to_string()),
        }
    }
}

/// Drives a strictly linear five-step session over one [`ProfileDraft`].
///
/// `advance` validates only the current step's fields; `retreat` never
/// validates and never drops answers. The whole draft is validated once, by
/// [`begin_submit`](Self::begin_submit) on the Review step. The controller is
/// synchronous: the caller performs the collaborator call between
/// `begin_submit` and `complete_submit`/`abort_submit`, and every mutation is
/// refused while that call is outstanding.
#[derive(Debug, Clone)]
pub struct WizardController {
    step: WizardStep,
    phase: WizardPhase,
    draft: ProfileDraft,
    errors: FieldErrorMap,
    resolver: SchemaResolver<ProfileSchema>,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardController {
    /// Starts a session on a draft pre-filled with the questionnaire defaults.
    pub fn new() -> Self {
        Self::with_draft(ProfileDraft::with_defaults())
    }

    pub fn with_draft(draft: ProfileDraft) -> Self {
        Self {
            step: WizardStep::BasicInformation,
            phase: WizardPhase::Editing,
            draft,
            errors: FieldErrorMap::new(),
            resolver: SchemaResolver::new(ProfileSchema),
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// Errors currently visible next to the fields.
    pub fn errors(&self) -> &FieldErrorMap {
        &self.errors
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == WizardPhase::Submitted
    }

    /// Position of the progress bar, 0 on the first step and 100 on Review.
    pub fn progress_percent(&self) -> u8 {
        (u16::from(self.step.ordinal() - 1) * 100 / u16::from(STEP_COUNT - 1)) as u8
    }

    pub fn form(&self) -> StepForm<'_> {
        StepForm::build(self.step, &self.draft, &self.errors)
    }

    /// Earliest step holding a visible error, if any.
    pub fn first_step_with_errors(&self) -> Option<WizardStep> {
        self.errors
            .keys()
            .filter_map(|key| ProfileField::from_key(key))
            .map(WizardStep::owning)
            .min()
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        match self.phase {
            WizardPhase::Editing => Ok(()),
            WizardPhase::Submitting => Err(WizardError::SubmissionInFlight),
            WizardPhase::Submitted => Err(WizardError::AlreadySubmitted),
        }
    }

    /// Records an answer and re-validates that field alone.
    ///
    /// Answers on other steps, earlier or later, are left untouched.
    pub fn set_field(&mut self, field: ProfileField, value: impl Into<Value>) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.set(field, value);

        let key = field.key();
        let mut field_errors = self.resolver.resolve_fields(self.draft.as_candidate(), &[key]);
        match field_errors.remove(key) {
            Some(error) => {
                self.errors.insert(key.to_string(), error);
            }
            None => {
                self.errors.remove(key);
            }
        }
        Ok(())
    }

    /// Moves forward when the current step's fields are acceptable.
    ///
    /// On failure the step does not change and the step's errors become
    /// visible. On Review this is a no-op; only a submission moves past it.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_editable()?;
        if self.step.is_review() {
            return Ok(self.step);
        }

        let keys = self.step.field_keys();
        let step_errors = self.resolver.resolve_fields(self.draft.as_candidate(), &keys);
        self.errors.retain(|field, _| !keys.contains(&field.as_str()));

        if !step_errors.is_empty() {
            self.errors.extend(step_errors.clone());
            return Err(WizardError::Validation(step_errors));
        }

        self.step = self.step.next();
        Ok(self.step)
    }

    /// Moves back one step without validating. No-op on the first step.
    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_editable()?;
        self.step = self.step.previous();
        Ok(self.step)
    }

    /// Validates the entire draft and, on success, enters the submitting
    /// phase and returns the coerced profile to hand to the collaborator.
    pub fn begin_submit(&mut self) -> Result<MedicalProfileInput, WizardError> {
        self.ensure_editable()?;
        if !self.step.is_review() {
            return Err(WizardError::NotOnReview);
        }

        match self.resolver.resolve(self.draft.as_candidate()).into_result() {
            Ok(profile) => {
                self.errors.clear();
                self.phase = WizardPhase::Submitting;
                Ok(profile)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(WizardError::Validation(errors))
            }
        }
    }

    /// The collaborator stored the profile; the session is finished.
    pub fn complete_submit(&mut self) -> Result<(), WizardError> {
        if self.phase != WizardPhase::Submitting {
            return Err(WizardError::NoSubmissionPending);
        }
        self.phase = WizardPhase::Submitted;
        Ok(())
    }

    /// The collaborator failed; return to Review with the draft intact.
    pub fn abort_submit(&mut self) -> Result<(), WizardError> {
        if self.phase != WizardPhase::Submitting {
            return Err(WizardError::NoSubmissionPending);
        }
        self.phase = WizardPhase::Editing;
        Ok(())
    }

    /// Releases the draft, e.g. to seed a later edit session.
    pub fn into_draft(self) -> ProfileDraft {
        self.draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::StepForm;
    use serde_json::json;

    fn at_review() -> WizardController {
        let mut wizard = WizardController::new();
        for _ in 0..4 {
            wizard.advance().unwrap();
        }
        assert_eq!(wizard.current_step(), WizardStep::Review);
        wizard
    }

    #[test]
    fn test_advance_moves_forward_when_step_valid() {
        let mut wizard = WizardController::new();
        assert_eq!(wizard.advance().unwrap(), WizardStep::Vitals);
        assert_eq!(wizard.progress_percent(), 25);
    }

    #[test]
    fn test_advance_blocked_by_invalid_step_fields() {
        let mut wizard = WizardController::new();
        wizard.set_field(ProfileField::Age, 15).unwrap();

        let err = wizard.advance().unwrap_err();
        assert!(matches!(err, WizardError::Validation(ref e) if e.contains_key("age")));
        assert_eq!(wizard.current_step(), WizardStep::BasicInformation);
        assert_eq!(
            wizard.errors()["age"].message,
            "Number must be greater than or equal to 18"
        );

        wizard.set_field(ProfileField::Age, "18").unwrap();
        assert!(wizard.errors().is_empty());
        assert_eq!(wizard.advance().unwrap(), WizardStep::Vitals);
    }

    #[test]
    fn test_advance_ignores_fields_of_later_steps() {
        let mut draft = ProfileDraft::empty();
        draft.set(ProfileField::Age, 30);
        draft.set(ProfileField::Gender, "female");
        let mut wizard = WizardController::with_draft(draft);

        assert_eq!(wizard.advance().unwrap(), WizardStep::Vitals);
        assert!(wizard.advance().is_err());
        assert!(wizard.errors().contains_key("systolicBP"));
        assert!(!wizard.errors().contains_key("smokingStatus"));
    }

    #[test]
    fn test_advance_on_review_is_noop() {
        let mut wizard = at_review();
        assert_eq!(wizard.advance().unwrap(), WizardStep::Review);
        assert_eq!(wizard.progress_percent(), 100);
    }

    #[test]
    fn test_retreat_keeps_answers_and_never_validates() {
        let mut wizard = WizardController::new();
        assert_eq!(wizard.retreat().unwrap(), WizardStep::BasicInformation);

        wizard.advance().unwrap();
        wizard.set_field(ProfileField::Bmi, "not a number").unwrap();
        assert_eq!(wizard.retreat().unwrap(), WizardStep::BasicInformation);
        assert_eq!(wizard.draft().get(ProfileField::Bmi), Some(&json!("not a number")));
    }

    #[test]
    fn test_editing_earlier_step_keeps_later_answers() {
        let mut wizard = at_review();
        wizard.retreat().unwrap();
        wizard.retreat().unwrap();
        wizard.set_field(ProfileField::HasDiabetes, true).unwrap();
        wizard.advance().unwrap();
        wizard.advance().unwrap();

        assert_eq!(wizard.draft().get(ProfileField::SmokingStatus), Some(&json!("never")));
        assert!(wizard.begin_submit().unwrap().has_diabetes);
    }

    #[test]
    fn test_submit_requires_review_step() {
        let mut wizard = WizardController::new();
        assert_eq!(wizard.begin_submit().unwrap_err(), WizardError::NotOnReview);
    }

    #[test]
    fn test_submit_validates_entire_draft() {
        let mut wizard = at_review();
        // Bypass step validation the way a stale edit could.
        wizard.draft.set(ProfileField::SystolicBp, 300);

        let err = wizard.begin_submit().unwrap_err();
        assert!(matches!(err, WizardError::Validation(_)));
        assert_eq!(wizard.phase(), WizardPhase::Editing);
        assert_eq!(wizard.current_step(), WizardStep::Review);
        assert_eq!(wizard.first_step_with_errors(), Some(WizardStep::Vitals));
    }

    #[test]
    fn test_in_flight_submission_blocks_everything() {
        let mut wizard = at_review();
        let profile = wizard.begin_submit().unwrap();
        assert_eq!(profile, MedicalProfileInput::default());
        assert_eq!(wizard.phase(), WizardPhase::Submitting);

        assert_eq!(wizard.begin_submit().unwrap_err(), WizardError::SubmissionInFlight);
        assert_eq!(wizard.retreat().unwrap_err(), WizardError::SubmissionInFlight);
        assert_eq!(wizard.advance().unwrap_err(), WizardError::SubmissionInFlight);
        assert_eq!(
            wizard.set_field(ProfileField::Age, 50).unwrap_err(),
            WizardError::SubmissionInFlight
        );
    }

    #[test]
    fn test_failed_collaborator_allows_resubmission() {
        let mut wizard = at_review();
        let first = wizard.begin_submit().unwrap();
        wizard.abort_submit().unwrap();

        assert_eq!(wizard.phase(), WizardPhase::Editing);
        assert_eq!(wizard.current_step(), WizardStep::Review);
        assert_eq!(wizard.begin_submit().unwrap(), first);
        wizard.complete_submit().unwrap();
        assert!(wizard.is_submitted());
        assert_eq!(wizard.retreat().unwrap_err(), WizardError::AlreadySubmitted);
    }

    #[test]
    fn test_complete_without_pending_submission() {
        let mut wizard = WizardController::new();
        assert_eq!(wizard.complete_submit().unwrap_err(), WizardError::NoSubmissionPending);
        assert_eq!(wizard.abort_submit().unwrap_err(), WizardError::NoSubmissionPending);
    }

    #[test]
    fn test_form_view_follows_step() {
        let mut wizard = WizardController::new();
        wizard.set_field(ProfileField::Gender, "robot").unwrap();
        match wizard.form() {
            StepForm::BasicInformation { age, gender } => {
                assert_eq!(age.value, Some(&json!(45)));
                assert!(gender.error.unwrap().starts_with("Invalid enum value"));
            }
            other => panic!("unexpected form {other:?}"),
        }

        let wizard = at_review();
        match wizard.form() {
            StepForm::Review { summary } => {
                assert_eq!(summary.len(), 10);
                assert_eq!(summary[0].value, "45");
            }
            other => panic!("unexpected form {other:?}"),
        }
        assert!(wizard.form().inputs().is_empty());
    }

    #[test]
    fn test_wizard_error_converts_to_app_error() {
        let err: StrokeRiskError = WizardError::SubmissionInFlight.into();
        assert!(matches!(err, StrokeRiskError::InvalidState(_)));
    }
}
