//! Per-step view of the wizard, one variant per step.
//!
//! Renderers match on [`StepForm`] instead of looking fields up by name.

use serde_json::Value;

use super::draft::ProfileDraft;
use super::step::WizardStep;
use crate::form::FieldErrorMap;
use crate::profile::ProfileField;

/// Current answer and visible error for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInput<'a> {
    pub field: ProfileField,
    pub value: Option<&'a Value>,
    pub error: Option<&'a str>,
}

/// One line of the review summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewLine {
    pub field: ProfileField,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepForm<'a> {
    BasicInformation {
        age: FieldInput<'a>,
        gender: FieldInput<'a>,
    },
    Vitals {
        systolic_bp: FieldInput<'a>,
        diastolic_bp: FieldInput<'a>,
        bmi: FieldInput<'a>,
    },
    MedicalHistory {
        has_hypertension: FieldInput<'a>,
        has_heart_disease: FieldInput<'a>,
        has_diabetes: FieldInput<'a>,
    },
    Lifestyle {
        smoking_status: FieldInput<'a>,
        activity_level: FieldInput<'a>,
    },
    Review {
        summary: Vec<ReviewLine>,
    },
}

impl<'a> StepForm<'a> {
    pub(crate) fn build(step: WizardStep, draft: &'a ProfileDraft, errors: &'a FieldErrorMap) -> Self {
        let input = move |field: ProfileField| FieldInput {
            field,
            value: draft.get(field),
            error: errors.get(field.key()).map(|e| e.message.as_str()),
        };

        match step {
            WizardStep::BasicInformation => Self::BasicInformation {
                age: input(ProfileField::Age),
                gender: input(ProfileField::Gender),
            },
            WizardStep::Vitals => Self::Vitals {
                systolic_bp: input(ProfileField::SystolicBp),
                diastolic_bp: input(ProfileField::DiastolicBp),
                bmi: input(ProfileField::Bmi),
            },
            WizardStep::MedicalHistory => Self::MedicalHistory {
                has_hypertension: input(ProfileField::HasHypertension),
                has_heart_disease: input(ProfileField::HasHeartDisease),
                has_diabetes: input(ProfileField::HasDiabetes),
            },
            WizardStep::Lifestyle => Self::Lifestyle {
                smoking_status: input(ProfileField::SmokingStatus),
                activity_level: input(ProfileField::ActivityLevel),
            },
            WizardStep::Review => Self::Review {
                summary: review_summary(draft),
            },
        }
    }

    /// Editable inputs of the step, in display order. Empty for Review.
    pub fn inputs(&self) -> Vec<&FieldInput<'a>> {
        match self {
            Self::BasicInformation { age, gender } => vec![age, gender],
            Self::Vitals {
                systolic_bp,
                diastolic_bp,
                bmi,
            } => vec![systolic_bp, diastolic_bp, bmi],
            Self::MedicalHistory {
                has_hypertension,
                has_heart_disease,
                has_diabetes,
            } => vec![has_hypertension, has_heart_disease, has_diabetes],
            Self::Lifestyle {
                smoking_status,
                activity_level,
            } => vec![smoking_status, activity_level],
            Self::Review { .. } => Vec::new(),
        }
    }
}

/// Every answer of the draft, labelled, in questionnaire order.
pub fn review_summary(draft: &ProfileDraft) -> Vec<ReviewLine> {
    ProfileField::all()
        .map(|field| ReviewLine {
            field,
            label: field.label(),
            value: draft.display(field),
        })
        .collect()
}
