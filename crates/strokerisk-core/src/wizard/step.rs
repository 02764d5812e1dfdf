//! Static step configuration of the profile questionnaire.

use serde::{Deserialize, Serialize};

use crate::profile::ProfileField;

/// One stage of the five-step profile wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WizardStep {
    BasicInformation,
    Vitals,
    MedicalHistory,
    Lifestyle,
    Review,
}

/// Number of steps in the wizard.
pub const STEP_COUNT: u8 = 5;

/// Static description of a step, as shown in the step indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepDescriptor {
    pub ordinal: u8,
    pub title: &'static str,
    pub field_keys: Vec<&'static str>,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        Self::BasicInformation,
        Self::Vitals,
        Self::MedicalHistory,
        Self::Lifestyle,
        Self::Review,
    ];

    /// 1-based position of the step.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::BasicInformation => 1,
            Self::Vitals => 2,
            Self::MedicalHistory => 3,
            Self::Lifestyle => 4,
            Self::Review => 5,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.ordinal() == ordinal)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::BasicInformation => "Basic Information",
            Self::Vitals => "Vitals",
            Self::MedicalHistory => "Medical History",
            Self::Lifestyle => "Lifestyle",
            Self::Review => "Review",
        }
    }

    /// Fields collected on this step. Review collects none.
    pub fn fields(self) -> &'static [ProfileField] {
        match self {
            Self::BasicInformation => &[ProfileField::Age, ProfileField::Gender],
            Self::Vitals => &[
                ProfileField::SystolicBp,
                ProfileField::DiastolicBp,
                ProfileField::Bmi,
            ],
            Self::MedicalHistory => &[
                ProfileField::HasHypertension,
                ProfileField::HasHeartDisease,
                ProfileField::HasDiabetes,
            ],
            Self::Lifestyle => &[ProfileField::SmokingStatus, ProfileField::ActivityLevel],
            Self::Review => &[],
        }
    }

    pub fn field_keys(self) -> Vec<&'static str> {
        self.fields().iter().map(|f| f.key()).collect()
    }

    /// Step that collects `field`.
    pub fn owning(field: ProfileField) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.fields().contains(&field))
            .unwrap_or(Self::Review)
    }

    /// Next step, capped at Review.
    pub fn next(self) -> Self {
        Self::from_ordinal(self.ordinal() + 1).unwrap_or(Self::Review)
    }

    /// Previous step, floored at the first step.
    pub fn previous(self) -> Self {
        Self::from_ordinal(self.ordinal().saturating_sub(1)).unwrap_or(Self::BasicInformation)
    }

    pub fn is_first(self) -> bool {
        self == Self::BasicInformation
    }

    pub fn is_review(self) -> bool {
        self == Self::Review
    }

    pub fn descriptor(self) -> StepDescriptor {
        StepDescriptor {
            ordinal: self.ordinal(),
            title: self.title(),
            field_keys: self.field_keys(),
        }
    }
}

/// Descriptors of every step, in order.
pub fn descriptors() -> Vec<StepDescriptor> {
    WizardStep::ALL.into_iter().map(WizardStep::descriptor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_steps_partition_profile_fields() {
        let mut seen = HashSet::new();
        for step in WizardStep::ALL {
            for field in step.fields() {
                assert!(seen.insert(*field), "{field} assigned twice");
            }
        }
        assert_eq!(seen.len(), ProfileField::all().count());
        assert!(WizardStep::Review.fields().is_empty());
    }

    #[test]
    fn test_navigation_is_capped() {
        assert_eq!(WizardStep::Lifestyle.next(), WizardStep::Review);
        assert_eq!(WizardStep::Review.next(), WizardStep::Review);
        assert_eq!(WizardStep::Vitals.previous(), WizardStep::BasicInformation);
        assert_eq!(WizardStep::BasicInformation.previous(), WizardStep::BasicInformation);
    }

    #[test]
    fn test_descriptors() {
        let all = descriptors();
        assert_eq!(all.len(), STEP_COUNT as usize);
        assert_eq!(all[1].title, "Vitals");
        assert_eq!(all[1].field_keys, vec!["systolicBP", "diastolicBP", "bmi"]);
        assert_eq!(WizardStep::owning(ProfileField::HasDiabetes), WizardStep::MedicalHistory);
    }
}
