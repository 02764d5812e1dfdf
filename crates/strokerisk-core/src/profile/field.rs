//! Typed keys for the medical profile questionnaire.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use super::model::{ActivityLevel, Gender, SmokingStatus};
use crate::validation::NumberRule;

/// One question of the medical profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter)]
pub enum ProfileField {
    Age,
    Gender,
    SystolicBp,
    DiastolicBp,
    Bmi,
    HasHypertension,
    HasHeartDisease,
    HasDiabetes,
    SmokingStatus,
    ActivityLevel,
}

/// Input shape of a field, used by the schema and by renderers.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Number(NumberRule),
    Choice(Vec<&'static str>),
    Flag,
}

fn options<T: IntoEnumIterator + Into<&'static str>>() -> Vec<&'static str> {
    T::iter().map(Into::into).collect()
}

impl ProfileField {
    /// Form key of the field.
    pub fn key(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Gender => "gender",
            Self::SystolicBp => "systolicBP",
            Self::DiastolicBp => "diastolicBP",
            Self::Bmi => "bmi",
            Self::HasHypertension => "hasHypertension",
            Self::HasHeartDisease => "hasHeartDisease",
            Self::HasDiabetes => "hasDiabetes",
            Self::SmokingStatus => "smokingStatus",
            Self::ActivityLevel => "activityLevel",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::SystolicBp => "Systolic BP (mmHg)",
            Self::DiastolicBp => "Diastolic BP (mmHg)",
            Self::Bmi => "BMI",
            Self::HasHypertension => "Diagnosed hypertension",
            Self::HasHeartDisease => "Diagnosed heart disease",
            Self::HasDiabetes => "Diagnosed diabetes",
            Self::SmokingStatus => "Smoking status",
            Self::ActivityLevel => "Activity level",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Age => FieldKind::Number(NumberRule::integer(18.0, 120.0)),
            Self::SystolicBp => FieldKind::Number(NumberRule::integer(70.0, 250.0)),
            Self::DiastolicBp => FieldKind::Number(NumberRule::integer(40.0, 150.0)),
            Self::Bmi => FieldKind::Number(NumberRule::decimal(10.0, 60.0)),
            Self::Gender => FieldKind::Choice(options::<Gender>()),
            Self::SmokingStatus => FieldKind::Choice(options::<SmokingStatus>()),
            Self::ActivityLevel => FieldKind::Choice(options::<ActivityLevel>()),
            Self::HasHypertension | Self::HasHeartDisease | Self::HasDiabetes => FieldKind::Flag,
        }
    }

    /// Numeric rule of the field; `None` for non-numeric fields.
    pub fn number_rule(self) -> Option<NumberRule> {
        match self.kind() {
            FieldKind::Number(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::iter().find(|f| f.key() == key)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for field in ProfileField::all() {
            assert_eq!(ProfileField::from_key(field.key()), Some(field));
        }
        assert_eq!(ProfileField::from_key("weight"), None);
    }

    #[test]
    fn test_choice_options_follow_enums() {
        assert_eq!(
            ProfileField::Gender.kind(),
            FieldKind::Choice(vec!["male", "female", "other"])
        );
        assert_eq!(
            ProfileField::ActivityLevel.kind(),
            FieldKind::Choice(vec!["sedentary", "moderate", "active"])
        );
    }

    #[test]
    fn test_number_rules() {
        let age = ProfileField::Age.number_rule().unwrap();
        assert_eq!((age.min, age.max, age.integer), (18.0, 120.0, true));
        assert!(!ProfileField::Bmi.number_rule().unwrap().integer);
        assert!(ProfileField::HasDiabetes.number_rule().is_none());
    }
}
