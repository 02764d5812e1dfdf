//! Medical profile domain model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SmokingStatus {
    Never,
    Former,
    Current,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Active,
}

/// A fully validated medical profile, as accepted by the profile schema.
///
/// Field names serialize to the form keys (`systolicBP`, `hasDiabetes`, ...)
/// so a value can be turned back into a candidate and re-validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalProfileInput {
    pub age: u8,
    pub gender: Gender,
    #[serde(rename = "systolicBP")]
    pub systolic_bp: u16,
    #[serde(rename = "diastolicBP")]
    pub diastolic_bp: u16,
    pub bmi: f64,
    pub has_hypertension: bool,
    pub has_heart_disease: bool,
    pub has_diabetes: bool,
    pub smoking_status: SmokingStatus,
    pub activity_level: ActivityLevel,
}

impl Default for MedicalProfileInput {
    /// The values a fresh questionnaire starts from.
    fn default() -> Self {
        Self {
            age: 45,
            gender: Gender::Male,
            systolic_bp: 120,
            diastolic_bp: 80,
            bmi: 24.0,
            has_hypertension: false,
            has_heart_disease: false,
            has_diabetes: false,
            smoking_status: SmokingStatus::Never,
            activity_level: ActivityLevel::Moderate,
        }
    }
}

/// A profile as returned by the profile collaborator after a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalProfile {
    pub id: String,
    #[serde(flatten)]
    pub data: MedicalProfileInput,
}

impl MedicalProfile {
    pub fn new(id: impl Into<String>, data: MedicalProfileInput) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}
