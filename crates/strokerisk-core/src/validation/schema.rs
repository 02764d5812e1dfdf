//! Declarative acceptance rules for each input shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString};

use super::FieldErrors;
use super::rules::{self, Candidate};
use crate::profile::{ActivityLevel, Gender, MedicalProfileInput, ProfileField, SmokingStatus};

pub(crate) const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub(crate) const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub(crate) const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// A pure, side-effect-free validator for one input shape.
///
/// `validate` either returns the candidate coerced to `Output`, or every
/// violation it found.
pub trait Schema: Send + Sync {
    type Output;

    /// Keys this schema reads, in declaration order.
    fn field_keys(&self) -> Vec<&'static str>;

    fn validate(&self, candidate: &Candidate) -> Result<Self::Output, FieldErrors>;
}

/// Email/password pair for a login attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration form contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRecord {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupRecord {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoginSchema;

impl Schema for LoginSchema {
    type Output = Credentials;

    fn field_keys(&self) -> Vec<&'static str> {
        vec!["email", "password"]
    }

    fn validate(&self, candidate: &Candidate) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = rules::email(candidate, "email", &mut errors);
        let password = rules::min_chars(candidate, "password", 8, PASSWORD_TOO_SHORT, &mut errors);

        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => Ok(Credentials { email, password }),
            _ => Err(errors),
        }
    }
}

/// Login rules plus a display name and a password confirmation.
///
/// The confirmation check compares the raw password text, so it fires even
/// when the password itself is too short or the other fields are invalid.
/// `confirmPassword` carries at most one error.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignupSchema;

impl Schema for SignupSchema {
    type Output = SignupRecord;

    fn field_keys(&self) -> Vec<&'static str> {
        vec!["email", "password", "name", "confirmPassword"]
    }

    fn validate(&self, candidate: &Candidate) -> Result<SignupRecord, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = rules::email(candidate, "email", &mut errors);
        let password = rules::min_chars(candidate, "password", 8, PASSWORD_TOO_SHORT, &mut errors);
        let name = rules::min_chars(candidate, "name", 2, NAME_TOO_SHORT, &mut errors);
        let confirm_password =
            rules::string(candidate, "confirmPassword", &mut errors).map(str::to_string);

        if let Some(confirm) = confirm_password.as_deref() {
            let raw_password = candidate.get("password").and_then(Value::as_str);
            if raw_password != Some(confirm) {
                errors.push("confirmPassword", PASSWORD_MISMATCH);
            }
        }

        match (name, email, password, confirm_password) {
            (Some(name), Some(email), Some(password), Some(confirm_password))
                if errors.is_empty() =>
            {
                Ok(SignupRecord {
                    name,
                    email,
                    password,
                    confirm_password,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Medical profile rules. Numeric fields accept text or numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileSchema;

fn number(candidate: &Candidate, field: ProfileField, errors: &mut FieldErrors) -> Option<f64> {
    let rule = field.number_rule()?;
    rules::coerced_number(candidate, field.key(), rule, errors)
}

impl Schema for ProfileSchema {
    type Output = MedicalProfileInput;

    fn field_keys(&self) -> Vec<&'static str> {
        ProfileField::all().map(ProfileField::key).collect()
    }

    fn validate(&self, candidate: &Candidate) -> Result<MedicalProfileInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let age = number(candidate, ProfileField::Age, &mut errors);
        let gender = rules::one_of::<Gender>(candidate, ProfileField::Gender.key(), &mut errors);
        let systolic = number(candidate, ProfileField::SystolicBp, &mut errors);
        let diastolic = number(candidate, ProfileField::DiastolicBp, &mut errors);
        let bmi = number(candidate, ProfileField::Bmi, &mut errors);
        let hypertension = rules::flag(candidate, ProfileField::HasHypertension.key(), &mut errors);
        let heart_disease = rules::flag(candidate, ProfileField::HasHeartDisease.key(), &mut errors);
        let diabetes = rules::flag(candidate, ProfileField::HasDiabetes.key(), &mut errors);
        let smoking =
            rules::one_of::<SmokingStatus>(candidate, ProfileField::SmokingStatus.key(), &mut errors);
        let activity =
            rules::one_of::<ActivityLevel>(candidate, ProfileField::ActivityLevel.key(), &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        // Ranges were checked above, so the narrowing casts cannot truncate.
        match (
            age,
            gender,
            systolic,
            diastolic,
            bmi,
            hypertension,
            heart_disease,
            diabetes,
            smoking,
            activity,
        ) {
            (
                Some(age),
                Some(gender),
                Some(systolic),
                Some(diastolic),
                Some(bmi),
                Some(has_hypertension),
                Some(has_heart_disease),
                Some(has_diabetes),
                Some(smoking_status),
                Some(activity_level),
            ) => Ok(MedicalProfileInput {
                age: age as u8,
                gender,
                systolic_bp: systolic as u16,
                diastolic_bp: diastolic as u16,
                bmi,
                has_hypertension,
                has_heart_disease,
                has_diabetes,
                smoking_status,
                activity_level,
            }),
            _ => Err(errors),
        }
    }
}

/// The input shapes known to the schema set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Shape {
    Login,
    Signup,
    Profile,
}

/// Coerced output of [`validate`], one variant per [`Shape`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedValue {
    Credentials(Credentials),
    Signup(SignupRecord),
    Profile(MedicalProfileInput),
}

/// Validates `candidate` against the schema registered for `shape`.
pub fn validate(shape: Shape, candidate: &Candidate) -> Result<ParsedValue, FieldErrors> {
    match shape {
        Shape::Login => LoginSchema.validate(candidate).map(ParsedValue::Credentials),
        Shape::Signup => SignupSchema.validate(candidate).map(ParsedValue::Signup),
        Shape::Profile => ProfileSchema.validate(candidate).map(ParsedValue::Profile),
    }
}
