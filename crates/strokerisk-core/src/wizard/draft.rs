//! Mutable, partially valid profile answers collected by the wizard.

use serde_json::Value;

use crate::profile::{MedicalProfileInput, ProfileField};
use crate::validation::Candidate;

/// Raw answers keyed by profile field.
///
/// Values are kept exactly as entered (text or typed JSON); nothing is
/// coerced until the schema runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    values: Candidate,
}

impl ProfileDraft {
    /// An empty draft; every required answer is missing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A draft pre-filled with the questionnaire defaults.
    pub fn with_defaults() -> Self {
        Self::from_profile(&MedicalProfileInput::default())
    }

    /// A draft seeded from an existing profile, for an edit session.
    pub fn from_profile(profile: &MedicalProfileInput) -> Self {
        let values = match serde_json::to_value(profile) {
            Ok(Value::Object(map)) => map,
            _ => Candidate::new(),
        };
        Self { values }
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<Value>) {
        self.values.insert(field.key().to_string(), value.into());
    }

    pub fn clear(&mut self, field: ProfileField) {
        self.values.remove(field.key());
    }

    pub fn get(&self, field: ProfileField) -> Option<&Value> {
        self.values.get(field.key())
    }

    /// Display text of an answer, empty when unanswered.
    pub fn display(&self, field: ProfileField) -> String {
        match self.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(true)) => "yes".to_string(),
            Some(Value::Bool(false)) => "no".to_string(),
            Some(other) => other.to_string(),
        }
    }

    pub fn as_candidate(&self) -> &Candidate {
        &self.values
    }
}
