//! Schema-to-form resolver.
//!
//! Translates a [`Schema`] result into the per-field error map a form state
//! manager consumes: at most one message per field, tagged as a validation
//! error. No rules live here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::validation::{Candidate, FieldErrors, Schema};

/// Category of a resolved field error. Only schema validation exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldErrorKind {
    Validation,
}

/// Error shown next to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFieldError {
    #[serde(rename = "type")]
    pub kind: FieldErrorKind,
    pub message: String,
}

impl ResolvedFieldError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: FieldErrorKind::Validation,
            message: message.into(),
        }
    }
}

/// Field name -> first error message for that field.
pub type FieldErrorMap = BTreeMap<String, ResolvedFieldError>;

/// Output of a resolver run: either coerced values or field errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<T> {
    pub values: Option<T>,
    pub errors: FieldErrorMap,
}

impl<T> Resolution<T> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<T, FieldErrorMap> {
        match self.values {
            Some(values) if self.errors.is_empty() => Ok(values),
            _ => Err(self.errors),
        }
    }
}

/// Keeps the first message recorded for each field.
pub fn first_errors(errors: &FieldErrors) -> FieldErrorMap {
    let mut map = FieldErrorMap::new();
    for error in errors.iter() {
        map.entry(error.field.clone())
            .or_insert_with(|| ResolvedFieldError::validation(error.message.clone()));
    }
    map
}

/// Adapts a schema to the form-engine contract.
#[derive(Debug, Clone, Default)]
pub struct SchemaResolver<S> {
    schema: S,
}

impl<S: Schema> SchemaResolver<S> {
    pub fn new(schema: S) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// Validates the whole candidate.
    pub fn resolve(&self, candidate: &Candidate) -> Resolution<S::Output> {
        match self.schema.validate(candidate) {
            Ok(values) => Resolution {
                values: Some(values),
                errors: FieldErrorMap::new(),
            },
            Err(errors) => Resolution {
                values: None,
                errors: first_errors(&errors),
            },
        }
    }

    /// Validates the whole candidate but reports only errors for `keys`.
    ///
    /// An empty result means every listed field is acceptable, regardless
    /// of the state of fields outside `keys`.
    pub fn resolve_fields(&self, candidate: &Candidate, keys: &[&str]) -> FieldErrorMap {
        let mut errors = self.resolve(candidate).errors;
        errors.retain(|field, _| keys.contains(&field.as_str()));
        errors
    }
}
