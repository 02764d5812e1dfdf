//! Validation schema set.
//!
//! Pure acceptance rules for the login, signup and medical profile forms.
//! Candidates are untyped JSON objects; successful validation yields typed,
//! coerced values.

mod field_error;
pub mod rules;
mod schema;

pub use field_error::{FieldError, FieldErrors};
pub use rules::{Candidate, NumberRule, coerce_number, is_valid_email};
pub use schema::{
    Credentials, LoginSchema, ParsedValue, ProfileSchema, Schema, Shape, SignupRecord,
    SignupSchema, validate,
};
