//! Form resolver adapter.

mod resolver;

pub use resolver::{
    FieldErrorKind, FieldErrorMap, Resolution, ResolvedFieldError, SchemaResolver, first_errors,
};
