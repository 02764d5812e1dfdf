//! Medical profile domain module.
//!
//! # Module Structure
//!
//! - `model`: profile value types and the enumerations they use
//! - `field`: typed questionnaire keys with their input rules
//! - `repository`: profile collaborator trait

mod field;
mod model;
mod repository;

pub use field::{FieldKind, ProfileField};
pub use model::{ActivityLevel, Gender, MedicalProfile, MedicalProfileInput, SmokingStatus};
pub use repository::ProfileRepository;
