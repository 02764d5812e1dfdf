//! Profile questionnaire wizard.
//!
//! # Module Structure
//!
//! - `step`: the five static steps and their fields
//! - `draft`: raw answers collected so far
//! - `form_view`: per-step tagged view for renderers
//! - `controller`: the state machine driving one session

mod controller;
mod draft;
mod form_view;
mod step;

pub use controller::{WizardController, WizardError, WizardPhase};
pub use draft::ProfileDraft;
pub use form_view::{FieldInput, ReviewLine, StepForm, review_summary};
pub use step::{STEP_COUNT, StepDescriptor, WizardStep, descriptors};
