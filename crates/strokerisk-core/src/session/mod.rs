//! Session domain module.
//!
//! - `model`: externally reported session state (`SessionState`, `AuthUser`)
//! - `gate`: the three-state access gate for protected views

mod gate;
mod model;

pub use gate::{DEFAULT_SIGN_IN_ROUTE, GateDecision, Gated, SessionGate};
pub use model::{AuthUser, SessionState};
