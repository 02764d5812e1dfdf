//! Authentication collaborator interface.

mod service;

pub use service::{AuthService, FederatedProvider};
