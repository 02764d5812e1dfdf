//! Profile collaborator interface.

use async_trait::async_trait;

use super::model::{MedicalProfile, MedicalProfileInput};
use crate::error::Result;

/// Storage for the signed-in user's medical profile.
///
/// Implementations stand in for a remote profile API; failures surface as
/// [`crate::StrokeRiskError::Persistence`] and are safe to retry.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Returns the stored profile, or `None` when the user has not completed
    /// the questionnaire yet.
    async fn get_profile(&self) -> Result<Option<MedicalProfile>>;

    /// Replaces the stored profile with `input` and returns what was stored.
    async fn update_profile(&self, input: &MedicalProfileInput) -> Result<MedicalProfile>;
}
