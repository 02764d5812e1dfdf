//! In-memory medical profile store.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use strokerisk_core::config::MockSettings;
use strokerisk_core::profile::{MedicalProfile, MedicalProfileInput, ProfileRepository};
use strokerisk_core::{Result, StrokeRiskError};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::latency::simulate;

const PROFILE_ID: &str = "1";

/// Profile repository holding a single profile in memory.
///
/// Updates can be made to fail on demand through
/// [`fail_next_updates`](Self::fail_next_updates).
pub struct InMemoryProfileRepository {
    profile: RwLock<Option<MedicalProfile>>,
    pending_failures: AtomicUsize,
    latency: MockSettings,
}

impl InMemoryProfileRepository {
    /// Creates a repository seeded with the demo user's profile.
    pub fn new(latency: MockSettings) -> Self {
        Self::with_profile(
            Some(MedicalProfile::new(PROFILE_ID, MedicalProfileInput::default())),
            latency,
        )
    }

    /// Creates a repository for a user who has not filled in the
    /// questionnaire yet.
    pub fn empty(latency: MockSettings) -> Self {
        Self::with_profile(None, latency)
    }

    fn with_profile(profile: Option<MedicalProfile>, latency: MockSettings) -> Self {
        Self {
            profile: RwLock::new(profile),
            pending_failures: AtomicUsize::new(0),
            latency,
        }
    }

    /// Makes the next `count` updates fail with a persistence error.
    pub fn fail_next_updates(&self, count: usize) {
        self.pending_failures.store(count, Ordering::SeqCst);
    }

    fn take_failure(&self) -> bool {
        self.pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn get_profile(&self) -> Result<Option<MedicalProfile>> {
        simulate(self.latency.profile_read_latency()).await;
        let profile = self.profile.read().await.clone();
        debug!("Loaded profile: present={}", profile.is_some());
        Ok(profile)
    }

    async fn update_profile(&self, input: &MedicalProfileInput) -> Result<MedicalProfile> {
        simulate(self.latency.profile_write_latency()).await;

        if self.take_failure() {
            warn!("Profile update failed (injected)");
            return Err(StrokeRiskError::persistence("Profile service unavailable"));
        }

        let mut stored = self.profile.write().await;
        let id = stored
            .as_ref()
            .map(|p| p.id.clone())
            .unwrap_or_else(|| PROFILE_ID.to_string());
        let profile = MedicalProfile::new(id, input.clone());
        *stored = Some(profile.clone());

        info!("Profile {} updated", profile.id);
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_profile() {
        let repo = InMemoryProfileRepository::new(MockSettings::instant());
        let profile = repo.get_profile().await.unwrap().unwrap();
        assert_eq!(profile.id, "1");
        assert_eq!(profile.data.age, 45);
    }

    #[tokio::test]
    async fn test_empty_then_update() {
        let repo = InMemoryProfileRepository::empty(MockSettings::instant());
        assert!(repo.get_profile().await.unwrap().is_none());

        let input = MedicalProfileInput {
            age: 60,
            ..MedicalProfileInput::default()
        };
        let saved = repo.update_profile(&input).await.unwrap();
        assert_eq!(saved.data, input);
        assert_eq!(repo.get_profile().await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_injected_failures_are_consumed() {
        let repo = InMemoryProfileRepository::new(MockSettings::instant());
        repo.fail_next_updates(2);
        let input = MedicalProfileInput::default();

        assert!(repo.update_profile(&input).await.unwrap_err().is_retryable());
        assert!(repo.update_profile(&input).await.is_err());
        assert!(repo.update_profile(&input).await.is_ok());
    }
}
