//! Static user profile source.
//!
//! Serves profiles from an in-memory map with a fallback, for tests and for
//! deployments where the identity provider already hands the profile to the
//! embedding layer.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{UserId, WizardError};
use crate::ports::{UserProfile, UserProfileSource};

/// Profile source backed by a fixed map.
#[derive(Default)]
pub struct StaticProfileSource {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
    fallback: UserProfile,
}

impl StaticProfileSource {
    /// A source that answers every lookup with an empty profile.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A source that answers every unknown lookup with `fallback`.
    pub fn with_fallback(fallback: UserProfile) -> Self {
        Self {
            profiles: Mutex::new(HashMap::new()),
            fallback,
        }
    }

    /// Registers a profile for a specific user.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test-oriented adapter).
    pub fn insert(&self, user_id: UserId, profile: UserProfile) {
        self.profiles
            .lock()
            .expect("StaticProfileSource: profiles lock poisoned")
            .insert(user_id, profile);
    }
}

#[async_trait]
impl UserProfileSource for StaticProfileSource {
    async fn profile(&self, user_id: &UserId) -> Result<UserProfile, WizardError> {
        let known = self
            .profiles
            .lock()
            .expect("StaticProfileSource: profiles lock poisoned")
            .get(user_id)
            .cloned();
        Ok(known.unwrap_or_else(|| self.fallback.clone()))
    }
}
