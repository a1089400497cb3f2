//! UserProfileSource port - read-only access to the practitioner's profile.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{UserId, WizardError};

/// The slice of the user profile the wizard consumes at `start`.
///
/// `specialty` is a free-form label from the identity provider (mapped to a
/// supported value by the domain); `clinics` is the list of clinics the user
/// may open cases for. An empty list means "no restriction known".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub clinics: Vec<String>,
}

/// Port supplying user profiles at wizard start. Consumed read-only.
#[async_trait]
pub trait UserProfileSource: Send + Sync {
    /// Fetches the profile for a user.
    ///
    /// # Errors
    ///
    /// - `Infrastructure` if the profile backend is unavailable
    async fn profile(&self, user_id: &UserId) -> Result<UserProfile, WizardError>;
}
