//! Wizard position vocabulary shared across the domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two tiers of the intake wizard.
///
/// The `Main` tier covers the session-scoped choices (specialty, then form
/// type and clinic). The `FormDetail` tier covers the case form itself and is
/// only reachable once the last Main-tier gate has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Main,
    FormDetail,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Main => "Main",
            Tier::FormDetail => "FormDetail",
        };
        write!(f, "{}", s)
    }
}

/// Current location in the wizard: a tier plus a 0-based step index.
///
/// # Invariants
///
/// - Only the `WizardController` writes positions.
/// - `FormDetail` is entered exclusively through the last `Main` step, and
///   left backwards exclusively from index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WizardPosition {
    pub tier: Tier,
    pub index: usize,
}

impl WizardPosition {
    /// Creates a position at the given tier and index.
    pub const fn new(tier: Tier, index: usize) -> Self {
        Self { tier, index }
    }

    /// The position every session starts at.
    pub const fn initial() -> Self {
        Self::new(Tier::Main, 0)
    }

    /// Returns true if this is the very first step of the wizard.
    pub fn is_initial(&self) -> bool {
        *self == Self::initial()
    }
}

impl fmt::Display for WizardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.tier, self.index)
    }
}
