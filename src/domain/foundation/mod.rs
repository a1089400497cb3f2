//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, position vocabulary, and error types
//! that form the vocabulary of the case-intake domain.

mod errors;
mod ids;
mod position;
mod timestamp;

pub use errors::{ErrorCode, WizardError};
pub use ids::{CaseSessionId, UserId};
pub use position::{Tier, WizardPosition};
pub use timestamp::Timestamp;
