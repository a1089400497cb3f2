//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! wizard core and the outside world. Adapters implement these ports.
//!
//! - `SubmissionGateway` - Delivers the assembled case payload
//! - `UserProfileSource` - Supplies the practitioner's profile at start

mod submission_gateway;
mod user_profile_source;

pub use submission_gateway::SubmissionGateway;
pub use user_profile_source::{UserProfile, UserProfileSource};
