//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, positions, errors)
//! - `intake` - The case-intake wizard core (field store, step graph, controller)

pub mod foundation;
pub mod intake;
