//! Adapters - Implementations of ports for external collaborators.

pub mod gateway;
pub mod profile;
