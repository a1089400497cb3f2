//! Application layer - async orchestration over the domain core.
//!
//! Coordinates the synchronous wizard controller with the async ports and
//! exposes the intent/state contract the rendering layer consumes.

mod intake_service;

pub use intake_service::{IntakeService, WizardView};
