//! Intake wizard domain - field store, step graph, and controller.
//!
//! # Module Organization
//!
//! - `field_value` - The tagged union behind every form field
//! - `field_store` - FormState plus schema-aware mutation and derivation
//! - `age` - Pure age computation and the dob -> age derivation
//! - `selection` - Session-scoped choices (specialty, form type, clinic)
//! - `step` / `step_graph` - Declarative step table, gates, and transitions
//! - `payload` - Flattened submission payload
//! - `controller` - End-to-end session sequencing

mod age;
mod controller;
mod field_store;
mod field_value;
mod payload;
mod selection;
mod step;
mod step_graph;

pub use age::{compute_age, derive_age};
pub use controller::WizardController;
pub use field_store::{Derivation, FieldStore, FormState};
pub use field_value::{FieldKind, FieldValue};
pub use payload::CasePayload;
pub use selection::{FormType, Selection, Specialty};
pub use step::{FieldDecl, SelectionRequirement, Step, StepPredicate};
pub use step_graph::StepGraph;
