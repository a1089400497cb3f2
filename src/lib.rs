//! Case Intake - Multi-step case-intake wizard core
//!
//! This crate implements the intake wizard for dental practice management:
//! a two-tier gated step sequence (specialty and form setup, then the case
//! form itself) over a schema-aware field store with derived fields, driven
//! by a controller that assembles and submits the final case payload.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
