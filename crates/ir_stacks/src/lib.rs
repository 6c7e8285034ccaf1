//! Declarative stack definitions for the incident-response deployment.
//!
//! Stacks are resource graphs handed to an external provisioning engine.
//! This crate owns the typed resource model, graph validation, and template
//! synthesis; it has no runtime behavior of its own.

pub mod definitions;
pub mod graph;
pub mod synth;
