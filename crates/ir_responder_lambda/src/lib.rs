//! AWS-oriented adapters and handlers for the unauthorized-access responder.
//!
//! This crate owns runtime integration details (the Lambda handler, identity
//! directory and notification adapters) and leans on `ir_responder_core` for
//! the event contract, classification, and error taxonomy.

pub mod adapters;
pub mod handlers;
