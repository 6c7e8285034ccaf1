//! Domain logic for the unauthorized-access responder.
//!
//! Pure types and decisions only: the audit-event contract, the three-way
//! access classification, configuration loading, and the error taxonomy.
//! Service adapters and Lambda wiring live in `ir_responder_lambda`.

pub mod config;
pub mod contract;
pub mod decision;
pub mod error;
