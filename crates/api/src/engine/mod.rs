//! Task orchestrator.
//!
//! Composes the reconciliation engine and progress service against the
//! repositories. Every operation that mutates more than one row runs inside
//! a single transaction: either all of its writes commit or none do.

pub mod annotations;
pub mod tasks;
