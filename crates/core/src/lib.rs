//! LabelKit domain logic.
//!
//! Pure task/annotation reconciliation, default keybind assignment,
//! progress computation, and input validation. The only I/O in this crate
//! is the directory scanner; everything else operates on in-memory values
//! and emits the store mutations to perform.

pub mod error;
pub mod keybinds;
pub mod progress;
pub mod reconcile;
pub mod scanner;
pub mod types;
pub mod validation;
