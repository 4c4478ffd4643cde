//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize`/plain create DTOs for inserts

pub mod annotation;
pub mod label_keybind;
pub mod task;
pub mod user;
