//! HTTP handlers, grouped by resource.

pub mod annotations;
pub mod system;
pub mod tasks;
pub mod users;
