//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Plain `{ "message": ... }` acknowledgement for mutating operations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
