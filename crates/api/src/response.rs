//! Shared response envelope types for API handlers.
//!
//! Every success body carries `success: true` per the frontend contract.
//! Handlers with payloads define their own response structs (each with a
//! `success` field); [`Ack`] covers the bare `{ "success": true }` case.

use serde::Serialize;

/// Bare `{ "success": true }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
