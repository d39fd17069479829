//! Shared types and error taxonomy for the DialDesk backend.

pub mod error;
pub mod types;
