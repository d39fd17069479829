//! Row structs and DTOs for every table.
//!
//! Row structs derive `sqlx::FromRow` (column mapping follows the snake_case
//! field names) and `Serialize` with camelCase renames, because the frontend
//! contract uses camelCase field names on the wire.

pub mod archive;
pub mod assignment;
pub mod claim;
pub mod client;
pub mod customer;
pub mod progress;
pub mod promotion;
pub mod script;
pub mod setting;
pub mod user;
