use dialdesk_core::error::CoreError;
use dialdesk_db::models::assignment::AllocationFilter;
use dialdesk_db::repositories::assignment_repo::MAX_ALLOCATION;

use crate::error::{AppError, AppResult};

pub mod archive;
pub mod assignments;
pub mod auth;
pub mod claims;
pub mod clients;
pub mod customers;
pub mod email;
pub mod health;
pub mod progress;
pub mod promotions;
pub mod scripts;
pub mod settings;
pub mod users;

/// Reject filter counts above the allocation ceiling.
///
/// The repository clamps as a backstop; rejecting here keeps the truncation
/// from being silent.
pub(crate) fn validate_count(filters: Option<&AllocationFilter>) -> AppResult<()> {
    if let Some(count) = filters.and_then(|f| f.count) {
        if count > MAX_ALLOCATION {
            return Err(AppError::Core(CoreError::Validation(format!(
                "count must not exceed {MAX_ALLOCATION}"
            ))));
        }
    }
    Ok(())
}
