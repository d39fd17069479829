//! Repository layer: one stateless struct per table, async fns taking an
//! explicit `&PgPool`.

pub mod archive_repo;
pub mod assignment_repo;
pub mod claim_repo;
pub mod client_repo;
pub mod customer_repo;
pub mod progress_repo;
pub mod promotion_repo;
pub mod script_repo;
pub mod settings_repo;
pub mod user_repo;

pub use archive_repo::ArchiveRepo;
pub use assignment_repo::AssignmentRepo;
pub use claim_repo::ClaimRepo;
pub use client_repo::ClientRepo;
pub use customer_repo::CustomerRepo;
pub use progress_repo::ProgressRepo;
pub use promotion_repo::PromotionRepo;
pub use script_repo::ScriptRepo;
pub use settings_repo::SettingsRepo;
pub use user_repo::UserRepo;
