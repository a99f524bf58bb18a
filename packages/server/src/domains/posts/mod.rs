pub mod actions;
pub mod models;

// Re-export models (domain models)
pub use models::post::{Card, Info, Post};

// Re-export actions
pub use actions::{get_by_id, list_by_tag, list_drafts, list_published, save_post};
