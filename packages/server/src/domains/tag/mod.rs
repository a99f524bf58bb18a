pub mod actions;
pub mod models;

// Re-export commonly used types
pub use actions::{aggregate_tags, count_tags};
pub use models::Tags;
