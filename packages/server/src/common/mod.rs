// Common types and utilities shared across the application

pub mod errors;
pub mod id;

pub use errors::{BlogError, Result};
pub use id::generate_post_id;
