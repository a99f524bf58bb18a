//! Posts domain actions - entry-point business logic
//!
//! Called directly from the HTTP routes. Actions take raw input, talk to the
//! store through `BlogDeps`, and return domain models.

pub mod queries;
pub mod save_post;

pub use queries::*;
pub use save_post::save_post;
