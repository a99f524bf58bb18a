// Business domains
pub mod auth;
pub mod posts;
pub mod tag;
