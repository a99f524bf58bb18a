// Blog API - Core
//
// Serves a small blog's posts and tags over HTTP. Reads go through a
// scan-with-filter store adapter; writes are gated by short-lived bearer tokens.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
