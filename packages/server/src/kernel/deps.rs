//! Blog dependencies (using traits for testability)
//!
//! The one container every route handler reaches the store, token service and
//! post options through. Built once at startup and shared read-only.

use std::sync::Arc;

use crate::config::{PostOptions, TokenConfig};
use crate::domains::auth::TokenService;
use crate::kernel::{BasePostStore, InMemoryPostStore};

#[derive(Clone)]
pub struct BlogDeps {
    pub store: Arc<dyn BasePostStore>,
    pub tokens: Arc<TokenService>,
    pub posts: PostOptions,
}

impl BlogDeps {
    pub fn new(store: Arc<dyn BasePostStore>, token_config: &TokenConfig, posts: PostOptions) -> Self {
        Self {
            store,
            tokens: Arc::new(TokenService::new(token_config)),
            posts,
        }
    }

    /// Dependencies backed by an in-memory store, handy for tests and local runs.
    pub fn in_memory(store: Arc<InMemoryPostStore>, token_config: &TokenConfig) -> Self {
        Self::new(store, token_config, PostOptions::default())
    }

    pub fn with_post_options(mut self, posts: PostOptions) -> Self {
        self.posts = posts;
        self
    }
}
