// Main entry point for the blog API server

use std::sync::Arc;

use anyhow::{Context, Result};
use blog_core::kernel::{BasePostStore, BlogDeps, InMemoryPostStore, PgPostStore};
use blog_core::{server::build_app, Config};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,blog_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting blog API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        neighbor_order = ?config.posts.neighbor_order,
        update_policy = ?config.posts.update_policy,
        issuance_policy = ?config.token.issuance_policy,
        "Configuration loaded"
    );
    if config.token.secret.is_none() {
        tracing::warn!("USER_SECRET_KEY is not set; token issuance will fail");
    }

    // Connect to the post store
    let store: Arc<dyn BasePostStore> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connected");

            let store = PgPostStore::new(pool);
            tracing::info!("Running database migrations...");
            store.migrate().await?;
            tracing::info!("Migrations complete");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; posts are kept in memory");
            Arc::new(InMemoryPostStore::new())
        }
    };

    // Build application
    let deps = BlogDeps::new(store, &config.token, config.posts);
    let app = build_app(deps, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
