//! Test harness with testcontainers for Postgres store tests.
//!
//! One container is started for the whole run and migrated once. Tests share
//! the table, so each test scopes its data with its own unique tag.

use anyhow::{Context, Result};
use blog_core::kernel::PgPostStore;
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;
        PgPostStore::new(pool).migrate().await?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Postgres-backed store for one test
pub struct PgHarness {
    pub store: PgPostStore,
    /// Unique tag to scope this test's records
    pub scope: String,
}

impl AsyncTestContext for PgHarness {
    async fn setup() -> Self {
        let infra = SharedTestInfra::get().await;
        let pool = PgPool::connect(&infra.db_url)
            .await
            .expect("Failed to connect to test database");

        Self {
            store: PgPostStore::new(pool),
            scope: format!("scope-{}", uuid::Uuid::new_v4().simple()),
        }
    }

    async fn teardown(self) {
        // Pool is dropped with the harness
    }
}
