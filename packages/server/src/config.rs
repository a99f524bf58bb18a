use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Display name carried in every issued token.
pub const DEFAULT_TOKEN_NAME: &str = "Mario Gómez's Blog";

/// Minutes an issued token stays valid.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 300;

/// What the token service does when the caller's secret does not match the
/// configured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssuancePolicy {
    /// Refuse to issue with `Unauthorized`.
    #[default]
    Reject,
    /// Log a warning and issue anyway.
    Warn,
}

impl FromStr for IssuancePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "warn" => Ok(Self::Warn),
            other => Err(anyhow::anyhow!("Invalid token issuance policy: {}", other)),
        }
    }
}

/// How previous/next neighbors of a post are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborOrder {
    /// Adjacency in whatever order the store returned the published set.
    #[default]
    Scan,
    /// Adjacency after sorting the published set by `createDate`, oldest first.
    Chronological,
}

impl FromStr for NeighborOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scan" => Ok(Self::Scan),
            "chronological" => Ok(Self::Chronological),
            other => Err(anyhow::anyhow!("Invalid neighbor order: {}", other)),
        }
    }
}

/// Whether updating a post requires the id to already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePolicy {
    /// Updates of unknown ids fail with `NotFound`.
    #[default]
    RequireExisting,
    /// Updates of unknown ids create the record.
    Upsert,
}

impl FromStr for UpdatePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "require-existing" | "require_existing" => Ok(Self::RequireExisting),
            "upsert" => Ok(Self::Upsert),
            other => Err(anyhow::anyhow!("Invalid update policy: {}", other)),
        }
    }
}

/// Settings for issuing and validating bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Signing secret. Issuance fails while this is unset.
    pub secret: Option<String>,
    pub audience: String,
    pub issuer: String,
    pub display_name: String,
    pub ttl_minutes: i64,
    pub issuance_policy: IssuancePolicy,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, audience: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            audience: audience.into(),
            issuer: issuer.into(),
            display_name: DEFAULT_TOKEN_NAME.to_string(),
            ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
            issuance_policy: IssuancePolicy::default(),
        }
    }
}

/// Options that change how posts are read and written.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostOptions {
    pub neighbor_order: NeighborOrder,
    pub update_policy: UpdatePolicy,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres store. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub port: u16,
    pub token: TokenConfig,
    pub posts: PostOptions,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. `from_env` is the production path.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = TokenConfig {
            secret: non_empty("USER_SECRET_KEY"),
            audience: lookup("TOKEN_AUDIENCE").unwrap_or_default(),
            issuer: lookup("TOKEN_ISSUER").unwrap_or_default(),
            display_name: non_empty("TOKEN_NAME").unwrap_or_else(|| DEFAULT_TOKEN_NAME.to_string()),
            ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
            issuance_policy: non_empty("TOKEN_ISSUANCE_POLICY")
                .map(|v| v.parse::<IssuancePolicy>())
                .transpose()
                .context("TOKEN_ISSUANCE_POLICY must be 'reject' or 'warn'")?
                .unwrap_or_default(),
        };

        let posts = PostOptions {
            neighbor_order: non_empty("NEIGHBOR_ORDER")
                .map(|v| v.parse::<NeighborOrder>())
                .transpose()
                .context("NEIGHBOR_ORDER must be 'scan' or 'chronological'")?
                .unwrap_or_default(),
            update_policy: non_empty("UPDATE_POLICY")
                .map(|v| v.parse::<UpdatePolicy>())
                .transpose()
                .context("UPDATE_POLICY must be 'require-existing' or 'upsert'")?
                .unwrap_or_default(),
        };

        Ok(Self {
            database_url: non_empty("DATABASE_URL"),
            port: non_empty("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            token,
            posts,
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}
