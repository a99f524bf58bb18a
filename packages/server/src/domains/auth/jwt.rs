use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::common::{BlogError, Result};
use crate::config::{IssuancePolicy, TokenConfig};

pub const BEARER_PREFIX: &str = "Bearer ";

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub name: String, // Fixed display name
    pub exp: i64,     // Expiration timestamp
    #[serde(default)]
    pub aud: String, // Audience
    #[serde(default)]
    pub iss: String, // Issuer
}

struct SigningKeys {
    secret: String,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Token Service - issues and validates the bearer tokens that gate writes
///
/// Tokens are HS256 JWTs signed with the configured user secret. Issuance
/// fails while no secret is configured; validation then rejects everything.
pub struct TokenService {
    keys: Option<SigningKeys>,
    audience: String,
    issuer: String,
    display_name: String,
    ttl: Duration,
    policy: IssuancePolicy,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            keys: config.secret.as_deref().map(|secret| SigningKeys {
                secret: secret.to_string(),
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
            audience: config.audience.clone(),
            issuer: config.issuer.clone(),
            display_name: config.display_name.clone(),
            ttl: Duration::minutes(config.ttl_minutes),
            policy: config.issuance_policy,
        }
    }

    /// Issue a token for a caller presenting `candidate_secret`.
    ///
    /// A mismatching secret is refused under [`IssuancePolicy::Reject`] and
    /// only logged under [`IssuancePolicy::Warn`].
    pub fn issue(&self, candidate_secret: &str) -> Result<String> {
        self.issue_at(candidate_secret, Utc::now())
    }

    /// Same as [`issue`](Self::issue) with an explicit issuance instant.
    pub fn issue_at(&self, candidate_secret: &str, now: DateTime<Utc>) -> Result<String> {
        let keys = self.keys.as_ref().ok_or_else(|| {
            warn!("Token requested but the user secret is not configured");
            BlogError::Config("user secret is not configured".to_string())
        })?;

        if candidate_secret != keys.secret {
            match self.policy {
                IssuancePolicy::Reject => {
                    warn!("Token refused: user secret is invalid");
                    return Err(BlogError::Unauthorized);
                }
                IssuancePolicy::Warn => warn!("User secret is either expired or invalid; issuing anyway"),
            }
        }

        let claims = Claims {
            name: self.display_name.clone(),
            exp: (now + self.ttl).timestamp(),
            aud: self.audience.clone(),
            iss: self.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).map_err(Into::into)
    }

    /// Check an `Authorization` header value.
    ///
    /// `Ok(false)` for an empty header, a header without the `Bearer ` prefix
    /// or an audience mismatch. Bad signatures, expired tokens and garbage are
    /// reported as `Err`, which callers treat as invalid too.
    pub fn validate(&self, bearer_header: &str) -> Result<bool> {
        let Some(token) = bearer_header.strip_prefix(BEARER_PREFIX) else {
            return Ok(false);
        };
        let keys = self
            .keys
            .as_ref()
            .ok_or_else(|| BlogError::Config("user secret is not configured".to_string()))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(token, &keys.decoding, &validation)?.claims;

        if claims.aud != self.audience {
            debug!(audience = %claims.aud, "Token audience mismatch");
            return Ok(false);
        }
        Ok(true)
    }

    /// [`validate`](Self::validate) collapsed to a yes/no answer.
    pub fn is_valid(&self, bearer_header: &str) -> bool {
        match self.validate(bearer_header) {
            Ok(valid) => valid,
            Err(e) => {
                debug!(error = %e, "Token rejected");
                false
            }
        }
    }
}
