use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::AuthConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub iat: u64,
    pub exp: u64,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and checks the session tokens carried in the auth cookie.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<Keys>,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Result<Self> {
        if secret.is_empty() {
            anyhow::bail!("Token secret must not be empty");
        }

        Ok(Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
            ttl_secs,
        })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        Self::new(&config.jwt_secret, config.token_ttl_secs)
    }

    pub fn generate(&self, user_id: &str) -> Result<String> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let claims = Claims {
            user_id: user_id.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .context("Failed to sign session token")
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.keys.decoding, &validation)
            .context("Session token rejected")?;
        Ok(data.claims)
    }
}
