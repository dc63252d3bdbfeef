//! Configuration for the Lucid client.
//!
//! Base endpoint plus an optional bearer token, fixed at construction.

use crate::error::{LucidError, Result};

/// Default Lucid endpoint when none is given.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:7090";

/// Configuration for connecting to a Lucid endpoint.
#[derive(Clone)]
pub struct LucidConfig {
    /// Lucid endpoint root (e.g. "http://localhost:7090")
    pub endpoint: String,
    /// JSON Web Token sent as `Authorization: Bearer <token>`
    pub token: Option<String>,
}

impl LucidConfig {
    /// Env var for the endpoint root
    pub const ENDPOINT_ENV: &'static str = "LUCID_ENDPOINT";
    /// Env var for the bearer token
    pub const TOKEN_ENV: &'static str = "LUCID_JWT";

    /// Create a config for the given endpoint, without a token.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
        }
    }

    /// Create config from environment variables.
    ///
    /// Optional: `LUCID_ENDPOINT` (default: http://localhost:7090)
    /// Optional: `LUCID_JWT`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = match lookup(Self::ENDPOINT_ENV) {
            Some(value) if value.trim().is_empty() => {
                return Err(LucidError::Config(format!(
                    "{} is set but empty",
                    Self::ENDPOINT_ENV
                )));
            }
            Some(value) => value,
            None => DEFAULT_ENDPOINT.to_string(),
        };

        let token = lookup(Self::TOKEN_ENV).filter(|t| !t.is_empty());

        Ok(Self { endpoint, token })
    }

    /// Set the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Whether a token was configured.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl Default for LucidConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl std::fmt::Debug for LucidConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LucidConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
