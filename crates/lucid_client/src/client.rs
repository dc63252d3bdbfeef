//! Lucid client — endpoint handshake plus authenticated key-value calls.

use std::sync::{Arc, OnceLock};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::LucidConfig;
use crate::endpoints::Endpoints;
use crate::error::{LucidError, Result};
use crate::types::{
    error_message, parse_method, validate_shape, AtomicInitState, Headers, InitState, Payload,
};

/// Prefix of the body served by `{ui}/version`.
pub const VERSION_PREFIX: &str = "Lucid Version ";

/// State shared between clones of a client.
#[derive(Debug)]
struct Shared {
    state: AtomicInitState,
    version: OnceLock<String>,
}

/// Client for a Lucid key-value endpoint.
///
/// Construct it, call [`LucidClient::init`] once, then use the key
/// operations. Clones share the initialization state.
#[derive(Clone, Debug)]
pub struct LucidClient {
    config: LucidConfig,
    endpoints: Endpoints,
    http: Client,
    shared: Arc<Shared>,
}

/// Resets `Initializing` back to `Uninitialized` unless disarmed.
struct InitGuard<'a> {
    state: &'a AtomicInitState,
    armed: bool,
}

impl Drop for InitGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state
                .transition(InitState::Initializing, InitState::Uninitialized);
        }
    }
}

impl LucidClient {
    /// Create a client. No network activity happens here.
    pub fn new(config: LucidConfig) -> Self {
        Self::with_http_client(config, Client::new())
    }

    /// Create a client on top of a caller-built `reqwest::Client`
    /// (e.g. one configured with a timeout).
    pub fn with_http_client(config: LucidConfig, http: Client) -> Self {
        let endpoints = Endpoints::new(config.endpoint.clone());
        Self {
            config,
            endpoints,
            http,
            shared: Arc::new(Shared {
                state: AtomicInitState::new(),
                version: OnceLock::new(),
            }),
        }
    }

    /// Create a client from `LUCID_ENDPOINT` / `LUCID_JWT`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(LucidConfig::from_env()?))
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &LucidConfig {
        &self.config
    }

    /// Sub-endpoints derived from the configured root
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Lucid endpoint
    pub fn endpoint(&self) -> &str {
        self.endpoints.base()
    }

    /// Lucid API endpoint
    pub fn api_endpoint(&self) -> &str {
        self.endpoints.api()
    }

    /// Lucid KV endpoint
    pub fn kv_endpoint(&self) -> &str {
        self.endpoints.kv()
    }

    /// Lucid UI endpoint
    pub fn ui_endpoint(&self) -> &str {
        self.endpoints.ui()
    }

    /// Version reported by the endpoint; empty until `init()` succeeds.
    pub fn endpoint_version(&self) -> &str {
        self.shared.version.get().map(String::as_str).unwrap_or("")
    }

    /// Current lifecycle state
    pub fn state(&self) -> InitState {
        self.shared.state.load()
    }

    /// Whether `init()` has succeeded
    pub fn is_initialized(&self) -> bool {
        self.state() == InitState::Ready
    }

    /// Initialize the client.
    ///
    /// Checks the endpoint answers like a Lucid server and reads its version,
    /// then validates the token if one was configured. Only one call can ever
    /// succeed; concurrent or repeated calls get `AlreadyInitialized`.
    /// A failed handshake leaves the client uninitialized.
    ///
    /// Returns the endpoint version.
    pub async fn init(&self) -> Result<String> {
        if !self
            .shared
            .state
            .transition(InitState::Uninitialized, InitState::Initializing)
        {
            return Err(LucidError::AlreadyInitialized);
        }
        let mut guard = InitGuard {
            state: &self.shared.state,
            armed: true,
        };

        let version = self.probe_version().await?;

        if let Some(token) = &self.config.token {
            self.check_token(token).await?;
        }

        let version = self.shared.version.get_or_init(|| version).clone();
        guard.armed = false;
        self.shared
            .state
            .transition(InitState::Initializing, InitState::Ready);

        info!(endpoint = %self.endpoints.base(), version = %version, "Lucid client initialized");
        Ok(version)
    }

    async fn probe_version(&self) -> Result<String> {
        let url = self.endpoints.version_url();
        debug!(url = %url, "Probing Lucid version");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LucidError::InvalidEndpoint);
        }

        let body = response.text().await?;
        body.strip_prefix(VERSION_PREFIX)
            .map(str::to_string)
            .ok_or(LucidError::InvalidEndpoint)
    }

    async fn check_token(&self, token: &str) -> Result<()> {
        let url = self.endpoints.check_token_url();
        debug!(url = %url, "Checking Lucid token");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, bearer(token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Body read is best-effort; an unreadable body falls back to the reason phrase.
            let body = response.text().await.unwrap_or_default();
            return Err(LucidError::AuthCheckFailed {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }
        Ok(())
    }

    /// Call the Lucid key-value API.
    ///
    /// `method` is matched case-insensitively. GET, DELETE and HEAD must not
    /// carry a body; PUT must. An empty payload counts as no body. Caller
    /// headers are sent as-is except `Authorization`, which is always the
    /// configured bearer token.
    ///
    /// Returns the raw response on a 2xx status.
    pub async fn api_call(
        &self,
        key: &str,
        method: &str,
        body: Option<Payload>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        if !self.is_initialized() {
            return Err(LucidError::NotInitialized);
        }
        let token = self.config.token.as_deref().ok_or(LucidError::NotLoggedIn)?;

        let method = parse_method(method)?;
        validate_shape(&method, body.as_ref())?;

        let mut merged = Headers::new();
        if let Some(custom) = headers {
            merged.merge_with(custom);
        }
        merged.insert(AUTHORIZATION.as_str(), bearer(token));

        let url = self.endpoints.key_url(key);
        debug!(method = %method, url = %url, "Lucid request");

        let mut request = self
            .http
            .request(method, &url)
            .headers(merged.to_reqwest_headers()?);
        if let Some(body) = body.filter(|b| !b.is_empty()) {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            // Body read is best-effort; an unreadable body falls back to the reason phrase.
            let text = response.text().await.unwrap_or_default();
            return Err(LucidError::RemoteError {
                status: status.as_u16(),
                message: error_message(status, &text),
            });
        }
        Ok(response)
    }

    /// Retrieve the content associated with a key.
    pub async fn get_key(&self, key: &str) -> Result<Response> {
        self.api_call(key, Method::GET.as_str(), None, None).await
    }

    /// Delete a key-value pair.
    pub async fn delete_key(&self, key: &str) -> Result<Response> {
        self.api_call(key, Method::DELETE.as_str(), None, None).await
    }

    /// Check a key-value pair exists.
    pub async fn exists_key(&self, key: &str) -> Result<Response> {
        self.api_call(key, Method::HEAD.as_str(), None, None).await
    }

    /// Store any data in a key-value pair.
    pub async fn store_key_data_any(&self, key: &str, data: impl Into<Payload>) -> Result<Response> {
        self.api_call(key, Method::PUT.as_str(), Some(data.into()), None)
            .await
    }

    /// Store a value as JSON in a key-value pair.
    pub async fn store_key_data_json<T>(&self, key: &str, obj: &T) -> Result<Response>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(obj)?;
        let headers = Headers::new().with(CONTENT_TYPE.as_str(), "application/json");
        self.api_call(key, Method::PUT.as_str(), Some(Payload::from(body)), Some(&headers))
            .await
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
