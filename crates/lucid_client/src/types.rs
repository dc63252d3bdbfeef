//! Types shared by the Lucid client.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU8, Ordering};

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Deserialize;

use crate::error::{LucidError, Result};

/// Opaque request payload. The client never looks inside it.
pub type Payload = Bytes;

/// Methods that must not carry a body.
pub static NO_BODY_METHODS: [Method; 3] = [Method::GET, Method::DELETE, Method::HEAD];

/// Request headers keyed by lowercased name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: BTreeMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, replacing any value under the same name (case-insensitive).
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.inner
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Builder form of [`Headers::insert`].
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Merge `other` into `self`; values from `other` win.
    pub fn merge_with(&mut self, other: &Headers) {
        for (name, value) in &other.inner {
            self.inner.insert(name.clone(), value.clone());
        }
    }

    pub fn to_reqwest_headers(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.inner.len());
        for (name, value) in &self.inner {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                LucidError::InvalidRequestShape(format!("Invalid header name: {}", name))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|_| {
                LucidError::InvalidRequestShape(format!("Invalid value for header {}", name))
            })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.insert(k, v);
        }
        headers
    }
}

/// Parse a method name case-insensitively, normalized to uppercase.
pub fn parse_method(method: &str) -> Result<Method> {
    let upper = method.trim().to_ascii_uppercase();
    if upper.is_empty() {
        return Err(LucidError::InvalidMethod(method.to_string()));
    }
    Method::from_bytes(upper.as_bytes()).map_err(|_| LucidError::InvalidMethod(method.to_string()))
}

/// Check a method/body pair before anything goes over the wire.
pub(crate) fn validate_shape(method: &Method, body: Option<&Payload>) -> Result<()> {
    let has_body = body.is_some_and(|b| !b.is_empty());

    if has_body && NO_BODY_METHODS.contains(method) {
        let names: Vec<&str> = NO_BODY_METHODS.iter().map(Method::as_str).collect();
        return Err(LucidError::InvalidRequestShape(format!(
            "Can't do a request with a body when using any of {} HTTP methods.",
            names.join(", ")
        )));
    }

    if !has_body && *method == Method::PUT {
        return Err(LucidError::InvalidRequestShape(
            "A PUT HTTP method request should have a body.".to_string(),
        ));
    }

    Ok(())
}

/// Error body returned by Lucid on failure: `{ "message": string }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull a message out of a failure body.
///
/// Falls back to the raw text, then to the status reason phrase.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.message;
    }
    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}

/// Lifecycle of a client instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InitState {
    Uninitialized = 0,
    Initializing = 1,
    Ready = 2,
}

impl InitState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => InitState::Initializing,
            2 => InitState::Ready,
            _ => InitState::Uninitialized,
        }
    }
}

/// Atomic cell holding an [`InitState`].
#[derive(Debug)]
pub(crate) struct AtomicInitState(AtomicU8);

impl AtomicInitState {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(InitState::Uninitialized as u8))
    }

    pub(crate) fn load(&self) -> InitState {
        InitState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Move `from -> to`; returns false if the current state was not `from`.
    pub(crate) fn transition(&self, from: InitState, to: InitState) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
