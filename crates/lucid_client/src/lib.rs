//! lucid_client — thin async wrapper around a Lucid key-value endpoint.
//!
//! The client derives the `api`, `kv` and `ui` sub-endpoints from one base
//! URL, checks once that the endpoint is a Lucid server (and that the token
//! is accepted), then forwards key-value operations as authenticated HTTP
//! requests. Nothing is cached or retried.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lucid_client::{LucidClient, LucidConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LucidConfig::new("http://localhost:7090").token("my-jwt");
//!     let client = LucidClient::new(config);
//!
//!     let version = client.init().await?;
//!     println!("Connected to Lucid {}", version);
//!
//!     client.store_key_data_json("user:1", &serde_json::json!({ "name": "ada" })).await?;
//!     let value = client.get_key("user:1").await?.text().await?;
//!     println!("{}", value);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export main types at crate root
pub use client::{LucidClient, VERSION_PREFIX};
pub use config::{LucidConfig, DEFAULT_ENDPOINT};
pub use endpoints::Endpoints;
pub use error::{LucidError, Result};
pub use types::{parse_method, Headers, InitState, Payload};
