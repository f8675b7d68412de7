//! # Bracket Client
//!
//! A Rust client library for the Bracket cloud control-plane REST API.
//!
//! ## Features
//!
//! - MAC request signing (HMAC-SHA256 over timestamp, nonce, method, path, host and port)
//! - Generic JSON `get`/`post`/`delete` with typed or list responses
//! - Structured HTTP errors carrying status, reason and raw payload
//! - ISO-8601 timestamp codec with millisecond precision
//! - Async client plus a blocking facade (`blocking` feature, on by default)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use brkt_api_client::rest::{RestClient, endpoints};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RestClient::builder()
//!         .root_uri("https://api.example.com")
//!         .access_token("token")
//!         .secret_key("secret")
//!         .build()?;
//!     let zones: Vec<serde_json::Value> = client.get(endpoints::ZONE).await?;
//!     println!("Zones: {:?}", zones);
//!     Ok(())
//! }
//! ```

pub mod auth;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod error;
pub mod request;
pub mod rest;
pub mod transport;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{BrktError, HttpError, MissingFieldsError};
pub use request::{RequestAttributes, RequestBuilder};
pub use rest::{RestClient, RestClientBuilder};
pub use types::Timestamp;

/// Result type alias using BrktError
pub type Result<T> = std::result::Result<T, BrktError>;
