//! Synchronous Bracket REST API client.
//!
//! Wraps [`crate::rest::RestClient`] and runs every call to completion on
//! the invoking thread. Each call blocks until the round-trip finishes or
//! the configured timeout elapses.
//!
//! The blocking client owns a small tokio runtime, so it must not be used
//! from inside an async context.
//!
//! ```rust,no_run
//! use brkt_api_client::blocking;
//! use brkt_api_client::rest::{RestClient, endpoints};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = blocking::RestClient::new(
//!     RestClient::builder()
//!         .root_uri("https://api.example.com")
//!         .access_token("token")
//!         .secret_key("secret")
//!         .build()?,
//! )?;
//!
//! let zones: Vec<serde_json::Value> = client.get(endpoints::ZONE)?;
//! println!("{} zones", zones.len());
//! # Ok(())
//! # }
//! ```

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::runtime::{Builder, Runtime};

use crate::error::BrktError;
use crate::request::RequestAttributes;
use crate::rest;

/// A blocking wrapper around the async [`rest::RestClient`].
pub struct RestClient {
    inner: rest::RestClient,
    runtime: Runtime,
}

impl RestClient {
    /// Wrap an async client.
    pub fn new(inner: rest::RestClient) -> Result<Self, BrktError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BrktError::Configuration(format!("Failed to start runtime: {e}")))?;
        Ok(Self { inner, runtime })
    }

    /// Build the async client from `builder` and wrap it.
    pub fn from_builder(builder: rest::RestClientBuilder) -> Result<Self, BrktError> {
        Self::new(builder.build()?)
    }

    /// The wrapped async client.
    pub fn inner(&self) -> &rest::RestClient {
        &self.inner
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// GET `path` and decode the JSON payload as `T`.
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BrktError> {
        self.block_on(self.inner.get(path))
    }

    /// POST `attrs` (or an empty body) to `path` and decode the response.
    pub fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        attrs: Option<&RequestAttributes>,
    ) -> Result<T, BrktError> {
        self.block_on(self.inner.post(path, attrs))
    }

    /// POST any serializable body to `path` and decode the response.
    pub fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, BrktError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.block_on(self.inner.post_json(path, body))
    }

    /// DELETE `path`, discarding the response body.
    pub fn delete(&self, path: &str) -> Result<(), BrktError> {
        self.block_on(self.inner.delete(path))
    }

    /// DELETE `path` and decode the response body as `T`.
    pub fn delete_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, BrktError> {
        self.block_on(self.inner.delete_as(path))
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::RestClient")
            .field("inner", &self.inner)
            .finish()
    }
}
