//! Bracket REST API client.
//!
//! [`RestClient`] exposes generic `get`, `post` and `delete` operations over
//! JSON. Callers build resource paths from [`endpoints`] and pick the
//! response shape with the type parameter:
//!
//! ```rust,ignore
//! use brkt_api_client::rest::{RestClient, endpoints};
//!
//! let volumes: Vec<Volume> = client.get(endpoints::VOLUME).await?;
//! let volume: Volume = client.get(&endpoints::resource(endpoints::VOLUME, &id)).await?;
//! ```

mod client;
pub mod endpoints;

pub use client::{DEFAULT_TIMEOUT_MILLIS, ROOT_URI_VAR, RestClient, RestClientBuilder};
