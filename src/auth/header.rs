//! `Authorization` header generation.
//!
//! Bracket uses a MAC access authentication scheme. For every request the
//! client signs a canonical message:
//!
//! ```text
//! <ts>\n<nonce>\n<METHOD>\n<lowercase-path>\n<host>\n<port>\n\n
//! ```
//!
//! and sends the result as:
//!
//! ```text
//! MAC id="<token>", ts="<ts>", nonce="<nonce>", mac="<base64 HMAC-SHA256>"
//! ```

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::auth::{
    Credentials, CredentialsProvider, NonceProvider, RandomNonce, SystemClock, TimestampProvider,
    sign,
};
use crate::error::BrktError;

/// The inputs of a single signature.
///
/// Built fresh for each outgoing request and never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequestContext {
    /// Seconds since the UNIX epoch
    pub timestamp: u64,
    /// Single-use random token
    pub nonce: String,
    /// HTTP method as given by the caller
    pub method: String,
    /// Request path as given by the caller
    pub path: String,
    /// Target host, case preserved
    pub host: String,
    /// Resolved target port
    pub port: u16,
}

impl SignedRequestContext {
    /// The newline-delimited message that gets signed.
    ///
    /// The method is upper-cased and the path lower-cased; the host is used
    /// verbatim. The message ends with an empty line.
    pub fn canonical_message(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}\n{}\n{}\n\n",
            self.timestamp,
            self.nonce,
            self.method.to_uppercase(),
            self.path.to_lowercase(),
            self.host,
            self.port
        )
    }

    /// Sign the canonical message and render the `Authorization` header value.
    pub fn authorization(&self, credentials: &Credentials) -> Result<String, BrktError> {
        let digest = sign(
            self.canonical_message().as_bytes(),
            credentials.expose_secret().as_bytes(),
        )?;
        Ok(format!(
            "MAC id=\"{}\", ts=\"{}\", nonce=\"{}\", mac=\"{}\"",
            credentials.access_token,
            self.timestamp,
            self.nonce,
            BASE64.encode(digest)
        ))
    }
}

/// Generates `Authorization` header values for one host and port.
#[derive(Clone)]
pub struct AuthHeaderBuilder {
    host: String,
    port: u16,
    credentials: Arc<dyn CredentialsProvider>,
    nonce_provider: Arc<dyn NonceProvider>,
    clock: Arc<dyn TimestampProvider>,
}

impl AuthHeaderBuilder {
    /// Create a header builder using random nonces and the system clock.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        credentials: Arc<dyn CredentialsProvider>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            credentials,
            nonce_provider: Arc::new(RandomNonce::new()),
            clock: Arc::new(SystemClock),
        }
    }

    /// Use a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = provider;
        self
    }

    /// Use a custom clock.
    pub fn clock(mut self, clock: Arc<dyn TimestampProvider>) -> Self {
        self.clock = clock;
        self
    }

    /// Capture a fresh nonce and timestamp for `method` and `path`.
    pub fn context(&self, method: &str, path: &str) -> SignedRequestContext {
        SignedRequestContext {
            timestamp: self.clock.now_seconds(),
            nonce: self.nonce_provider.next_nonce(),
            method: method.to_string(),
            path: path.to_string(),
            host: self.host.clone(),
            port: self.port,
        }
    }

    /// Build the `Authorization` header value for a request.
    ///
    /// Every call draws a new nonce and timestamp, so two calls with the
    /// same method and path yield different headers.
    pub fn build_header(&self, method: &str, path: &str) -> Result<String, BrktError> {
        self.context(method, path)
            .authorization(self.credentials.get_credentials())
    }
}

impl std::fmt::Debug for AuthHeaderBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHeaderBuilder")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
