//! HTTP transport for the Bracket API.
//!
//! Sends one signed request per call and hands back the raw status line and
//! payload. Status interpretation is left to [`crate::rest::RestClient`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use url::Url;

use crate::auth::{AuthHeaderBuilder, CredentialsProvider, NonceProvider, TimestampProvider};
use crate::error::BrktError;

const APPLICATION_JSON: &str = "application/json";

/// HTTP methods used by the Bracket API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    /// The method name as it appears on the wire and in the signed message.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// The raw outcome of one HTTP round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code
    pub status: u16,
    /// The status reason phrase, if known
    pub message: Option<String>,
    /// The response body, empty when the server sent none
    pub payload: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is in the 200-299 range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{} {}", self.status, message),
            None => write!(f, "{}", self.status),
        }
    }
}

/// A validated service root URI.
///
/// `host` is the authority host exactly as the caller wrote it; the
/// signature is computed over this value, not the normalized one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RootUri {
    pub uri: String,
    pub host: String,
    pub port: u16,
}

impl RootUri {
    /// Validate `uri` as an `http`/`https` root with a host and known port.
    pub fn parse(uri: &str) -> Result<Self, BrktError> {
        let uri = uri.trim_end_matches('/');
        let url = Url::parse(uri)
            .map_err(|e| BrktError::Configuration(format!("invalid root URI {uri:?}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BrktError::Configuration(format!(
                "unsupported scheme in root URI {uri:?}: {}",
                url.scheme()
            )));
        }
        let host = authority_host(uri)
            .filter(|_| url.host_str().is_some())
            .ok_or_else(|| BrktError::Configuration(format!("root URI has no host: {uri:?}")))?;
        let port = url.port_or_known_default().ok_or_else(|| {
            BrktError::Configuration(format!("root URI has no known port: {uri:?}"))
        })?;

        Ok(Self {
            uri: uri.to_string(),
            host: host.to_string(),
            port,
        })
    }
}

/// The host part of `uri`'s authority, case preserved.
fn authority_host(uri: &str) -> Option<&str> {
    let (_, rest) = uri.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let authority = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let host = if authority.starts_with('[') {
        authority.find(']').map(|end| &authority[..=end])?
    } else {
        authority.split(':').next()?
    };
    (!host.is_empty()).then_some(host)
}

/// Settings used to construct a [`Transport`].
pub(crate) struct TransportOptions {
    pub root_uri: RootUri,
    pub credentials: Arc<dyn CredentialsProvider>,
    pub nonce_provider: Arc<dyn NonceProvider>,
    pub clock: Arc<dyn TimestampProvider>,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

/// Signs and sends individual HTTP requests.
///
/// Idle connections are never kept, so every call opens a fresh
/// connection. Nothing is retried.
#[derive(Clone)]
pub struct Transport {
    http_client: ClientWithMiddleware,
    root_uri: RootUri,
    credentials: Arc<dyn CredentialsProvider>,
    nonce_provider: Arc<dyn NonceProvider>,
    clock: Arc<dyn TimestampProvider>,
}

impl Transport {
    pub(crate) fn new(options: TransportOptions) -> Result<Self, BrktError> {
        let mut headers = HeaderMap::new();
        let header_value = HeaderValue::from_str(&options.user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("brkt-api-client"));
        headers.insert(USER_AGENT, header_value);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(0);
        // A zero timeout means wait indefinitely.
        if let Some(timeout) = options.timeout {
            builder = builder.connect_timeout(timeout).read_timeout(timeout);
        }
        let reqwest_client = builder
            .build()
            .map_err(|e| BrktError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            http_client,
            root_uri: options.root_uri,
            credentials: options.credentials,
            nonce_provider: options.nonce_provider,
            clock: options.clock,
        })
    }

    /// The root URI that request paths are appended to.
    pub fn root_uri(&self) -> &str {
        &self.root_uri.uri
    }

    /// The host signed into every request, as given in the root URI.
    pub fn host(&self) -> &str {
        &self.root_uri.host
    }

    /// The port signed into every request; the scheme default when the
    /// root URI names none.
    pub fn port(&self) -> u16 {
        self.root_uri.port
    }

    /// Resolve `path` against the root URI.
    fn resolve(&self, path: &str) -> Result<Url, BrktError> {
        Ok(Url::parse(&format!("{}{}", self.root_uri.uri, path))?)
    }

    /// Send a request and read the full response.
    ///
    /// `body` is only sent for POST; a POST without a body sends an explicit
    /// empty one. `Content-Type` is set only when a body is attached.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, BrktError> {
        let url = self.resolve(path)?;

        let authorization = AuthHeaderBuilder::new(
            self.root_uri.host.clone(),
            self.root_uri.port,
            self.credentials.clone(),
        )
        .nonce_provider(self.nonce_provider.clone())
        .clock(self.clock.clone())
        .build_header(method.as_str(), path)?;

        let mut request = self
            .http_client
            .request(method.into(), url)
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, APPLICATION_JSON);

        if method == HttpMethod::Post {
            request = match body {
                Some(body) => request.header(CONTENT_TYPE, APPLICATION_JSON).body(body),
                None => request.body(Vec::<u8>::new()),
            };
        }

        tracing::debug!(%method, path, "sending request");
        let response = request.send().await?;

        let status = response.status();
        let message = status.canonical_reason().map(str::to_string);
        let payload = response.bytes().await?.to_vec();
        tracing::debug!(%method, path, status = status.as_u16(), len = payload.len(), "received response");

        Ok(HttpResponse {
            status: status.as_u16(),
            message,
            payload,
        })
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("root_uri", &self.root_uri.uri)
            .finish()
    }
}
