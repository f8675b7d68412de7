//! Bracket REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::{
    CredentialsProvider, EnvCredentials, NonceProvider, RandomNonce, StaticCredentials,
    SystemClock, TimestampProvider,
};
use crate::error::{BrktError, HttpError};
use crate::request::RequestAttributes;
use crate::transport::{HttpMethod, HttpResponse, RootUri, Transport, TransportOptions};

/// Default connect/read timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MILLIS: i64 = 10_000;

/// Environment variable holding the service root URI.
pub const ROOT_URI_VAR: &str = "BRKT_ROOT_URI";

/// The Bracket REST API client.
///
/// Serializes request bodies to JSON, signs and sends each call through a
/// [`Transport`], and maps any status outside 200-299 to
/// [`BrktError::Http`]. Nothing is retried and no state is kept between
/// calls, so one client can be shared freely between tasks.
///
/// # Example
///
/// ```rust,no_run
/// use brkt_api_client::rest::{RestClient, endpoints};
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct Zone {
///     id: String,
///     name: String,
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = RestClient::builder()
///         .root_uri("https://api.example.com")
///         .access_token("token")
///         .secret_key("secret")
///         .build()?;
///
///     let zones: Vec<Zone> = client.get(endpoints::ZONE).await?;
///     for zone in &zones {
///         println!("{}: {}", zone.id, zone.name);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RestClient {
    transport: Transport,
}

impl RestClient {
    /// Create a new client builder.
    pub fn builder() -> RestClientBuilder {
        RestClientBuilder::new()
    }

    /// The underlying transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// GET `path` and decode the JSON payload as `T`.
    ///
    /// `T` may be a single resource or a `Vec` of resources.
    pub async fn get<T>(&self, path: &str) -> Result<T, BrktError>
    where
        T: DeserializeOwned,
    {
        let payload = self.send(HttpMethod::Get, path, None).await?;
        decode(&payload)
    }

    /// POST `attrs` (or an empty body) to `path` and decode the response.
    pub async fn post<T>(
        &self,
        path: &str,
        attrs: Option<&RequestAttributes>,
    ) -> Result<T, BrktError>
    where
        T: DeserializeOwned,
    {
        let body = attrs.map(|attrs| serde_json::to_vec(attrs)).transpose()?;
        let payload = self.send(HttpMethod::Post, path, body).await?;
        decode(&payload)
    }

    /// POST any serializable body to `path` and decode the response.
    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, BrktError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body)?;
        let payload = self.send(HttpMethod::Post, path, Some(body)).await?;
        decode(&payload)
    }

    /// DELETE `path`, discarding the response body.
    pub async fn delete(&self, path: &str) -> Result<(), BrktError> {
        self.send(HttpMethod::Delete, path, None).await?;
        Ok(())
    }

    /// DELETE `path` and decode the response body as `T`.
    pub async fn delete_as<T>(&self, path: &str) -> Result<T, BrktError>
    where
        T: DeserializeOwned,
    {
        let payload = self.send(HttpMethod::Delete, path, None).await?;
        decode(&payload)
    }

    /// Send a request and return the payload of a 2xx response.
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, BrktError> {
        let response = self.transport.request(method, path, body).await?;
        check_status(method, path, response)
    }
}

/// Map a non-2xx response to [`BrktError::Http`].
fn check_status(
    method: HttpMethod,
    path: &str,
    response: HttpResponse,
) -> Result<Vec<u8>, BrktError> {
    if response.is_success() {
        return Ok(response.payload);
    }

    let error = HttpError::new(response.status, response.message, response.payload);
    tracing::warn!(%method, path, status = error.status, "request failed");
    Err(BrktError::Http(error))
}

fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, BrktError> {
    Ok(serde_json::from_slice(payload)?)
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("root_uri", &self.transport.root_uri())
            .finish()
    }
}

/// Builder for [`RestClient`].
///
/// The root URI and credentials are required; everything else has a
/// default. All validation happens in [`RestClientBuilder::build`].
pub struct RestClientBuilder {
    root_uri: Option<String>,
    access_token: Option<String>,
    secret_key: Option<String>,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    clock: Option<Arc<dyn TimestampProvider>>,
    user_agent: Option<String>,
    timeout_millis: i64,
}

impl RestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            root_uri: None,
            access_token: None,
            secret_key: None,
            credentials: None,
            nonce_provider: None,
            clock: None,
            user_agent: None,
            timeout_millis: DEFAULT_TIMEOUT_MILLIS,
        }
    }

    /// Create a builder from `BRKT_ROOT_URI`, `BRKT_ACCESS_TOKEN` and
    /// `BRKT_SECRET_KEY`.
    ///
    /// Unset variables are left empty and reported by `build()`.
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        if let Ok(root_uri) = std::env::var(ROOT_URI_VAR) {
            builder = builder.root_uri(root_uri);
        }
        if let Some(credentials) = EnvCredentials::try_from_env() {
            builder = builder.credentials(Arc::new(credentials));
        }
        builder
    }

    /// Set the service root URI, e.g. `https://api.example.com:8443`.
    pub fn root_uri(mut self, uri: impl Into<String>) -> Self {
        self.root_uri = Some(uri.into());
        self
    }

    /// Set the access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the secret key used to sign requests.
    pub fn secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = Some(key.into());
        self
    }

    /// Set a credentials provider instead of a token and secret key.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom clock for request timestamps.
    pub fn clock(mut self, clock: Arc<dyn TimestampProvider>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the connect and read timeout in milliseconds.
    ///
    /// Zero disables the timeout. Negative values are rejected by `build()`.
    pub fn timeout_millis(mut self, millis: i64) -> Self {
        self.timeout_millis = millis;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<RestClient, BrktError> {
        if self.timeout_millis < 0 {
            return Err(BrktError::Configuration(format!(
                "timeout cannot be negative: {}",
                self.timeout_millis
            )));
        }
        let timeout = match self.timeout_millis {
            0 => None,
            millis => Some(Duration::from_millis(millis.unsigned_abs())),
        };

        let root_uri = self
            .root_uri
            .ok_or_else(|| BrktError::Configuration("root URI is required".to_string()))?;
        let root_uri = RootUri::parse(&root_uri)?;

        let credentials: Arc<dyn CredentialsProvider> = match self.credentials {
            Some(credentials) => credentials,
            None => {
                let access_token = self.access_token.ok_or_else(|| {
                    BrktError::Configuration("access token is required".to_string())
                })?;
                let secret_key = self.secret_key.ok_or_else(|| {
                    BrktError::Configuration("secret key is required".to_string())
                })?;
                Arc::new(StaticCredentials::new(access_token, secret_key))
            }
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("brkt-api-client/{}", env!("CARGO_PKG_VERSION")));

        let transport = Transport::new(TransportOptions {
            root_uri,
            credentials,
            nonce_provider: self
                .nonce_provider
                .unwrap_or_else(|| Arc::new(RandomNonce::new())),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            timeout,
            user_agent,
        })?;

        Ok(RestClient { transport })
    }
}

impl Default for RestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
