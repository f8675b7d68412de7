//! Credential management for Bracket API authentication.

use secrecy::{ExposeSecret, SecretString};

/// Environment variable holding the access token.
pub const ACCESS_TOKEN_VAR: &str = "BRKT_ACCESS_TOKEN";
/// Environment variable holding the secret key.
pub const SECRET_KEY_VAR: &str = "BRKT_SECRET_KEY";

/// API credentials containing the access token and secret key.
#[derive(Clone)]
pub struct Credentials {
    /// The access token (public identifier, sent as the MAC `id`)
    pub access_token: String,
    /// The secret key (private, used as the HMAC key)
    secret_key: SecretString,
}

impl Credentials {
    /// Create new credentials from an access token and secret key.
    pub fn new(access_token: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// Get the secret key for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &self.access_token)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager or environment variables.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(access_token: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(access_token, secret_key),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `BRKT_ACCESS_TOKEN` and `BRKT_SECRET_KEY`.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Try to create credentials from default environment variables.
    ///
    /// Returns `None` if the environment variables are not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(ACCESS_TOKEN_VAR, SECRET_KEY_VAR)
    }

    /// Try to create credentials from custom environment variable names.
    ///
    /// Returns `None` if the environment variables are not set.
    pub fn try_from_env_vars(token_var: &str, secret_var: &str) -> Option<Self> {
        let access_token = std::env::var(token_var).ok()?;
        let secret_key = std::env::var(secret_var).ok()?;

        Some(Self {
            credentials: Credentials::new(access_token, secret_key),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
