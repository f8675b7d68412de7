//! Error types for the Bracket client library.

use thiserror::Error;

/// Maximum length of a rendered [`HttpError`] message before it is truncated.
const MAX_MESSAGE_LEN: usize = 200;

/// The main error type for all Bracket client operations.
#[derive(Error, Debug)]
pub enum BrktError {
    /// The client was built with missing or invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection, timeout or stream failure while talking to the server
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// The server answered with a status outside 200-299
    #[error("HTTP error: {0}")]
    Http(HttpError),

    /// The HMAC primitive could not be initialized
    #[error("Signing unavailable: {0}")]
    SigningUnavailable(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for BrktError {
    fn from(err: reqwest::Error) -> Self {
        BrktError::Transport(reqwest_middleware::Error::Reqwest(err))
    }
}

impl BrktError {
    /// Get the HTTP status code if this is an [`BrktError::Http`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            BrktError::Http(err) => Some(err.status),
            _ => None,
        }
    }

    /// Check if the server reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BrktError::Http(err) if err.is_not_found())
    }
}

/// An unsuccessful HTTP response returned by the Bracket service.
///
/// Carries the raw status line and payload so that callers can inspect
/// the server's diagnostic body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// The HTTP status code
    pub status: u16,
    /// The status line reason phrase, if any
    pub message: Option<String>,
    /// The raw response payload (empty when the server sent none)
    pub payload: Vec<u8>,
}

impl HttpError {
    /// Create a new HTTP error.
    pub fn new(status: u16, message: Option<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            message,
            payload: payload.into(),
        }
    }

    /// Check if this is a 404 Not Found error.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// The payload decoded as UTF-8, with invalid sequences replaced.
    pub fn payload_text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }

    /// Render the human-readable message.
    ///
    /// Format is `<status>[ <message>][ <payload>]`. The payload is left out
    /// for 404 responses. Anything longer than 200 characters is cut and
    /// suffixed with `...`.
    pub fn rendered_message(&self) -> String {
        let mut rendered = self.status.to_string();
        if let Some(message) = &self.message {
            rendered.push(' ');
            rendered.push_str(message);
        }
        if !self.is_not_found() && !self.payload.is_empty() {
            rendered.push(' ');
            rendered.push_str(&String::from_utf8_lossy(&self.payload));
        }

        if rendered.chars().count() > MAX_MESSAGE_LEN {
            let mut truncated: String = rendered.chars().take(MAX_MESSAGE_LEN).collect();
            truncated.push_str("...");
            truncated
        } else {
            rendered
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.rendered_message())
    }
}

impl std::error::Error for HttpError {}

/// Returned by [`crate::request::RequestBuilder::build`] when required
/// attributes were never set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing required fields: {}", .missing.join(", "))]
pub struct MissingFieldsError {
    /// Names of the absent fields, sorted
    pub missing: Vec<String>,
}
