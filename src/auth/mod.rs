//! Authentication module for the Bracket API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce and timestamp generation for replay protection
//! - HMAC-SHA256 signing and `Authorization` header generation

mod credentials;
mod header;
mod nonce;
mod signature;

pub use credentials::{
    ACCESS_TOKEN_VAR, Credentials, CredentialsProvider, EnvCredentials, SECRET_KEY_VAR,
    StaticCredentials,
};
pub use header::{AuthHeaderBuilder, SignedRequestContext};
pub use nonce::{NonceProvider, RandomNonce, SystemClock, TimestampProvider};
pub use signature::sign;
