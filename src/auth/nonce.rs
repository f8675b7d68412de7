//! Nonce and timestamp generation for Bracket API authentication.
//!
//! Every signed request carries a fresh random nonce and the current time in
//! whole seconds. The server rejects replayed nonces and timestamps outside
//! its clock-skew window.

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

/// Trait for providing nonces for authenticated requests.
///
/// Each returned nonce must be unpredictable and practically unique.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    fn next_nonce(&self) -> String;
}

/// A nonce provider that renders a random 128-bit UUID as 32 hex digits
/// with no separators.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNonce;

impl RandomNonce {
    /// Create a new random nonce provider.
    pub fn new() -> Self {
        Self
    }
}

impl NonceProvider for RandomNonce {
    fn next_nonce(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Trait for providing the signing timestamp.
pub trait TimestampProvider: Send + Sync {
    /// Current time as whole seconds since the UNIX epoch.
    fn now_seconds(&self) -> u64;
}

/// Timestamp provider backed by the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl TimestampProvider for SystemClock {
    fn now_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}
