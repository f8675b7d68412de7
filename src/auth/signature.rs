//! HMAC-SHA256 signature generation for Bracket API authentication.
//!
//! The signature is computed over the canonical request message using the
//! client's secret key:
//! ```text
//! HMAC-SHA256(message, secret_key)
//! ```
//!
//! The caller base64-encodes the raw digest for the `mac` field of the
//! `Authorization` header.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::BrktError;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 of `message` keyed by `key`.
///
/// Returns the raw 32-byte digest. The function is pure: identical inputs
/// always produce identical output.
///
/// # Example
///
/// ```rust
/// use brkt_api_client::auth::sign;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let digest = sign(b"1427841291\nabc\nGET\n/v1/api/config/zone\nhost\n443\n\n", b"secret")?;
/// assert_eq!(digest.len(), 32);
/// # Ok(())
/// # }
/// ```
pub fn sign(message: &[u8], key: &[u8]) -> Result<Vec<u8>, BrktError> {
    let mut hmac = HmacSha256::new_from_slice(key)
        .map_err(|e| BrktError::SigningUnavailable(format!("Invalid HMAC key: {e}")))?;
    hmac.update(message);
    Ok(hmac.finalize().into_bytes().to_vec())
}
