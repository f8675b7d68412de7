//! Example: Building a signed `Authorization` header.
//!
//! Run with: cargo run --example auth_header

use std::sync::Arc;

use brkt_api_client::auth::{
    AuthHeaderBuilder, CredentialsProvider, EnvCredentials, StaticCredentials,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Prefer credentials from the environment, fall back to placeholders.
    let credentials: Arc<dyn CredentialsProvider> = match EnvCredentials::try_from_env() {
        Some(creds) => Arc::new(creds),
        None => {
            println!("Set BRKT_ACCESS_TOKEN and BRKT_SECRET_KEY to sign with real credentials.");
            Arc::new(StaticCredentials::new("access_token", "secret_key"))
        }
    };
    println!("Access token: {}", credentials.get_credentials().access_token);

    let builder = AuthHeaderBuilder::new("api.example.com", 443, credentials);

    // The context shows exactly what gets signed.
    let context = builder.context("GET", "/v1/api/config/zone");
    println!("Canonical message: {:?}", context.canonical_message());

    // Each header carries a fresh nonce and timestamp.
    let first = builder.build_header("GET", "/v1/api/config/zone")?;
    let second = builder.build_header("GET", "/v1/api/config/zone")?;
    println!("Authorization: {}", first);
    println!("Authorization: {}", second);
    assert_ne!(first, second);

    Ok(())
}
