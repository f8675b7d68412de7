//! Example: Working with BrktError and HttpError.
//!
//! Run with: cargo run --example error_handling

use brkt_api_client::request::RequestBuilder;
use brkt_api_client::{BrktError, HttpError, RestClient};

fn main() {
    let server_error = HttpError::new(
        500,
        Some("Internal Server Error".to_string()),
        r#"{"error": "database unavailable"}"#,
    );
    println!("Server error: {}", server_error);

    // 404 messages never include the payload.
    let not_found = HttpError::new(404, Some("Not Found".to_string()), "no such volume");
    println!("Not found: {}", not_found);
    println!("Payload kept for inspection: {}", not_found.payload_text());

    let err = BrktError::Http(not_found);
    match &err {
        BrktError::Http(inner) if inner.is_not_found() => {
            println!("Matched missing resource");
        }
        _ => {
            println!("Unexpected error type");
        }
    }

    // Configuration problems surface before any request is made.
    match RestClient::builder()
        .root_uri("https://api.example.com")
        .access_token("token")
        .secret_key("secret")
        .timeout_millis(-1)
        .build()
    {
        Err(BrktError::Configuration(msg)) => println!("Configuration error: {}", msg),
        other => println!("Unexpected result: {:?}", other),
    }

    // Missing required attributes are reported together.
    if let Err(missing) = RequestBuilder::with_required(["name", "customer"]).build() {
        println!("{}", missing);
    }
}
