//! Example: Listing resources from a Bracket service.
//!
//! Reads `BRKT_ROOT_URI`, `BRKT_ACCESS_TOKEN` and `BRKT_SECRET_KEY`.
//!
//! Run with: RUST_LOG=brkt_api_client=debug cargo run --example list_resources

use brkt_api_client::rest::{RestClientBuilder, endpoints};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct OperatingSystem {
    id: String,
    platform: Option<String>,
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BillingGroup {
    id: String,
    name: String,
    customer: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = RestClientBuilder::from_env().build()?;

    println!("=== Operating Systems ===");
    let systems: Vec<OperatingSystem> = client.get(endpoints::OPERATING_SYSTEM).await?;
    for os in &systems {
        println!(
            "{}: {} {}",
            os.id,
            os.platform.as_deref().unwrap_or("-"),
            os.label.as_deref().unwrap_or("-")
        );
    }

    println!("\n=== Billing Groups ===");
    let groups: Vec<BillingGroup> = client.get(endpoints::BILLING_GROUP).await?;
    for group in &groups {
        println!(
            "{}: {} (customer {})",
            group.id,
            group.name,
            group.customer.as_deref().unwrap_or("-")
        );
    }

    if let Some(first) = groups.first() {
        let path = endpoints::resource(endpoints::BILLING_GROUP, &first.id);
        let group: BillingGroup = client.get(&path).await?;
        println!("\nFetched {} again: {}", group.id, group.name);
    }

    Ok(())
}
