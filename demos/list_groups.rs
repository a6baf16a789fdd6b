//! Concession groups example.
//!
//! This example authenticates with the Littlepay QA environment and lists
//! every concession group with its linked products.
//!
//! Run with: cargo run --example list_groups

use futures_util::TryStreamExt;
use littlepay_rs::{ApiEnvironment, ClientConfig, Credentials, LittlepayClient};

#[tokio::main]
async fn main() -> littlepay_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Get credentials from environment variables
    let client_id = std::env::var("LITTLEPAY_CLIENT_ID")
        .expect("LITTLEPAY_CLIENT_ID environment variable required");
    let client_secret = std::env::var("LITTLEPAY_CLIENT_SECRET")
        .expect("LITTLEPAY_CLIENT_SECRET environment variable required");
    let audience = std::env::var("LITTLEPAY_AUDIENCE")
        .expect("LITTLEPAY_AUDIENCE environment variable required");

    println!("Connecting to Littlepay QA...");

    let client = LittlepayClient::new(
        ApiEnvironment::qa(),
        Credentials::new(client_id, client_secret, audience),
        ClientConfig::default(),
    )?;

    let token = client.access_token().await?;
    println!("Successfully authenticated! Token expires at {}", token.expires_at());

    let groups: Vec<_> = client.groups().list().try_collect().await?;
    println!("\nFound {} concession group(s):", groups.len());

    for group in &groups {
        println!("  - {} ({})", group.label, group.id);

        let products: Vec<_> = client.groups().products(&group.id).try_collect().await?;
        for product in &products {
            println!("    {} [{}] {}", product.code, product.status, product.description);
        }
    }

    println!("\nDone!");
    Ok(())
}
