//! Binary to check connectivity against an Evolution API gateway: lists the
//! instances visible to the API key and prints the connection state of the
//! configured instance.
//!
//! # Usage
//!
//! ```sh
//! export EVOLUTION_SERVER_URL="http://localhost:8080"
//! export EVOLUTION_API_KEY="your-api-key"
//! export EVOLUTION_INSTANCE="your-instance"   # optional
//! cargo run --bin evo_check --features cli
//! ```

use evolution_rs::EvolutionClient;
use evolution_rs::types::instance::FetchInstancesQuery;

#[tokio::main]
async fn main() -> evolution_rs::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let client = EvolutionClient::from_env()?;
    println!("Connecting to {}…", client.server_url());

    let instances = match client.fetch_instances(&FetchInstancesQuery::default()).await {
        Ok(instances) => instances,
        Err(err) => {
            match err.as_api() {
                Some(api) => eprintln!("{api:#}"),
                None => eprintln!("Error: {err}"),
            }
            return Err(err);
        }
    };

    println!("{} instance(s):", instances.len());
    for instance in &instances {
        println!(
            "  {}: {:?}",
            instance.name,
            instance.connection_status
        );
    }

    if let Some(name) = client.instance() {
        let state = client.connection_state(name).await?;
        println!("\n{name}: {:?}", state.instance.state);
    }

    println!("Done.");
    Ok(())
}
