use std::sync::Arc;

use compass::core::CompassError;
use compass::dataconnect::{DataConnectClient, DataConnectConfig};
use compass::places::{define_place_retriever, PLACE_RETRIEVER_NAME};
use compass::retrieval::RetrieverRegistry;
use serde_json::json;

fn env_var(name: &str) -> Result<String, CompassError> {
    std::env::var(name).map_err(|_| CompassError::Config(format!("{name} must be set")))
}

#[tokio::main]
async fn main() -> Result<(), CompassError> {
    tracing_subscriber::fmt::init();

    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "historic lighthouse by the sea".to_string());

    let mut config = DataConnectConfig::new(
        env_var("DATACONNECT_PROJECT")?,
        env_var("DATACONNECT_LOCATION").unwrap_or_else(|_| "us-central1".to_string()),
        env_var("DATACONNECT_SERVICE")?,
        env_var("DATACONNECT_CONNECTOR").unwrap_or_else(|_| "default".to_string()),
    );
    if let Ok(url) = env_var("DATACONNECT_BASE_URL") {
        config = config.with_base_url(url);
    }
    if let Ok(token) = env_var("DATACONNECT_ACCESS_TOKEN") {
        config = config.with_access_token(token);
    }

    let registry = RetrieverRegistry::new();
    define_place_retriever(&registry, Arc::new(DataConnectClient::new(config)))?;

    println!("=== {PLACE_RETRIEVER_NAME}: \"{query}\" ===");
    let response = registry
        .retrieve(PLACE_RETRIEVER_NAME, &query, json!({"k": 3}))
        .await?;

    for (i, doc) in response.documents.iter().enumerate() {
        let name = doc
            .metadata
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("<unnamed>");
        println!("  {i}: {name} known for \"{}\"", doc.content);
    }
    if response.documents.is_empty() {
        println!("  no places found");
    }

    Ok(())
}
