//! Firebase Data Connect integration for Compass.
//!
//! [`DataConnectClient`] runs connector queries through the Data Connect
//! `executeQuery` REST method and implements
//! [`PlaceLookup`](compass_places::PlaceLookup) by executing the
//! `getNearestPlace` operation, whose vector similarity search runs inside
//! the service.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use compass_dataconnect::{DataConnectClient, DataConnectConfig};
//! use compass_places::{define_place_retriever, PLACE_RETRIEVER_NAME};
//! use compass_retrieval::RetrieverRegistry;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DataConnectConfig::new("my-project", "us-central1", "compass", "default")
//!     .with_access_token("ya29.token");
//! let client = DataConnectClient::new(config);
//!
//! let registry = RetrieverRegistry::new();
//! define_place_retriever(&registry, Arc::new(client))?;
//! let _response = registry
//!     .retrieve(PLACE_RETRIEVER_NAME, "quiet beaches", serde_json::Value::Null)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;

pub use client::DataConnectClient;
pub use config::{DataConnectConfig, DEFAULT_BASE_URL, DEFAULT_OPERATION_NAME};
