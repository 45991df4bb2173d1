use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[cfg(feature = "schemars")]
pub use schemars;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Unified error type for Compass with variants covering every subsystem.
#[derive(Debug, Error)]
pub enum CompassError {
    #[error("retriever error: {0}")]
    Retriever(String),
    #[error("retriever not found: {0}")]
    RetrieverNotFound(String),
    #[error("lookup error: {0}")]
    Lookup(String),
    #[error("embedding error: {0}")]
    Embedding(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A retrieved candidate: textual content plus free-form metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn from_text(content: impl Into<String>, metadata: HashMap<String, Value>) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }
}

// ---------------------------------------------------------------------------
// Query options / response
// ---------------------------------------------------------------------------

/// Per-call retriever options. JSON shape: `{"k": <number>}`, every field optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(default)]
pub struct QueryOptions {
    /// Maximum number of results. `None` leaves the limit to the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<u32>,
}

impl QueryOptions {
    pub fn with_k(mut self, k: u32) -> Self {
        self.k = Some(k);
        self
    }
}

/// The result of running a retriever action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieverResponse {
    pub documents: Vec<Document>,
}

impl From<Vec<Document>> for RetrieverResponse {
    fn from(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

// ---------------------------------------------------------------------------
// Retriever trait (implementations live in compass-places)
// ---------------------------------------------------------------------------

/// Trait for retrieving relevant documents given a query string.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(
        &self,
        query: &str,
        options: &QueryOptions,
    ) -> Result<Vec<Document>, CompassError>;
}

// ---------------------------------------------------------------------------
// Embeddings trait (consumed by compass-pgvector)
// ---------------------------------------------------------------------------

/// Trait for embedding query text into a vector.
#[async_trait]
pub trait Embeddings: Send + Sync {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, CompassError>;
}
