//! Nearest-place retrieval for Compass.
//!
//! [`PlaceRetriever`] delegates the similarity search to a [`PlaceLookup`]
//! (a Data Connect service, a pgvector table, or a test double) and reshapes
//! each returned [`Destination`] row into a [`Document`]: the row's
//! `knownFor` text becomes the content and every other field becomes
//! metadata.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use compass_places::{define_place_retriever, PlaceLookup, PLACE_RETRIEVER_NAME};
//! use compass_retrieval::RetrieverRegistry;
//!
//! # async fn example(lookup: Arc<dyn PlaceLookup>) -> Result<(), compass_core::CompassError> {
//! let registry = RetrieverRegistry::new();
//! define_place_retriever(&registry, lookup)?;
//!
//! let response = registry
//!     .retrieve(PLACE_RETRIEVER_NAME, "historic lighthouse", serde_json::json!({"k": 3}))
//!     .await?;
//! for doc in &response.documents {
//!     println!("{}: {:?}", doc.content, doc.metadata.get("name"));
//! }
//! # Ok(())
//! # }
//! ```

mod lookup;
mod retriever;

pub use lookup::{
    Destination, NearestPlaceData, NearestPlaceResponse, NearestPlaceVariables, PlaceLookup,
};
pub use retriever::{define_place_retriever, PlaceRetriever, PLACE_RETRIEVER_NAME};

// Re-export core types for convenience.
pub use compass_core::{Document, QueryOptions, Retriever};
