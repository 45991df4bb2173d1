//! Compass: nearest-place retrieval for retrieval-augmented pipelines.
//!
//! This crate re-exports the Compass sub-crates for single-import usage.
//! Enable features to control which modules are available.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `default` | `retrieval`, `places` |
//! | `retrieval` | `RetrieverRegistry` and `RetrieverAction` |
//! | `places` | `PlaceRetriever`, `PlaceLookup`, `define_place_retriever` |
//! | `dataconnect` | Firebase Data Connect `PlaceLookup` |
//! | `pgvector` | PostgreSQL + pgvector `PlaceLookup` |
//! | `full` | All features enabled |
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use compass::core::{Document, QueryOptions, Retriever};
//! use compass::places::{define_place_retriever, PLACE_RETRIEVER_NAME};
//! use compass::retrieval::RetrieverRegistry;
//! ```

/// Core traits and types: Document, QueryOptions, Retriever, Embeddings, CompassError.
/// Always available.
pub use compass_core as core;

/// Named retriever registration.
#[cfg(feature = "retrieval")]
pub use compass_retrieval as retrieval;

/// Nearest-place retriever and the lookup trait it delegates to.
#[cfg(feature = "places")]
pub use compass_places as places;

/// Firebase Data Connect place lookup.
#[cfg(feature = "dataconnect")]
pub use compass_dataconnect as dataconnect;

/// PostgreSQL + pgvector place lookup.
#[cfg(feature = "pgvector")]
pub use compass_pgvector as pgvector;
