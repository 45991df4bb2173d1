//! Named retriever registration for Compass.
//!
//! A retriever becomes usable by a pipeline once it is defined in a
//! [`RetrieverRegistry`]: the registry pairs it with a name and the JSON
//! schema of the options it accepts, and hands back a [`RetrieverAction`]
//! that can be invoked with raw JSON options.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use compass_retrieval::{Retriever, RetrieverRegistry};
//!
//! # async fn example(retriever: Arc<dyn Retriever>) -> Result<(), compass_core::CompassError> {
//! let registry = RetrieverRegistry::new();
//! registry.define_retriever("my-retriever", retriever)?;
//!
//! let response = registry
//!     .retrieve("my-retriever", "quiet beaches", serde_json::json!({"k": 3}))
//!     .await?;
//! println!("{} documents", response.documents.len());
//! # Ok(())
//! # }
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use compass_core::CompassError;
use serde_json::Value;

pub use compass_core::{Document, QueryOptions, Retriever, RetrieverResponse};

/// A retriever bound to a name and an options schema.
#[derive(Clone)]
pub struct RetrieverAction {
    name: String,
    config_schema: Arc<Value>,
    retriever: Arc<dyn Retriever>,
}

impl RetrieverAction {
    pub fn new(name: impl Into<String>, retriever: Arc<dyn Retriever>) -> Self {
        Self {
            name: name.into(),
            config_schema: Arc::new(options_schema()),
            retriever,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// JSON schema of the options accepted by [`run_json`](Self::run_json).
    pub fn config_schema(&self) -> &Value {
        &self.config_schema
    }

    pub fn retriever(&self) -> Arc<dyn Retriever> {
        Arc::clone(&self.retriever)
    }

    /// Run the retriever with already-decoded options.
    ///
    /// The retriever's error is returned as is.
    pub async fn run(
        &self,
        query: &str,
        options: &QueryOptions,
    ) -> Result<RetrieverResponse, CompassError> {
        tracing::debug!(retriever = %self.name, k = ?options.k, "retriever action started");

        match self.retriever.retrieve(query, options).await {
            Ok(documents) => {
                tracing::debug!(
                    retriever = %self.name,
                    documents = documents.len(),
                    "retriever action finished"
                );
                Ok(RetrieverResponse { documents })
            }
            Err(e) => {
                tracing::warn!(retriever = %self.name, error = %e, "retriever action failed");
                Err(e)
            }
        }
    }

    /// Decode `options` against the config schema and run the retriever.
    ///
    /// `null` means no options. Anything that does not decode as
    /// [`QueryOptions`] fails before the retriever is called.
    pub async fn run_json(
        &self,
        query: &str,
        options: Value,
    ) -> Result<RetrieverResponse, CompassError> {
        let options = parse_options(&self.name, options)?;
        self.run(query, &options).await
    }
}

impl std::fmt::Debug for RetrieverAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrieverAction")
            .field("name", &self.name)
            .field("config_schema", &self.config_schema)
            .finish_non_exhaustive()
    }
}

fn options_schema() -> Value {
    schemars::schema_for!(QueryOptions).to_value()
}

fn parse_options(name: &str, options: Value) -> Result<QueryOptions, CompassError> {
    if options.is_null() {
        return Ok(QueryOptions::default());
    }
    serde_json::from_value(options).map_err(|e| {
        CompassError::Validation(format!("invalid options for retriever '{name}': {e}"))
    })
}

/// Thread-safe registry of retriever actions, backed by `Arc<RwLock<HashMap>>`.
#[derive(Default, Clone)]
pub struct RetrieverRegistry {
    inner: Arc<RwLock<HashMap<String, RetrieverAction>>>,
}

impl RetrieverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `retriever` under `name`, replacing any action already
    /// registered under that name.
    pub fn define_retriever(
        &self,
        name: impl Into<String>,
        retriever: Arc<dyn Retriever>,
    ) -> Result<RetrieverAction, CompassError> {
        let action = RetrieverAction::new(name, retriever);
        let mut guard = self
            .inner
            .write()
            .map_err(|e| CompassError::Retriever(format!("registry lock poisoned: {e}")))?;
        if guard.insert(action.name.clone(), action.clone()).is_some() {
            tracing::warn!(retriever = %action.name, "replaced existing retriever definition");
        }
        Ok(action)
    }

    pub fn get(&self, name: &str) -> Option<RetrieverAction> {
        let guard = self.inner.read().ok()?;
        guard.get(name).cloned()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = match self.inner.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// Look up `name` and run it with raw JSON options.
    pub async fn retrieve(
        &self,
        name: &str,
        query: &str,
        options: Value,
    ) -> Result<RetrieverResponse, CompassError> {
        let action = self
            .get(name)
            .ok_or_else(|| CompassError::RetrieverNotFound(name.to_string()))?;
        action.run_json(query, options).await
    }
}
