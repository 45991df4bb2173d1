use std::sync::Arc;

use async_trait::async_trait;
use compass_core::{CompassError, Document, QueryOptions, Retriever};
use compass_retrieval::{RetrieverAction, RetrieverRegistry};

use crate::lookup::{NearestPlaceVariables, PlaceLookup};

/// Name under which [`define_place_retriever`] registers the retriever.
pub const PLACE_RETRIEVER_NAME: &str = "postgres-placeRetriever";

/// A [`Retriever`] that asks a [`PlaceLookup`] for the places nearest to the
/// query and turns each row into a [`Document`].
///
/// The query text and `k` are forwarded as they are; `k` becomes the
/// lookup's `limit`. Rows map one-to-one onto documents, in lookup order.
#[derive(Clone)]
pub struct PlaceRetriever {
    lookup: Arc<dyn PlaceLookup>,
}

impl PlaceRetriever {
    pub fn new(lookup: Arc<dyn PlaceLookup>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl Retriever for PlaceRetriever {
    async fn retrieve(
        &self,
        query: &str,
        options: &QueryOptions,
    ) -> Result<Vec<Document>, CompassError> {
        let variables = NearestPlaceVariables::new(query).with_limit(options.k);
        let response = self.lookup.get_nearest_place(variables).await?;

        Ok(response
            .into_rows()
            .into_iter()
            .map(|row| row.into_document())
            .collect())
    }
}

/// Register a [`PlaceRetriever`] backed by `lookup` as
/// [`PLACE_RETRIEVER_NAME`].
pub fn define_place_retriever(
    registry: &RetrieverRegistry,
    lookup: Arc<dyn PlaceLookup>,
) -> Result<RetrieverAction, CompassError> {
    registry.define_retriever(PLACE_RETRIEVER_NAME, Arc::new(PlaceRetriever::new(lookup)))
}
