use async_trait::async_trait;
use compass_core::{CompassError, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of a nearest-place result.
///
/// `knownFor` is the only field the retriever interprets. Every other field
/// is carried through untouched in [`fields`](Self::fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(rename = "knownFor")]
    pub known_for: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Destination {
    pub fn new(known_for: impl Into<String>) -> Self {
        Self {
            known_for: known_for.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// `knownFor` becomes the content; all remaining fields become metadata.
    pub fn into_document(self) -> Document {
        Document::from_text(self.known_for, self.fields.into_iter().collect())
    }
}

/// Variables of the `getNearestPlace` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestPlaceVariables {
    pub place_description: String,
    /// Result limit requested by the caller, sent only when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl NearestPlaceVariables {
    pub fn new(place_description: impl Into<String>) -> Self {
        Self {
            place_description: place_description.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }
}

/// Response envelope of the `getNearestPlace` query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NearestPlaceResponse {
    pub data: NearestPlaceData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NearestPlaceData {
    #[serde(default)]
    pub places_embedding_similarity: Vec<Destination>,
}

impl NearestPlaceResponse {
    pub fn from_rows(rows: Vec<Destination>) -> Self {
        Self {
            data: NearestPlaceData {
                places_embedding_similarity: rows,
            },
        }
    }

    pub fn into_rows(self) -> Vec<Destination> {
        self.data.places_embedding_similarity
    }
}

/// A database client able to run the nearest-place similarity query.
///
/// The similarity search runs entirely on the other side of this trait.
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    async fn get_nearest_place(
        &self,
        variables: NearestPlaceVariables,
    ) -> Result<NearestPlaceResponse, CompassError>;
}
