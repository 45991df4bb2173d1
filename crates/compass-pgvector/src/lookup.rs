use std::sync::Arc;

use async_trait::async_trait;
use compass_core::{CompassError, Embeddings};
use compass_places::{Destination, NearestPlaceResponse, NearestPlaceVariables, PlaceLookup};
use pgvector::Vector;
use serde_json::Value;
use sqlx::PgPool;

/// Configuration for a [`PgPlaceLookup`] table.
#[derive(Debug, Clone)]
pub struct PgPlaceConfig {
    /// Name of the PostgreSQL table holding the places.
    pub table_name: String,
    /// Text column returned as the row's `knownFor` (default: `known_for`).
    pub content_column: String,
    /// pgvector column compared against the query embedding (default: `embedding`).
    pub embedding_column: String,
    /// Row limit used when the caller does not request one (default: 5).
    pub default_limit: u32,
}

impl PgPlaceConfig {
    /// Create a new configuration with the default column names.
    ///
    /// # Panics
    ///
    /// Panics if `table_name` is empty.
    pub fn new(table_name: impl Into<String>) -> Self {
        let table_name = table_name.into();
        assert!(!table_name.is_empty(), "table_name must not be empty");
        Self {
            table_name,
            content_column: "known_for".to_string(),
            embedding_column: "embedding".to_string(),
            default_limit: 5,
        }
    }

    pub fn with_content_column(mut self, column: impl Into<String>) -> Self {
        self.content_column = column.into();
        self
    }

    pub fn with_embedding_column(mut self, column: impl Into<String>) -> Self {
        self.embedding_column = column.into();
        self
    }

    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }
}

/// A [`PlaceLookup`] that runs the nearest-place query directly against a
/// PostgreSQL table with the pgvector extension.
///
/// The place description is embedded with the injected [`Embeddings`] and
/// rows are ordered by cosine distance (`<=>`) to it. Every column except the
/// embedding is returned: the content column as `knownFor`, the rest as
/// metadata under their column names.
pub struct PgPlaceLookup {
    pool: PgPool,
    config: PgPlaceConfig,
    embeddings: Arc<dyn Embeddings>,
}

impl PgPlaceLookup {
    pub fn new(pool: PgPool, config: PgPlaceConfig, embeddings: Arc<dyn Embeddings>) -> Self {
        Self {
            pool,
            config,
            embeddings,
        }
    }

    /// Return a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Return a reference to the configuration.
    pub fn config(&self) -> &PgPlaceConfig {
        &self.config
    }
}

#[async_trait]
impl PlaceLookup for PgPlaceLookup {
    async fn get_nearest_place(
        &self,
        variables: NearestPlaceVariables,
    ) -> Result<NearestPlaceResponse, CompassError> {
        let sql = nearest_place_sql(&self.config)?;
        let limit = variables.limit.unwrap_or(self.config.default_limit);

        let query_vec = self
            .embeddings
            .embed_query(&variables.place_description)
            .await?;

        tracing::debug!(table = %self.config.table_name, limit, "querying nearest places");

        let rows: Vec<(Value,)> = sqlx::query_as(&sql)
            .bind(Vector::from(query_vec))
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CompassError::Lookup(format!("nearest place query failed: {e}")))?;

        let places = rows
            .into_iter()
            .map(|(row,)| row_to_destination(row, &self.config.content_column))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NearestPlaceResponse::from_rows(places))
    }
}

/// Build the similarity query for `config`, validating every interpolated
/// identifier.
fn nearest_place_sql(config: &PgPlaceConfig) -> Result<String, CompassError> {
    validate_table_name(&config.table_name)?;
    validate_column_name(&config.embedding_column)?;
    validate_column_name(&config.content_column)?;

    Ok(format!(
        r#"SELECT to_jsonb(t) - '{embedding}' AS place
           FROM {table} t
           ORDER BY t.{embedding} <=> $1::vector
           LIMIT $2"#,
        table = config.table_name,
        embedding = config.embedding_column,
    ))
}

/// Convert one `to_jsonb` row into a [`Destination`].
fn row_to_destination(row: Value, content_column: &str) -> Result<Destination, CompassError> {
    let mut fields = match row {
        Value::Object(map) => map,
        other => {
            return Err(CompassError::Lookup(format!(
                "expected a JSON object row, got: {other}"
            )))
        }
    };

    let known_for = match fields.remove(content_column) {
        Some(Value::String(text)) => text,
        Some(other) => {
            return Err(CompassError::Lookup(format!(
                "column '{content_column}' must be text, got: {other}"
            )))
        }
        None => {
            return Err(CompassError::Lookup(format!(
                "row is missing column '{content_column}'"
            )))
        }
    };

    Ok(Destination { known_for, fields })
}

/// Validate that a table name is safe to interpolate into SQL.
///
/// Allows alphanumeric ASCII characters, underscores, and dots (for
/// schema-qualified names like `public.places`).
fn validate_table_name(name: &str) -> Result<(), CompassError> {
    if name.is_empty() {
        return Err(CompassError::Config("table name must not be empty".to_string()));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(CompassError::Config(format!(
            "invalid table name '{name}': only alphanumeric, underscore, and dot characters are allowed",
        )));
    }
    Ok(())
}

fn validate_column_name(name: &str) -> Result<(), CompassError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(CompassError::Config(format!(
            "invalid column name '{name}': only alphanumeric and underscore characters are allowed",
        )));
    }
    Ok(())
}
