use async_trait::async_trait;
use compass_core::CompassError;
use compass_places::{NearestPlaceData, NearestPlaceResponse, NearestPlaceVariables, PlaceLookup};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::DataConnectConfig;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteQueryRequest<'a, V> {
    operation_name: &'a str,
    variables: &'a V,
}

#[derive(Deserialize)]
struct ExecuteQueryResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

/// A client for the Data Connect `executeQuery` REST method.
///
/// Cloning is cheap; clones share the underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub struct DataConnectClient {
    config: DataConnectConfig,
    client: reqwest::Client,
}

impl DataConnectClient {
    pub fn new(config: DataConnectConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured HTTP client, e.g. one with a request timeout.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn config(&self) -> &DataConnectConfig {
        &self.config
    }

    /// Execute a named query operation and decode its `data` payload.
    pub async fn execute_query<V, T>(
        &self,
        operation: &str,
        variables: &V,
    ) -> Result<T, CompassError>
    where
        V: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.config.execute_query_url();
        let body = ExecuteQueryRequest {
            operation_name: operation,
            variables,
        };

        tracing::debug!(operation = %operation, url = %url, "executing data connect query");

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = &self.config.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CompassError::Lookup(format!("Data Connect request failed: {e}")))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            CompassError::Lookup(format!("failed to read Data Connect response: {e}"))
        })?;

        if !status.is_success() {
            return Err(CompassError::Lookup(format!(
                "Data Connect API error (HTTP {status}): {text}"
            )));
        }

        decode_response(operation, &text)
    }
}

fn decode_response<T: DeserializeOwned>(operation: &str, text: &str) -> Result<T, CompassError> {
    let parsed: ExecuteQueryResponse<T> = serde_json::from_str(text).map_err(|e| {
        CompassError::Lookup(format!("failed to parse Data Connect response: {e}"))
    })?;

    if !parsed.errors.is_empty() {
        let messages: Vec<&str> = parsed.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(CompassError::Lookup(format!(
            "query '{operation}' failed: {}",
            messages.join("; ")
        )));
    }

    parsed
        .data
        .ok_or_else(|| CompassError::Lookup(format!("query '{operation}' returned no data")))
}

#[async_trait]
impl PlaceLookup for DataConnectClient {
    async fn get_nearest_place(
        &self,
        variables: NearestPlaceVariables,
    ) -> Result<NearestPlaceResponse, CompassError> {
        let data: NearestPlaceData = self
            .execute_query(&self.config.operation_name, &variables)
            .await?;
        Ok(NearestPlaceResponse { data })
    }
}
