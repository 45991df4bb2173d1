/// Default Data Connect REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://firebasedataconnect.googleapis.com/v1beta";

/// Default name of the nearest-place query operation.
pub const DEFAULT_OPERATION_NAME: &str = "getNearestPlace";

/// Configuration for connecting to a Data Connect service.
#[derive(Debug, Clone)]
pub struct DataConnectConfig {
    /// Google Cloud project ID.
    pub project_id: String,
    /// Service location, such as `us-central1`.
    pub location: String,
    /// Data Connect service ID.
    pub service_id: String,
    /// Connector that defines the query operations.
    pub connector_id: String,
    /// REST base URL (default: [`DEFAULT_BASE_URL`]). Point it at the local
    /// emulator, e.g. `http://127.0.0.1:9399/v1beta`, for development.
    pub base_url: String,
    /// OAuth2 bearer token sent with every request, if set.
    pub access_token: Option<String>,
    /// Query executed by the place lookup (default: [`DEFAULT_OPERATION_NAME`]).
    pub operation_name: String,
}

impl DataConnectConfig {
    /// Create a new config for the given service coordinates.
    pub fn new(
        project_id: impl Into<String>,
        location: impl Into<String>,
        service_id: impl Into<String>,
        connector_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            location: location.into(),
            service_id: service_id.into(),
            connector_id: connector_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            operation_name: DEFAULT_OPERATION_NAME.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = name.into();
        self
    }

    /// URL of the connector's `executeQuery` method.
    pub fn execute_query_url(&self) -> String {
        format!(
            "{}/projects/{}/locations/{}/services/{}/connectors/{}:executeQuery",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            self.location,
            self.service_id,
            self.connector_id,
        )
    }
}
