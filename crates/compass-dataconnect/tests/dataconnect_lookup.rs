//! Lookup tests against a one-shot local HTTP server.
//!
//! The `#[ignore]` test talks to a real Data Connect service or emulator.
//! Set `DATACONNECT_BASE_URL` (e.g. `http://127.0.0.1:9399/v1beta`),
//! `DATACONNECT_PROJECT`, `DATACONNECT_LOCATION`, `DATACONNECT_SERVICE` and
//! `DATACONNECT_CONNECTOR` before running:
//!
//! ```bash
//! cargo test -p compass-dataconnect -- --ignored
//! ```

use std::sync::Arc;

use compass_core::CompassError;
use compass_dataconnect::{DataConnectClient, DataConnectConfig};
use compass_places::{
    NearestPlaceVariables, PlaceLookup, PlaceRetriever, QueryOptions, Retriever,
};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

// ---------------------------------------------------------------------------
// One-shot HTTP server
// ---------------------------------------------------------------------------

/// Accept a single connection, answer it with `status` and `body`, and
/// resolve to the raw request text.
async fn serve_once(status: &'static str, body: Value) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let body = body.to_string();
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{addr}/v1beta"), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn request_body(request: &str) -> Value {
    let (_, body) = request.split_once("\r\n\r\n").expect("request has a body");
    serde_json::from_str(body).expect("request body is JSON")
}

fn client_for(base_url: &str) -> DataConnectClient {
    let config = DataConnectConfig::new("proj", "us-central1", "compass", "default")
        .with_base_url(base_url)
        .with_access_token("test-token");
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    DataConnectClient::new(config).with_http_client(http)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn posts_nearest_place_query() {
    let (base_url, server) = serve_once(
        "200 OK",
        json!({"data": {"places_embedding_similarity": []}}),
    )
    .await;
    let client = client_for(&base_url);

    let response = client
        .get_nearest_place(NearestPlaceVariables::new("lighthouse").with_limit(Some(3)))
        .await
        .unwrap();
    assert!(response.into_rows().is_empty());

    let request = server.await.unwrap();
    assert!(request.starts_with(
        "POST /v1beta/projects/proj/locations/us-central1/services/compass/connectors/default:executeQuery HTTP/1.1"
    ));
    assert!(request
        .to_ascii_lowercase()
        .contains("authorization: bearer test-token"));
    assert_eq!(
        request_body(&request),
        json!({
            "operationName": "getNearestPlace",
            "variables": {"placeDescription": "lighthouse", "limit": 3}
        })
    );
}

#[tokio::test]
async fn retriever_maps_service_rows_to_documents() {
    let (base_url, server) = serve_once(
        "200 OK",
        json!({
            "data": {
                "places_embedding_similarity": [
                    {"knownFor": "historic lighthouse", "name": "Cape Point", "category": "landmark"},
                    {"knownFor": "penguin colony", "name": "Boulders Beach", "category": "beach"}
                ]
            }
        }),
    )
    .await;
    let retriever = PlaceRetriever::new(Arc::new(client_for(&base_url)));

    let docs = retriever
        .retrieve("coastal sights", &QueryOptions::default())
        .await
        .unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].content, "historic lighthouse");
    assert_eq!(docs[0].metadata["name"], json!("Cape Point"));
    assert_eq!(docs[1].metadata["category"], json!("beach"));
    assert!(!docs[1].metadata.contains_key("knownFor"));

    let request = server.await.unwrap();
    assert_eq!(
        request_body(&request)["variables"],
        json!({"placeDescription": "coastal sights"})
    );
}

#[tokio::test]
async fn http_error_is_a_lookup_error() {
    let (base_url, server) = serve_once(
        "403 Forbidden",
        json!({"error": {"code": 403, "message": "permission denied"}}),
    )
    .await;
    let client = client_for(&base_url);

    let err = client
        .get_nearest_place(NearestPlaceVariables::new("anywhere"))
        .await
        .expect_err("should fail");

    assert!(matches!(err, CompassError::Lookup(msg) if msg.contains("HTTP 403")));
    server.await.unwrap();
}

#[tokio::test]
async fn graphql_errors_are_lookup_errors() {
    let (base_url, server) = serve_once(
        "200 OK",
        json!({"data": null, "errors": [{"message": "embedding model unavailable"}]}),
    )
    .await;
    let retriever = PlaceRetriever::new(Arc::new(client_for(&base_url)));

    let err = retriever
        .retrieve("anywhere", &QueryOptions::default())
        .await
        .expect_err("should fail");

    assert!(matches!(err, CompassError::Lookup(msg) if msg.contains("embedding model unavailable")));
    server.await.unwrap();
}

#[tokio::test]
async fn unreachable_service_is_a_lookup_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{addr}/v1beta"));
    let err = client
        .get_nearest_place(NearestPlaceVariables::new("anywhere"))
        .await
        .expect_err("should fail");

    assert!(matches!(err, CompassError::Lookup(msg) if msg.starts_with("Data Connect request failed")));
}

#[tokio::test]
#[ignore] // Requires a Data Connect service or emulator
async fn integration_nearest_place() {
    let base_url = std::env::var("DATACONNECT_BASE_URL").expect("DATACONNECT_BASE_URL must be set");
    let config = DataConnectConfig::new(
        std::env::var("DATACONNECT_PROJECT").expect("DATACONNECT_PROJECT must be set"),
        std::env::var("DATACONNECT_LOCATION").unwrap_or_else(|_| "us-central1".into()),
        std::env::var("DATACONNECT_SERVICE").expect("DATACONNECT_SERVICE must be set"),
        std::env::var("DATACONNECT_CONNECTOR").unwrap_or_else(|_| "default".into()),
    )
    .with_base_url(base_url);
    let retriever = PlaceRetriever::new(Arc::new(DataConnectClient::new(config)));

    let docs = retriever
        .retrieve("historic lighthouse", &QueryOptions::default().with_k(3))
        .await
        .unwrap();

    for doc in &docs {
        assert!(!doc.metadata.contains_key("knownFor"));
    }
}
