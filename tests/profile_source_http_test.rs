//! `HttpProfileSource` against a mock profile store.

use std::time::Duration;

use leaderboard_enrichment::adapters::profile_source::HttpProfileSource;
use leaderboard_enrichment::{
    Member, ProfileQuery, ProfileSource, ProfileSourceConfig, ProfileSourceError, RequestContext,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOCUMENTS_PATH: &str = "/get-public-documents/wildlife-platform-player-profile";

fn source_for(server: &MockServer, timeout_ms: u64) -> HttpProfileSource {
    let config = ProfileSourceConfig {
        base_url: server.uri(),
        timeout_ms,
        ..Default::default()
    };
    HttpProfileSource::new(&config).unwrap()
}

fn request(ids: &[&str]) -> ProfileQuery {
    let members = ids
        .iter()
        .zip(1..)
        .map(|(id, rank)| Member::new(*id, rank, 100))
        .collect();
    ProfileQuery::new("t1", "lb1", members)
}

#[tokio::test]
async fn test_successful_batch_lookup() {
    let mock_server = MockServer::start().await;

    let response_json = serde_json::json!({
        "documents": [
            {
                "accountId": "m1",
                "data": {"player_name": "Alice", "picture_url": "http://x/a.png", "country": "PT"}
            }
        ]
    });

    Mock::given(method("POST"))
        .and(path(DOCUMENTS_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "tenant_id": "t1",
            "public_account_ids": ["m1", "m2"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response_json))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server, 500);
    let response = source
        .fetch(&RequestContext::new(), &request(&["m1", "m2"]))
        .await
        .unwrap();

    assert_eq!(response.documents.len(), 1);
    let profile = response.documents[0].profile();
    assert_eq!(response.documents[0].account_id, "m1");
    assert_eq!(profile.display_name.as_deref(), Some("Alice"));
    assert_eq!(profile.avatar_url.as_deref(), Some("http://x/a.png"));
}

#[tokio::test]
async fn test_empty_documents_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"documents": []})))
        .mount(&mock_server)
        .await;

    let response = source_for(&mock_server, 500)
        .fetch(&RequestContext::new(), &request(&["ghost"]))
        .await
        .unwrap();

    assert!(response.documents.is_empty());
}

#[tokio::test]
async fn test_server_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let err = source_for(&mock_server, 500)
        .fetch(&RequestContext::new(), &request(&["m1"]))
        .await
        .unwrap_err();

    assert!(err.is_server_error());
    assert!(matches!(
        err,
        ProfileSourceError::Status { status: 503, ref body } if body == "maintenance"
    ));
}

#[tokio::test]
async fn test_client_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = source_for(&mock_server, 500)
        .fetch(&RequestContext::new(), &request(&["m1"]))
        .await
        .unwrap_err();

    assert!(!err.is_server_error());
    assert!(matches!(err, ProfileSourceError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let err = source_for(&mock_server, 500)
        .fetch(&RequestContext::new(), &request(&["m1"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ProfileSourceError::Decode(_)));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"documents": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let err = source_for(&mock_server, 50)
        .fetch(&RequestContext::new(), &request(&["m1"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ProfileSourceError::Request(ref e) if e.is_timeout()));
}

#[tokio::test]
async fn test_unreachable_upstream_is_a_request_error() {
    let config = ProfileSourceConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        ..Default::default()
    };
    let source = HttpProfileSource::new(&config).unwrap();

    let err = source
        .fetch(&RequestContext::new(), &request(&["m1"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ProfileSourceError::Request(_)));
}
