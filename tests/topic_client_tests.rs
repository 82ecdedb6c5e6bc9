/// Tests for the HTTP topic client against a mocked topic gateway
use review_enrichment_api::errors::AppError;
use review_enrichment_api::topic_client::{HttpTopicClient, TopicClient, CORRELATION_HEADER};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(base_url: String, token: Option<&str>) -> HttpTopicClient {
    HttpTopicClient::new(base_url, token.map(str::to_string), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_reply_payload_is_returned() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/topics/user-service/request"))
        .and(body_json(json!({"userId": 7})))
        .and(header_exists(CORRELATION_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Ann"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = client(mock_server.uri(), None)
        .request_topic("user-service", json!({"userId": 7}))
        .await
        .unwrap();

    assert_eq!(reply, Some(json!({"name": "Ann"})));
}

#[tokio::test]
async fn test_gateway_token_sent_as_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/topics/genre-service/request"))
        .and(header("Authorization", "Bearer gateway-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "Drama"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = client(mock_server.uri(), Some("gateway-token"))
        .request_topic("genre-service", json!({"reviewId": 42}))
        .await
        .unwrap();

    assert_eq!(reply, Some(json!([{"name": "Drama"}])));
}

#[tokio::test]
async fn test_no_content_and_not_found_mean_no_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/topics/user-service/request"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/topics/media-service/request"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client(mock_server.uri(), None);
    assert_eq!(
        client
            .request_topic("user-service", json!({"userId": 1}))
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        client
            .request_topic("media-service", json!({"mediaId": 1}))
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_null_reply_means_no_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/topics/media-service/request"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&mock_server)
        .await;

    let reply = client(mock_server.uri(), None)
        .request_topic("media-service", json!({"mediaId": 9}))
        .await
        .unwrap();

    assert_eq!(reply, None);
}

#[tokio::test]
async fn test_empty_reply_body_means_no_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/topics/user-service/request"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/topics/genre-service/request"))
        .respond_with(ResponseTemplate::new(200).set_body_string(" \n"))
        .mount(&mock_server)
        .await;

    let client = client(mock_server.uri(), None);
    assert_eq!(
        client
            .request_topic("user-service", json!({"userId": 7}))
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        client
            .request_topic("genre-service", json!({"reviewId": 42}))
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_gateway_error_is_external_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/topics/media-service/request"))
        .respond_with(ResponseTemplate::new(503).set_body_string("broker down"))
        .mount(&mock_server)
        .await;

    let result = client(mock_server.uri(), None)
        .request_topic("media-service", json!({"mediaId": 9}))
        .await;

    match result {
        Err(AppError::ExternalApiError(msg)) => {
            assert!(msg.contains("media-service"));
            assert!(msg.contains("503"));
        }
        other => panic!("expected ExternalApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unparseable_reply_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/topics/user-service/request"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let result = client(mock_server.uri(), None)
        .request_topic("user-service", json!({"userId": 7}))
        .await;

    assert!(matches!(result, Err(AppError::ExternalApiError(_))));
}

#[tokio::test]
async fn test_unreachable_gateway_is_error() {
    // Nothing listens on this port once the listener is dropped
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let result = client(uri, None)
        .request_topic("user-service", json!({"userId": 7}))
        .await;

    assert!(matches!(result, Err(AppError::ExternalApiError(_))));
}
