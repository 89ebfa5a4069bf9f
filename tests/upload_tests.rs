//! Upload pipeline integration tests
//!
//! Runs the use case over the real HTTP transport against a mock backend
//! that plays both the location endpoint and the presigned target.

use std::time::{Duration, Instant};

use memo_relay::application::ports::UploadError;
use memo_relay::application::UploadMediaUseCase;
use memo_relay::domain::media::{MediaKind, RecordingPayload};
use memo_relay::domain::upload::UploadState;
use memo_relay::infrastructure::HttpStorageTransport;
use reqwest::Url;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_bytes, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn use_case(server: &MockServer, token: Option<&str>) -> UploadMediaUseCase<HttpStorageTransport> {
    use_case_with_timeout(server, token, Duration::from_secs(5))
}

fn use_case_with_timeout(
    server: &MockServer,
    token: Option<&str>,
    timeout: Duration,
) -> UploadMediaUseCase<HttpStorageTransport> {
    let endpoint = Url::parse(&format!("{}/presign", server.uri())).unwrap();
    let transport = HttpStorageTransport::new(endpoint, token.map(str::to_string), timeout).unwrap();
    UploadMediaUseCase::new(transport)
}

fn ogg_payload() -> RecordingPayload {
    RecordingPayload::new(b"OggS fake audio".to_vec(), MediaKind::Audio, "audio/ogg")
}

#[tokio::test]
async fn uploads_and_returns_public_url() {
    let server = MockServer::start().await;
    let upload_url = format!("{}/bucket/object?sig=abc", server.uri());

    Mock::given(method("POST"))
        .and(path("/presign"))
        .and(header("authorization", "Bearer secret-token"))
        .and(body_partial_json(json!({ "contentType": "audio/ogg" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uploadUrl": upload_url,
            "finalUrl": "https://cdn.example.com/object.ogg",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/bucket/object"))
        .and(header("content-type", "audio/ogg"))
        .and(body_bytes(b"OggS fake audio".to_vec()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let output = use_case(&server, Some("secret-token"))
        .upload_media(&ogg_payload(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(output.public_url.as_str(), "https://cdn.example.com/object.ogg");
    assert_eq!(output.mime_type, "audio/ogg");
    assert!(output.file_name.starts_with("recording-"));
    assert!(output.file_name.ends_with(".ogg"));
    assert_eq!(output.attempts, 1);
    assert_eq!(output.history.last(), Some(&UploadState::Uploaded));
}

#[tokio::test]
async fn single_url_serves_as_target_and_public_address() {
    let server = MockServer::start().await;
    let url = format!("{}/bucket/shared", server.uri());

    Mock::given(method("POST"))
        .and(path("/presign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": url })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/bucket/shared"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let output = use_case(&server, None)
        .upload_media(&ogg_payload(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(output.public_url.as_str(), url);
}

#[tokio::test]
async fn missing_upload_target_never_writes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/presign"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "finalUrl": "https://cdn.example.com/x" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = use_case(&server, None)
        .upload_media(&ogg_payload(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::LocationDenied(_)));
}

#[tokio::test]
async fn missing_public_address_fails_after_write() {
    let server = MockServer::start().await;
    let upload_url = format!("{}/bucket/object", server.uri());

    Mock::given(method("POST"))
        .and(path("/presign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uploadUrl": upload_url })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/bucket/object"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let err = use_case(&server, None)
        .upload_media(&ogg_payload(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::FinalUrlMissing));
}

#[tokio::test]
async fn refused_location_request_is_denied() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/presign"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = use_case(&server, None)
        .upload_media(&ogg_payload(), &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        UploadError::LocationDenied(message) => assert!(message.contains("403")),
        other => panic!("Expected LocationDenied, got {:?}", other),
    }
}

#[tokio::test]
async fn server_error_on_location_request_is_denied() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/presign"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = use_case(&server, None)
        .upload_media(&ogg_payload(), &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        UploadError::LocationDenied(message) => {
            assert!(message.contains("503"));
            assert!(message.contains("maintenance"));
        }
        other => panic!("Expected LocationDenied, got {:?}", other),
    }
}

#[tokio::test]
async fn slow_location_endpoint_times_out_as_network_error() {
    let server = MockServer::start().await;
    let url = format!("{}/bucket/late", server.uri());

    Mock::given(method("POST"))
        .and(path("/presign"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "url": url }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = use_case_with_timeout(&server, None, Duration::from_millis(300))
        .upload_media(&ogg_payload(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::Transport(_)), "got {:?}", err);
}

#[tokio::test]
async fn cancelling_during_write_ends_upload_promptly() {
    let server = MockServer::start().await;
    let url = format!("{}/bucket/slow", server.uri());

    Mock::given(method("POST"))
        .and(path("/presign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": url })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/bucket/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let err = use_case(&server, None)
        .upload_media(&ogg_payload(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::Cancelled), "got {:?}", err);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn rejected_write_reports_status_and_body() {
    let server = MockServer::start().await;
    let upload_url = format!("{}/bucket/object", server.uri());

    Mock::given(method("POST"))
        .and(path("/presign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uploadUrl": upload_url,
            "finalUrl": "https://cdn.example.com/object",
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403).set_body_string("SignatureDoesNotMatch"))
        .mount(&server)
        .await;

    let err = use_case(&server, None)
        .upload_media(&ogg_payload(), &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        UploadError::UploadRejected { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("SignatureDoesNotMatch"));
        }
        other => panic!("Expected UploadRejected, got {:?}", other),
    }
}

#[tokio::test]
async fn mp4_container_wins_over_video_default() {
    let server = MockServer::start().await;
    let url = format!("{}/bucket/clip", server.uri());

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "contentType": "video/mp4" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": url })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(header("content-type", "video/mp4"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let payload = RecordingPayload::new(vec![0u8; 32], MediaKind::Video, "video/mp4");
    let output = use_case(&server, None)
        .upload_media(&payload, &CancellationToken::new())
        .await
        .unwrap();

    assert!(output.file_name.ends_with(".mp4"));
}

#[tokio::test]
async fn same_payload_twice_stores_twice() {
    let server = MockServer::start().await;
    let url = format!("{}/bucket/dup", server.uri());

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": url })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let use_case = use_case(&server, None);
    let payload = ogg_payload();
    let first = use_case
        .upload_media(&payload, &CancellationToken::new())
        .await
        .unwrap();
    let second = use_case
        .upload_media(&payload, &CancellationToken::new())
        .await
        .unwrap();

    assert_ne!(first.file_name, second.file_name);
}

#[tokio::test]
async fn cancelled_upload_stops_before_location_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = use_case(&server, None)
        .upload_media(&ogg_payload(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::Cancelled));
}
