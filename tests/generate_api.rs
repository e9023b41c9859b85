//! End-to-end tests of the HTTP surface against a mocked upstream API.
//!
//! Each test binds the real router on an ephemeral port and points its
//! client at a wiremock stand-in for the completion API.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use studyaid::client::SolarClient;
use studyaid::generate::MAX_INPUT_CHARS;
use studyaid::server::{serve, AppState};

fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test-123",
        "object": "chat.completion",
        "created": 1699999999,
        "model": "solar-pro2",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

/// Spawns the service on an ephemeral port; returns its base URL.
async fn spawn_app(upstream_url: &str) -> String {
    let client = SolarClient::builder()
        .api_key("up_test_key_12345")
        .base_url(upstream_url)
        .build()
        .unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        serve(listener, AppState::new(client)).await.unwrap();
    });

    format!("http://{addr}")
}

/// Mounts one distinct upstream response per generation kind, matched on a
/// phrase unique to that kind's prompt template.
async fn mount_all_kinds(upstream: &MockServer) {
    for (phrase, content) in [
        ("Summarize the key content", "SUMMARY TEXT"),
        ("Create a quiz", "QUIZ TEXT"),
        ("propose 2 assignment", "ASSIGNMENTS TEXT"),
    ] {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains(phrase))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
            .mount(upstream)
            .await;
    }
}

#[tokio::test]
async fn health_is_independent_of_upstream_availability() {
    // Upstream points at a closed port; health must not care.
    let app = spawn_app("http://127.0.0.1:1").await;

    let response = reqwest::get(format!("{app}/health")).await.unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn single_modes_populate_exactly_their_field() {
    let upstream = MockServer::start().await;
    mount_all_kinds(&upstream).await;
    let app = spawn_app(&upstream.uri()).await;
    let http = reqwest::Client::new();

    for (mode, populated) in [
        ("summary", "summary"),
        ("quiz", "quiz"),
        ("assignments", "assignments"),
    ] {
        let response = http
            .post(format!("{app}/api/generate"))
            .json(&json!({"text": "lecture notes", "mode": mode}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200, "mode {mode}");
        let body: Value = response.json().await.unwrap();
        let object = body.as_object().unwrap();

        for field in ["summary", "quiz", "assignments"] {
            assert!(object.contains_key(field), "mode {mode} must include {field}");
            if field == populated {
                assert!(object[field].is_string(), "mode {mode} field {field}");
            } else {
                assert!(object[field].is_null(), "mode {mode} field {field}");
            }
        }
    }
}

#[tokio::test]
async fn mode_all_populates_every_field() {
    let upstream = MockServer::start().await;
    mount_all_kinds(&upstream).await;
    let app = spawn_app(&upstream.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{app}/api/generate"))
        .json(&json!({"text": "lecture notes", "mode": "all"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["summary"], "SUMMARY TEXT");
    assert_eq!(body["quiz"], "QUIZ TEXT");
    assert_eq!(body["assignments"], "ASSIGNMENTS TEXT");

    assert_eq!(upstream.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn mode_defaults_to_all_when_omitted() {
    let upstream = MockServer::start().await;
    mount_all_kinds(&upstream).await;
    let app = spawn_app(&upstream.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{app}/api/generate"))
        .json(&json!({"text": "lecture notes"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body["summary"].is_string());
    assert!(body["quiz"].is_string());
    assert!(body["assignments"].is_string());
}

#[tokio::test]
async fn blank_text_yields_400_without_calling_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&upstream)
        .await;
    let app = spawn_app(&upstream.uri()).await;
    let http = reqwest::Client::new();

    for text in ["", "   ", "\n\t"] {
        for mode in ["summary", "quiz", "assignments", "all"] {
            let response = http
                .post(format!("{app}/api/generate"))
                .json(&json!({"text": text, "mode": mode}))
                .send()
                .await
                .unwrap();

            assert_eq!(response.status(), 400, "text {text:?} mode {mode}");
            let body: Value = response.json().await.unwrap();
            assert!(body["detail"].is_string());
        }
    }
}

#[tokio::test]
async fn unknown_mode_is_a_client_error() {
    let upstream = MockServer::start().await;
    let app = spawn_app(&upstream.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{app}/api/generate"))
        .json(&json!({"text": "lecture notes", "mode": "flashcards"}))
        .send()
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn upstream_failure_yields_500_with_no_partial_fields() {
    let upstream = MockServer::start().await;
    // Summary succeeds, quiz fails: the whole request must fail.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Summarize the key content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("SUMMARY TEXT")))
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Create a quiz"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&upstream)
        .await;
    let app = spawn_app(&upstream.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{app}/api/generate"))
        .json(&json!({"text": "lecture notes", "mode": "all"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    // Generic detail only: no partial results, no upstream error detail.
    assert_eq!(body, json!({"detail": "upstream completion call failed"}));

    // Assignments was never attempted after the quiz call failed.
    assert_eq!(upstream.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn upstream_auth_failure_is_a_generic_500() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Invalid API key", "type": "invalid_request_error"}
        })))
        .mount(&upstream)
        .await;
    let app = spawn_app(&upstream.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{app}/api/generate"))
        .json(&json!({"text": "lecture notes", "mode": "summary"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "upstream completion call failed");
    assert!(!body["detail"].as_str().unwrap().contains("API key"));
}

#[tokio::test]
async fn oversized_text_behaves_like_pre_truncated_text() {
    let long_text = "k".repeat(MAX_INPUT_CHARS + 321);
    let truncated: String = long_text.chars().take(MAX_INPUT_CHARS).collect();

    let mut upstream_bodies = Vec::new();
    for text in [long_text.as_str(), truncated.as_str()] {
        let upstream = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
            .mount(&upstream)
            .await;
        let app = spawn_app(&upstream.uri()).await;

        let response = reqwest::Client::new()
            .post(format!("{app}/api/generate"))
            .json(&json!({"text": text, "mode": "summary"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let requests = upstream.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        upstream_bodies.push(serde_json::from_slice::<Value>(&requests[0].body).unwrap());
    }

    // Identical upstream request: truncation is invisible to the API.
    assert_eq!(upstream_bodies[0], upstream_bodies[1]);
}

#[tokio::test]
async fn cors_is_fully_permissive() {
    let upstream = MockServer::start().await;
    let app = spawn_app(&upstream.uri()).await;

    let response = reqwest::Client::new()
        .get(format!("{app}/health"))
        .header("Origin", "http://anywhere.example")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    // Credentials stay disabled with the wildcard origin.
    assert!(response
        .headers()
        .get("access-control-allow-credentials")
        .is_none());
}
