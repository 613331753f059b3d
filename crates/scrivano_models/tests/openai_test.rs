//! OpenAI adapter tests against a mock HTTP server.
//!
//! Run `cargo test --features api` to also exercise the live endpoint
//! (requires OPENAI_API_KEY).

use mockito::{Matcher, Server, ServerGuard};
use scrivano_core::{CompletionRequest, FinishReason};
use scrivano_error::{BackendErrorKind, ScrivanoError, ScrivanoErrorKind};
use scrivano_interface::TextGenerator;
use scrivano_models::{OpenAiClient, OpenAiConfig, RetryConfig};
use serde_json::json;

fn test_config(server: &ServerGuard, retry_attempts: u32) -> OpenAiConfig {
    OpenAiConfig {
        api_url: format!("{}/v1/completions", server.url()),
        model: "gpt-3.5-turbo-instruct".to_string(),
        max_tokens: 800,
        timeout_secs: 5,
        requests_per_minute: None,
        retry: RetryConfig {
            max_attempts: retry_attempts,
            base_delay_ms: 1,
            max_delay_ms: 5,
        },
    }
}

fn request(prompt: &str) -> CompletionRequest {
    CompletionRequest::builder()
        .prompt(prompt)
        .temperature(0.5f32)
        .build()
        .expect("valid request")
}

fn backend_kind(err: &ScrivanoError) -> BackendErrorKind {
    match err.kind() {
        ScrivanoErrorKind::Backend(backend) => *backend.kind(),
        other => panic!("expected backend error, got {other}"),
    }
}

#[tokio::test]
async fn test_successful_completion_maps_text_and_finish_reason() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/completions")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-3.5-turbo-instruct",
            "prompt": "Write me a Youtube video title about volcanoes",
            "temperature": 0.5,
            "max_tokens": 800,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "cmpl-test",
                "object": "text_completion",
                "model": "gpt-3.5-turbo-instruct",
                "choices": [
                    {"text": "Fire Mountains Explained", "index": 0, "finish_reason": "stop"}
                ],
                "usage": {"prompt_tokens": 9, "completion_tokens": 4, "total_tokens": 13}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = OpenAiClient::with_api_key("test-key", &test_config(&server, 0))
        .expect("client builds");
    let response = client
        .generate(&request("Write me a Youtube video title about volcanoes"))
        .await
        .expect("completion succeeds");

    assert_eq!(response.text(), "Fire Mountains Explained");
    assert_eq!(*response.finish_reason(), FinishReason::Stop);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/completions")
        .with_status(401)
        .with_body(r#"{"error": {"message": "Incorrect API key provided"}}"#)
        .create_async()
        .await;

    let client =
        OpenAiClient::with_api_key("bad-key", &test_config(&server, 0)).expect("client builds");
    let err = client.generate(&request("hi")).await.expect_err("401");

    assert_eq!(backend_kind(&err), BackendErrorKind::Auth);
}

#[tokio::test]
async fn test_rate_limited_maps_to_quota() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/completions")
        .with_status(429)
        .with_body(r#"{"error": {"message": "Rate limit reached"}}"#)
        .create_async()
        .await;

    let client =
        OpenAiClient::with_api_key("test-key", &test_config(&server, 0)).expect("client builds");
    let err = client.generate(&request("hi")).await.expect_err("429");

    assert_eq!(backend_kind(&err), BackendErrorKind::Quota);
}

#[tokio::test]
async fn test_server_error_maps_to_network() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let client =
        OpenAiClient::with_api_key("test-key", &test_config(&server, 0)).expect("client builds");
    let err = client.generate(&request("hi")).await.expect_err("500");

    assert_eq!(backend_kind(&err), BackendErrorKind::Network);
}

#[tokio::test]
async fn test_malformed_body_maps_to_network() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("definitely not json")
        .create_async()
        .await;

    let client =
        OpenAiClient::with_api_key("test-key", &test_config(&server, 0)).expect("client builds");
    let err = client.generate(&request("hi")).await.expect_err("bad body");

    assert_eq!(backend_kind(&err), BackendErrorKind::Network);
}

#[tokio::test]
async fn test_empty_choices_maps_to_network() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "cmpl-empty", "choices": []}"#)
        .create_async()
        .await;

    let client =
        OpenAiClient::with_api_key("test-key", &test_config(&server, 0)).expect("client builds");
    let err = client.generate(&request("hi")).await.expect_err("no choices");

    assert_eq!(backend_kind(&err), BackendErrorKind::Network);
    assert!(format!("{err}").contains("no choices"));
}

#[tokio::test]
async fn test_transient_failures_are_retried_to_exhaustion() {
    let mut server = Server::new_async().await;
    // Two retries after the first attempt: three hits in total.
    let mock = server
        .mock("POST", "/v1/completions")
        .with_status(500)
        .with_body("flaky")
        .expect(3)
        .create_async()
        .await;

    let client =
        OpenAiClient::with_api_key("test-key", &test_config(&server, 2)).expect("client builds");
    let err = client.generate(&request("hi")).await.expect_err("all 500");

    assert_eq!(backend_kind(&err), BackendErrorKind::Network);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_auth_failures_are_never_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/completions")
        .with_status(401)
        .with_body("nope")
        .expect(1)
        .create_async()
        .await;

    let client =
        OpenAiClient::with_api_key("bad-key", &test_config(&server, 3)).expect("client builds");
    let err = client.generate(&request("hi")).await.expect_err("401");

    assert_eq!(backend_kind(&err), BackendErrorKind::Auth);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_endpoint_maps_to_network() {
    let config = OpenAiConfig {
        api_url: "http://127.0.0.1:1/v1/completions".to_string(),
        timeout_secs: 2,
        retry: RetryConfig {
            max_attempts: 0,
            base_delay_ms: 1,
            max_delay_ms: 5,
        },
        ..OpenAiConfig::default()
    };

    let client = OpenAiClient::with_api_key("test-key", &config).expect("client builds");
    let err = client.generate(&request("hi")).await.expect_err("refused");

    let kind = backend_kind(&err);
    assert!(
        kind == BackendErrorKind::Network || kind == BackendErrorKind::Timeout,
        "got {kind}"
    );
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_completion_round_trip() {
    dotenvy::dotenv().ok();

    let client = OpenAiClient::from_env(&OpenAiConfig::default()).expect("OPENAI_API_KEY set");
    let response = client
        .generate(&request("Reply with the single word: hello"))
        .await
        .expect("live completion succeeds");

    assert!(!response.text().trim().is_empty());
}
