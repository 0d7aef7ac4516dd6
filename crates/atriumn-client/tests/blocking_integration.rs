//! Blocking client integration tests.
//!
//! The mock server runs on its own runtime; client calls happen on the test
//! thread, outside any async context.
#![cfg(feature = "blocking")]

use atriumn_client::{ClientBuilder, Error, ErrorKind, Protocol, RecommendModel};
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn start(rt: &Runtime, mock: Mock) -> MockServer {
    rt.block_on(async {
        let server = MockServer::start().await;
        mock.mount(&server).await;
        server
    })
}

#[test]
fn test_blocking_recommend_model() {
    let rt = Runtime::new().unwrap();
    let server = start(
        &rt,
        Mock::given(method("POST"))
            .and(path("/tasks/execute"))
            .and(header("x-api-key", "test-api-key"))
            .and(body_json(json!({
                "task": "recommend_model",
                "app": "axiomiq",
                "input": {"priority": "lowest_cost", "input_tokens": 1000, "output_tokens": 500}
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"model": "gpt-4", "cost": 0.01})),
            ),
    );

    let client = ClientBuilder::new()
        .base_url(server.uri())
        .api_key("test-api-key")
        .use_env(false)
        .build_blocking()
        .unwrap();

    let result = client
        .recommend_model("axiomiq", RecommendModel::new())
        .unwrap();
    assert_eq!(Value::Object(result), json!({"model": "gpt-4", "cost": 0.01}));
}

#[test]
fn test_blocking_prompt_protocol_auth_error() {
    let rt = Runtime::new().unwrap();
    let server = start(
        &rt,
        Mock::given(method("POST"))
            .and(path("/v1/prompt"))
            .and(header("authorization", "Bearer wrong-key"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid API key"})),
            ),
    );

    let client = ClientBuilder::new()
        .protocol(Protocol::PROMPT)
        .base_url(server.uri())
        .api_key("wrong-key")
        .use_env(false)
        .build_blocking()
        .unwrap();

    let err = client.run_task("test", "test", json!({})).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert!(err.to_string().contains("Authentication failed"));
}

#[test]
fn test_blocking_validation_error_uses_detail() {
    let rt = Runtime::new().unwrap();
    let server = start(
        &rt,
        Mock::given(method("POST")).respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Invalid task name"})),
        ),
    );

    let client = ClientBuilder::new()
        .base_url(server.uri())
        .use_env(false)
        .build_blocking()
        .unwrap();

    let err = client
        .run_task("invalid_task", "test", json!({}))
        .unwrap_err();
    assert!(err.is_validation_error());
    assert!(err.to_string().contains("Invalid task name"));
}

#[test]
fn test_blocking_sequential_reuse_and_close() {
    let rt = Runtime::new().unwrap();
    let server = start(
        &rt,
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(3),
    );

    let mut client = ClientBuilder::new()
        .base_url(server.uri())
        .use_env(false)
        .build_blocking()
        .unwrap();

    for i in 0..3 {
        let result = client.run_task("t", "a", json!({"i": i})).unwrap();
        assert_eq!(result["ok"], json!(true));
    }

    client.close();
    let err = client.run_task("t", "a", json!({})).unwrap_err();
    assert!(matches!(err, Error::Closed));
    assert_eq!(client.config().base_url(), server.uri());
}

#[test]
fn test_blocking_connection_failure() {
    let client = ClientBuilder::new()
        .base_url("http://127.0.0.1:1")
        .use_env(false)
        .build_blocking()
        .unwrap();

    let err = client.run_task("t", "a", json!({})).unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
