//! End-to-end tests for the chat and health endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use counsel_agent::agent::{AgentRegistry, ORCHESTRATOR_AGENT};
use counsel_agent::runtime::RunEvent;
use counsel_agent::runtime::mock::{MockRuntime, ScriptItem};
use counsel_core::extract::{DocumentKind, TextExtractor};
use counsel_core::types::AgentRole;
use counsel_server::handler::routes;
use counsel_server::service::ServiceState;
use serde_json::{Value, json};

/// Extractor that resolves every document to a fixed string.
struct StaticExtractor(&'static str);

#[async_trait]
impl TextExtractor for StaticExtractor {
    async fn extract(&self, _url: &str, _kind: DocumentKind) -> String {
        self.0.to_owned()
    }
}

fn server_with(runtime: MockRuntime, extractor: Arc<dyn TextExtractor>) -> TestServer {
    let registry = Arc::new(AgentRegistry::with_defaults("test-model"));
    let state = ServiceState::new(Arc::new(runtime), registry, extractor);
    TestServer::new(routes(state)).unwrap()
}

fn server(runtime: MockRuntime) -> TestServer {
    server_with(runtime, Arc::new(StaticExtractor("")))
}

/// Parses the SSE body into one JSON value per `data:` line.
fn frames(body: &str) -> Vec<Value> {
    body.lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .map(|json| serde_json::from_str(json).unwrap())
        .collect()
}

fn frame_types(body: &str) -> Vec<String> {
    frames(body)
        .iter()
        .map(|frame| frame["type"].as_str().unwrap().to_owned())
        .collect()
}

fn chat_body(content: &str) -> Value {
    json!({
        "messages": [{"role": "user", "content": content}],
        "selectedChatModel": "test-model"
    })
}

#[tokio::test]
async fn healthz_reports_ok() {
    let server = server(MockRuntime::with_events(vec![]));

    let response = server.get("/healthz").await;
    response.assert_status_ok();
    response.assert_json(&json!({"ok": true}));
}

#[tokio::test]
async fn unknown_route_returns_structured_404() {
    let server = server(MockRuntime::with_events(vec![]));

    let response = server.get("/nope").await;
    assert_eq!(response.status_code(), 404);

    let body: Value = response.json();
    assert_eq!(body["status_code"], 404);
}

#[tokio::test]
async fn chat_streams_ordered_frames() {
    let runtime = MockRuntime::with_events(vec![
        RunEvent::delta("Hel"),
        RunEvent::delta("lo"),
    ]);
    let server = server(runtime);

    let response = server.post("/api/chat").json(&chat_body("hi")).await;
    response.assert_status_ok();

    let types = frame_types(&response.text());
    assert_eq!(
        types,
        vec![
            "start-step",
            "text-start",
            "text-delta",
            "text-delta",
            "text-end",
            "end-step",
            "metrics",
        ]
    );
}

#[tokio::test]
async fn chat_sets_streaming_headers() {
    let server = server(MockRuntime::with_events(vec![]));

    let response = server.post("/api/chat").json(&chat_body("hi")).await;
    response.assert_status_ok();

    let headers = response.headers();
    assert_eq!(headers["cache-control"], "no-cache");
    assert_eq!(headers["x-accel-buffering"], "no");
    assert!(
        headers["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/event-stream")
    );
}

#[tokio::test]
async fn missing_model_yields_error_and_metrics_only() {
    let runtime = MockRuntime::with_events(vec![RunEvent::delta("never")]);
    let server = server(runtime.clone());

    let body = json!({"messages": [{"role": "user", "content": "hi"}]});
    let response = server.post("/api/chat").json(&body).await;
    response.assert_status_ok();

    let types = frame_types(&response.text());
    assert_eq!(types, vec!["error", "metrics"]);

    // No agent run ever starts.
    assert!(runtime.runs().is_empty());
}

#[tokio::test]
async fn empty_model_is_treated_as_missing() {
    let server = server(MockRuntime::with_events(vec![]));

    let body = json!({
        "messages": [{"role": "user", "content": "hi"}],
        "selectedChatModel": ""
    });
    let response = server.post("/api/chat").json(&body).await;

    assert_eq!(frame_types(&response.text()), vec!["error", "metrics"]);
}

#[tokio::test]
async fn runtime_fault_ends_stream_with_error_then_metrics() {
    let runtime = MockRuntime::with_script(vec![
        ScriptItem::Event(RunEvent::delta("par")),
        ScriptItem::Event(RunEvent::delta("tial")),
        ScriptItem::Fault("upstream timeout".into()),
    ]);
    let server = server(runtime);

    let response = server.post("/api/chat").json(&chat_body("hi")).await;
    response.assert_status_ok();

    let frames = frames(&response.text());
    let types: Vec<_> = frames
        .iter()
        .map(|frame| frame["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        types,
        vec![
            "start-step",
            "text-start",
            "text-delta",
            "text-delta",
            "error",
            "metrics",
        ]
    );

    let error = &frames[4];
    assert_eq!(error["message"].as_str().unwrap(), "upstream timeout");
}

#[tokio::test]
async fn metrics_frame_carries_duration() {
    let server = server(MockRuntime::with_events(vec![RunEvent::delta("hi")]));

    let response = server.post("/api/chat").json(&chat_body("hi")).await;
    let frames = frames(&response.text());

    let metrics = frames.last().unwrap();
    assert_eq!(metrics["type"], "metrics");
    assert!(metrics["duration_ms"].is_u64());
}

#[tokio::test]
async fn file_references_are_expanded_before_the_run() {
    let runtime = MockRuntime::with_events(vec![]);
    let extractor = Arc::new(StaticExtractor("Q3 revenue up"));
    let server = server_with(runtime.clone(), extractor);

    let content =
        "See [File: report.pdf (application/pdf) - URL: https://cdn.example/report.pdf] for details";
    let response = server.post("/api/chat").json(&chat_body(content)).await;
    response.assert_status_ok();

    let runs = runtime.runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].agent, ORCHESTRATOR_AGENT);

    let expanded = &runs[0].input[0].content;
    assert_eq!(
        expanded,
        "See [PDF File: report.pdf]\nQ3 revenue up\n[End of PDF] for details"
    );
}

#[tokio::test]
async fn system_messages_reach_the_runtime_as_developer() {
    let runtime = MockRuntime::with_events(vec![]);
    let server = server(runtime.clone());

    let body = json!({
        "messages": [
            {"role": "system", "content": "be brief"},
            {"role": "user", "content": "hi"}
        ],
        "selectedChatModel": "test-model"
    });
    let response = server.post("/api/chat").json(&body).await;
    response.assert_status_ok();

    let runs = runtime.runs();
    assert_eq!(runs[0].input[0].role, AgentRole::Developer);
    assert_eq!(runs[0].input[1].role, AgentRole::User);
}
