//! Streaming chat handler.

use std::convert::Infallible;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderName, header};
use axum::response::IntoResponse;
use axum::response::sse::{Event, KeepAlive, Sse};
use counsel_agent::stream;
use futures::StreamExt;
use tokio_stream::wrappers::ReceiverStream;

use crate::handler::request::ChatRequest;
use crate::service::ServiceState;

/// Tracing target for chat operations.
const TRACING_TARGET: &str = "counsel_server::handler::chat";

/// Runs the orchestrator over a chat history and streams frames as SSE.
///
/// Every outcome is an HTTP 200: request-level failures surface as an
/// in-stream `error` frame, and every stream ends with a `metrics` frame.
pub(super) async fn chat(
    State(state): State<ServiceState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let frames = match request.selected_model() {
        None => {
            tracing::warn!(
                target: TRACING_TARGET,
                "Chat request rejected: no chat model selected"
            );
            stream::error_frames("selectedChatModel is required")
        }
        Some(selected_model) => {
            tracing::debug!(
                target: TRACING_TARGET,
                selected_model = %selected_model,
                messages = request.messages.len(),
                request_hints = ?request.request_hints,
                "Chat request accepted"
            );

            // The configured model is authoritative; the client's selection
            // is validated and logged but does not pick the model.
            let extractor = state.extractor();
            let input = counsel_core::normalize::normalize(&*extractor, &request.messages).await;

            stream::frame_stream(state.runtime(), state.registry().orchestrator(), input)
        }
    };

    let frames = stream::with_metrics(frames);

    let (tx, rx) = tokio::sync::mpsc::channel::<Result<Event, Infallible>>(32);

    // Forward frames to the client; a failed send means the client
    // disconnected and the run is cancelled with the task.
    tokio::spawn(async move {
        let mut frames = std::pin::pin!(frames);

        while let Some(frame) = frames.next().await {
            let event = match serde_json::to_string(&frame) {
                Ok(json) => Event::default().data(json),
                Err(e) => {
                    tracing::error!(
                        target: TRACING_TARGET,
                        error = %e,
                        "Failed to serialize stream frame"
                    );
                    continue;
                }
            };

            if tx.send(Ok(event)).await.is_err() {
                tracing::info!(
                    target: TRACING_TARGET,
                    "Client disconnected, cancelling chat stream"
                );
                break;
            }
        }

        tracing::debug!(target: TRACING_TARGET, "Chat stream completed");
    });

    let headers = [
        (header::CACHE_CONTROL, "no-cache"),
        (HeaderName::from_static("x-accel-buffering"), "no"),
    ];

    (
        headers,
        Sse::new(ReceiverStream::new(rx)).keep_alive(KeepAlive::default()),
    )
}
