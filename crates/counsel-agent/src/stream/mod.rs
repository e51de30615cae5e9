//! Runtime-event to wire-frame adaptation.
//!
//! Translates an agent run's [`RunEvent`] stream into the ordered
//! [`StreamFrame`] protocol: a `start-step`/`text-start` prologue, one
//! `text-delta` per non-empty fragment, then `text-end`/`end-step` on
//! success. Any error, structured or fault, terminates the stream with a
//! single `error` frame and no closing pair. [`with_metrics`] appends the
//! one `metrics` frame every stream ends with, error or not.

use std::sync::Arc;
use std::time::Instant;

use counsel_core::types::{AgentMessage, StreamFrame};
use futures::StreamExt;
use futures::stream::BoxStream;

use crate::TRACING_TARGET;
use crate::agent::AgentDefinition;
use crate::runtime::{AgentRuntime, RunEvent};

/// An ordered stream of wire frames.
pub type FrameStream = BoxStream<'static, StreamFrame>;

/// Runs an agent and adapts its events into wire frames.
///
/// Startup failures still produce a well-formed stream: the prologue frames
/// followed by a single `error` frame.
pub fn frame_stream(
    runtime: Arc<dyn AgentRuntime>,
    agent: Arc<AgentDefinition>,
    input: Vec<AgentMessage>,
) -> FrameStream {
    let stream = async_stream::stream! {
        yield StreamFrame::StartStep;
        yield StreamFrame::TextStart;

        let mut events = match runtime.run_streamed(agent, input).await {
            Ok(events) => events,
            Err(err) => {
                tracing::error!(target: TRACING_TARGET, error = %err, "agent run failed to start");
                yield StreamFrame::error(err.to_string());
                return;
            }
        };

        while let Some(event) = events.next().await {
            match event {
                Ok(RunEvent::TextDelta { delta }) => {
                    if !delta.is_empty() {
                        yield StreamFrame::delta(delta);
                    }
                }
                Ok(RunEvent::Error { message }) => {
                    tracing::warn!(target: TRACING_TARGET, error = %message, "runtime reported an error event");
                    yield StreamFrame::error(message);
                    return;
                }
                Ok(RunEvent::Other) => {}
                Err(err) => {
                    tracing::error!(target: TRACING_TARGET, error = %err, "agent run faulted mid-stream");
                    yield StreamFrame::error(err.to_string());
                    return;
                }
            }
        }

        yield StreamFrame::TextEnd;
        yield StreamFrame::EndStep;
    };

    stream.boxed()
}

/// Produces a stream of exactly one `error` frame.
///
/// Used for request-level failures where no agent run ever starts.
pub fn error_frames(message: impl Into<String>) -> FrameStream {
    futures::stream::iter([StreamFrame::error(message)]).boxed()
}

/// Appends a single `metrics` frame after the inner stream ends.
///
/// The duration clock starts when the stream is first polled and the frame
/// is emitted unconditionally, so every response carries exactly one
/// `metrics` frame as its last frame.
pub fn with_metrics(inner: FrameStream) -> FrameStream {
    let stream = async_stream::stream! {
        let started = Instant::now();
        let mut inner = inner;

        while let Some(frame) = inner.next().await {
            yield frame;
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        tracing::debug!(target: TRACING_TARGET, duration_ms, "stream completed");
        yield StreamFrame::metrics(duration_ms);
    };

    stream.boxed()
}

#[cfg(test)]
mod tests {
    use counsel_core::types::AgentRole;

    use super::*;
    use crate::agent::AgentRegistry;
    use crate::runtime::mock::{MockRuntime, ScriptItem};

    fn orchestrator() -> Arc<AgentDefinition> {
        AgentRegistry::with_defaults("test-model").orchestrator()
    }

    fn user_input() -> Vec<AgentMessage> {
        vec![AgentMessage::new(AgentRole::User, "hello")]
    }

    async fn collect(runtime: MockRuntime) -> Vec<StreamFrame> {
        frame_stream(Arc::new(runtime), orchestrator(), user_input())
            .collect()
            .await
    }

    #[tokio::test]
    async fn successful_run_produces_ordered_frames() {
        let runtime = MockRuntime::with_events(vec![
            RunEvent::delta("Hel"),
            RunEvent::delta("lo"),
        ]);

        let frames = collect(runtime).await;
        assert_eq!(
            frames,
            vec![
                StreamFrame::StartStep,
                StreamFrame::TextStart,
                StreamFrame::delta("Hel"),
                StreamFrame::delta("lo"),
                StreamFrame::TextEnd,
                StreamFrame::EndStep,
            ]
        );
    }

    #[tokio::test]
    async fn empty_deltas_are_suppressed() {
        let runtime = MockRuntime::with_events(vec![
            RunEvent::delta(""),
            RunEvent::delta("text"),
            RunEvent::delta(""),
        ]);

        let frames = collect(runtime).await;
        let deltas: Vec<_> = frames
            .iter()
            .filter(|frame| matches!(frame, StreamFrame::TextDelta { .. }))
            .collect();
        assert_eq!(deltas, vec![&StreamFrame::delta("text")]);
    }

    #[tokio::test]
    async fn error_event_terminates_without_closing_frames() {
        let runtime = MockRuntime::with_events(vec![
            RunEvent::delta("partial"),
            RunEvent::error("quota exceeded"),
            RunEvent::delta("never seen"),
        ]);

        let frames = collect(runtime).await;
        assert_eq!(
            frames,
            vec![
                StreamFrame::StartStep,
                StreamFrame::TextStart,
                StreamFrame::delta("partial"),
                StreamFrame::error("quota exceeded"),
            ]
        );
    }

    #[tokio::test]
    async fn mid_stream_fault_becomes_single_error_frame() {
        let runtime = MockRuntime::with_script(vec![
            ScriptItem::Event(RunEvent::delta("a")),
            ScriptItem::Event(RunEvent::delta("b")),
            ScriptItem::Fault("connection reset".into()),
        ]);

        let frames = collect(runtime).await;
        assert_eq!(
            frames,
            vec![
                StreamFrame::StartStep,
                StreamFrame::TextStart,
                StreamFrame::delta("a"),
                StreamFrame::delta("b"),
                StreamFrame::error("connection reset"),
            ]
        );
        assert_eq!(frames.iter().filter(|frame| frame.is_error()).count(), 1);
    }

    #[tokio::test]
    async fn startup_failure_still_yields_prologue_and_error() {
        let runtime = MockRuntime::failing_on_start("no such model");

        let frames = collect(runtime).await;
        assert_eq!(frames[0], StreamFrame::StartStep);
        assert_eq!(frames[1], StreamFrame::TextStart);
        assert!(frames[2].is_error());
        assert_eq!(frames.len(), 3);
    }

    #[tokio::test]
    async fn unknown_events_are_ignored() {
        let runtime = MockRuntime::with_events(vec![
            RunEvent::Other,
            RunEvent::delta("kept"),
            RunEvent::Other,
        ]);

        let frames = collect(runtime).await;
        assert_eq!(
            frames,
            vec![
                StreamFrame::StartStep,
                StreamFrame::TextStart,
                StreamFrame::delta("kept"),
                StreamFrame::TextEnd,
                StreamFrame::EndStep,
            ]
        );
    }

    #[tokio::test]
    async fn metrics_frame_is_always_last_on_success() {
        let runtime = MockRuntime::with_events(vec![RunEvent::delta("hi")]);
        let frames: Vec<_> =
            with_metrics(frame_stream(Arc::new(runtime), orchestrator(), user_input()))
                .collect()
                .await;

        let last = frames.last().unwrap();
        assert!(last.is_metrics());
        assert_eq!(frames.iter().filter(|frame| frame.is_metrics()).count(), 1);
    }

    #[tokio::test]
    async fn metrics_frame_is_always_last_on_error() {
        let runtime = MockRuntime::with_script(vec![ScriptItem::Fault("boom".into())]);
        let frames: Vec<_> =
            with_metrics(frame_stream(Arc::new(runtime), orchestrator(), user_input()))
                .collect()
                .await;

        assert!(frames.last().unwrap().is_metrics());
        assert_eq!(frames.iter().filter(|frame| frame.is_error()).count(), 1);
    }

    #[tokio::test]
    async fn error_frames_carries_only_the_message() {
        let frames: Vec<_> = error_frames("missing model").collect().await;
        assert_eq!(frames, vec![StreamFrame::error("missing model")]);
    }

    #[tokio::test]
    async fn runtime_receives_the_given_input() {
        let runtime = MockRuntime::with_events(vec![]);
        let _ = frame_stream(Arc::new(runtime.clone()), orchestrator(), user_input())
            .collect::<Vec<_>>()
            .await;

        let runs = runtime.runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].agent, crate::agent::ORCHESTRATOR_AGENT);
        assert_eq!(runs[0].input.len(), 1);
    }
}
