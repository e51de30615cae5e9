//! Stream frames emitted over the SSE response.

use serde::{Deserialize, Serialize};

/// A single frame of the normalized streaming protocol.
///
/// Frames are serialized as one JSON object per SSE `data:` line. The frame
/// sequence for a request always matches one of two shapes:
///
/// ```text
/// start-step, text-start, (text-delta)*, text-end, end-step, metrics
/// (start-step, text-start,)? error, metrics
/// ```
///
/// The trailing [`StreamFrame::Metrics`] frame is emitted exactly once per
/// request regardless of which terminal path was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamFrame {
    /// A generation step has begun.
    StartStep,

    /// Text output is about to stream.
    TextStart,

    /// An incremental fragment of generated text. Never empty.
    TextDelta {
        /// The text fragment.
        delta: String,
    },

    /// Text output finished normally.
    TextEnd,

    /// The generation step finished normally.
    EndStep,

    /// The run failed; no further text frames follow.
    Error {
        /// Stringified upstream error payload.
        message: String,
    },

    /// Trailing wall-clock measurement for the whole run.
    Metrics {
        /// Elapsed milliseconds since the run began.
        duration_ms: u64,
    },
}

impl StreamFrame {
    /// Creates a text-delta frame.
    pub fn delta(delta: impl Into<String>) -> Self {
        Self::TextDelta {
            delta: delta.into(),
        }
    }

    /// Creates an error frame.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Creates a metrics frame.
    pub fn metrics(duration_ms: u64) -> Self {
        Self::Metrics { duration_ms }
    }

    /// Returns true for the `error` variant.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns true for the trailing `metrics` variant.
    pub fn is_metrics(&self) -> bool {
        matches!(self, Self::Metrics { .. })
    }

    /// Returns the wire tag for this frame.
    pub fn frame_type(&self) -> &'static str {
        match self {
            Self::StartStep => "start-step",
            Self::TextStart => "text-start",
            Self::TextDelta { .. } => "text-delta",
            Self::TextEnd => "text-end",
            Self::EndStep => "end-step",
            Self::Error { .. } => "error",
            Self::Metrics { .. } => "metrics",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_serialize_with_kebab_case_tags() {
        let json = serde_json::to_string(&StreamFrame::StartStep).unwrap();
        assert_eq!(json, r#"{"type":"start-step"}"#);

        let json = serde_json::to_string(&StreamFrame::delta("hi")).unwrap();
        assert_eq!(json, r#"{"type":"text-delta","delta":"hi"}"#);

        let json = serde_json::to_string(&StreamFrame::Metrics { duration_ms: 42 }).unwrap();
        assert_eq!(json, r#"{"type":"metrics","duration_ms":42}"#);
    }

    #[test]
    fn error_frame_carries_message() {
        let json = serde_json::to_string(&StreamFrame::error("boom")).unwrap();
        assert_eq!(json, r#"{"type":"error","message":"boom"}"#);
    }

    #[test]
    fn delta_newlines_stay_json_escaped() {
        let json = serde_json::to_string(&StreamFrame::delta("a\nb")).unwrap();
        // Raw newlines would break SSE framing; JSON escaping keeps the
        // frame on a single data: line.
        assert!(!json.contains('\n'));
        assert_eq!(json, r#"{"type":"text-delta","delta":"a\nb"}"#);
    }

    #[test]
    fn frame_type_matches_wire_tag() {
        for frame in [
            StreamFrame::StartStep,
            StreamFrame::TextStart,
            StreamFrame::delta("x"),
            StreamFrame::TextEnd,
            StreamFrame::EndStep,
            StreamFrame::error("x"),
            StreamFrame::Metrics { duration_ms: 1 },
        ] {
            let json = serde_json::to_value(&frame).unwrap();
            assert_eq!(json["type"], frame.frame_type());
        }
    }
}
