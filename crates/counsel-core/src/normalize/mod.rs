//! Message normalization.
//!
//! Rewrites inline file references embedded in message text into extracted
//! text blocks, then maps the client chat history into the agent runtime's
//! message envelope. The pass is idempotent on content with no file
//! references and preserves message ordering exactly.

use std::sync::LazyLock;

use regex::Regex;

use crate::TRACING_TARGET_NORMALIZE;
use crate::extract::{DocumentKind, TextExtractor};
use crate::types::{AgentMessage, ChatMessage};

/// File-reference micro-syntax: `[File: <name> (<mediaType>) - URL: <url>]`.
///
/// Filename excludes `(`, media type excludes `)`, URL excludes `]`. This is
/// a textual convention authored by message producers, not a structured field.
static FILE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[File: ([^(]+) \(([^)]+)\) - URL: ([^\]]+)\]")
        .expect("file reference pattern is valid")
});

/// Expands every file reference in `content` into an extracted text block.
///
/// References are resolved independently, in order of first appearance;
/// surrounding text is preserved byte-for-byte. Unrecognized media types are
/// replaced with a not-processed notice rather than attempting extraction.
pub async fn expand_file_references<E>(extractor: &E, content: &str) -> String
where
    E: TextExtractor + ?Sized,
{
    let mut output = String::with_capacity(content.len());
    let mut cursor = 0;

    for captures in FILE_REFERENCE.captures_iter(content) {
        let Some(whole) = captures.get(0) else {
            continue;
        };

        let name = captures[1].trim().to_string();
        let media_type = captures[2].trim().to_string();
        let url = captures[3].trim().to_string();

        tracing::debug!(
            target: TRACING_TARGET_NORMALIZE,
            file = %name,
            media_type = %media_type,
            "expanding file reference"
        );

        output.push_str(&content[cursor..whole.start()]);
        cursor = whole.end();

        match DocumentKind::from_media_type(&media_type) {
            Some(DocumentKind::Pdf) => {
                let text = extractor.extract(&url, DocumentKind::Pdf).await;
                output.push_str(&format!("[PDF File: {name}]\n{text}\n[End of PDF]"));
            }
            Some(kind) => {
                let text = extractor.extract(&url, kind).await;
                output.push_str(&format!(
                    "[Tabular File: {name}]\n{text}\n[End of Tabular File]"
                ));
            }
            None => {
                output.push_str(&format!(
                    "[File: {name} ({media_type}) - Content not processed]"
                ));
            }
        }
    }

    output.push_str(&content[cursor..]);
    output
}

/// Normalizes a client chat history into agent runtime messages.
///
/// File references are expanded per message and roles are re-mapped
/// (`system` becomes `developer`); input ordering is preserved exactly.
pub async fn normalize<E>(extractor: &E, history: &[ChatMessage]) -> Vec<AgentMessage>
where
    E: TextExtractor + ?Sized,
{
    let mut messages = Vec::with_capacity(history.len());

    for message in history {
        let content = expand_file_references(extractor, &message.content).await;
        messages.push(AgentMessage::new(message.role.into(), content));
    }

    messages
}
