//! Best-effort document text extraction.
//!
//! This module converts a remote file (by URL and declared media type) into
//! plain text for inclusion in model context. Extraction is strictly
//! best-effort: any network or parse failure is absorbed at this boundary and
//! converted into a bracketed inline error string, so one bad attachment never
//! aborts a whole chat turn. There are no retries and no caching across
//! requests.

mod fetcher;
mod kind;
mod pdf;
mod tabular;

use async_trait::async_trait;

pub use fetcher::{ContentFetcher, HttpFetcher};
pub use kind::DocumentKind;
pub use tabular::{MAX_PREVIEW_ROWS, SPREADSHEET_PREVIEW_NOTICE};

use crate::TRACING_TARGET_EXTRACT;

/// Converts a remote document into plain text, never failing past this
/// boundary.
///
/// Implemented by [`DocumentExtractor`]; the trait exists so consumers (the
/// message normalizer, the server state) can be exercised against a stub.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Fetches and extracts text for a document of the given kind.
    async fn extract(&self, url: &str, kind: DocumentKind) -> String;
}

/// Document extractor backed by a pluggable content fetcher.
///
/// Generic over [`ContentFetcher`] the way the runtime's web tools are generic
/// over their fetch seam; production code uses [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct DocumentExtractor<F> {
    fetcher: F,
}

impl<F: ContentFetcher> DocumentExtractor<F> {
    /// Creates a new extractor over the given fetcher.
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    async fn extract_pdf(&self, url: &str) -> crate::Result<String> {
        let bytes = self.fetcher.fetch(url).await?;
        pdf::extract_pdf_text(&bytes)
    }

    async fn extract_csv(&self, url: &str) -> crate::Result<String> {
        let bytes = self.fetcher.fetch(url).await?;
        tabular::extract_csv_preview(&bytes)
    }
}

#[async_trait]
impl<F: ContentFetcher> TextExtractor for DocumentExtractor<F> {
    async fn extract(&self, url: &str, kind: DocumentKind) -> String {
        match kind {
            DocumentKind::Pdf => self.extract_pdf(url).await.unwrap_or_else(|err| {
                tracing::warn!(
                    target: TRACING_TARGET_EXTRACT,
                    url = %url,
                    error = %err,
                    "failed to extract PDF text"
                );
                format!("[Error reading PDF: {err}]")
            }),
            DocumentKind::Csv => self.extract_csv(url).await.unwrap_or_else(|err| {
                tracing::warn!(
                    target: TRACING_TARGET_EXTRACT,
                    url = %url,
                    error = %err,
                    "failed to extract tabular data"
                );
                format!("[Error reading tabular data: {err}]")
            }),
            // Binary spreadsheet parsing is deliberately not attempted; the
            // fetch is skipped as well since the bytes would go unused.
            DocumentKind::Spreadsheet => SPREADSHEET_PREVIEW_NOTICE.to_string(),
        }
    }
}
