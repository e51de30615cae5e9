//! PDF text extraction.

use crate::{Error, Result};

/// Extracts plain text from PDF bytes.
///
/// Page texts are concatenated with newline separators by the underlying
/// parser; trailing whitespace is stripped from the result.
pub(super) fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|err| Error::external_error().with_message(err.to_string()))?;

    Ok(text.trim_end().to_string())
}
