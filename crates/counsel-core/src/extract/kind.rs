//! Document kinds recognized by the extractor.

/// Document kinds the extractor knows how to preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// PDF document (`application/pdf`).
    Pdf,
    /// Plain-text CSV (`text/csv`).
    Csv,
    /// Binary spreadsheet formats (legacy and OOXML Excel).
    Spreadsheet,
}

impl DocumentKind {
    /// Maps a declared media type onto a document kind.
    ///
    /// Returns `None` for media types the extractor does not process;
    /// callers pass those through with a not-processed notice instead.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "application/pdf" => Some(Self::Pdf),
            "text/csv" => Some(Self::Csv),
            "application/vnd.ms-excel"
            | "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => {
                Some(Self::Spreadsheet)
            }
            _ => None,
        }
    }

    /// Returns the canonical media type for this kind.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Csv => "text/csv",
            Self::Spreadsheet => "application/vnd.ms-excel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_media_type_known_kinds() {
        assert_eq!(
            DocumentKind::from_media_type("application/pdf"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_media_type("text/csv"),
            Some(DocumentKind::Csv)
        );
        assert_eq!(
            DocumentKind::from_media_type("application/vnd.ms-excel"),
            Some(DocumentKind::Spreadsheet)
        );
        assert_eq!(
            DocumentKind::from_media_type(
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            ),
            Some(DocumentKind::Spreadsheet)
        );
    }

    #[test]
    fn from_media_type_unknown_is_none() {
        assert_eq!(DocumentKind::from_media_type("image/png"), None);
        assert_eq!(DocumentKind::from_media_type(""), None);
    }
}
