use serde::{Deserialize, Serialize};

use crate::{DomainError, StorageUri};

pub const PDF_MIME_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(i64);

impl SourceId {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidSourceId(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// Cheap proxy for "content may have changed".
///
/// `modified` is whole seconds since the Unix epoch. `content_hash` is a hex
/// SHA-256 digest and only present when the store was asked to compute it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub modified: i64,
    pub size: u64,
    pub content_hash: Option<String>,
}

impl Fingerprint {
    pub fn new(modified: i64, size: u64) -> Self {
        Self {
            modified,
            size,
            content_hash: None,
        }
    }

    pub fn with_content_hash(mut self, hash: impl Into<String>) -> Self {
        self.content_hash = Some(hash.into());
        self
    }
}

/// Snapshot of a file record as the host observed it at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub id: SourceId,
    pub uri: StorageUri,
    pub filename: String,
    pub mime_type: String,
    pub description: Option<String>,
    pub fingerprint: Fingerprint,
}

pub fn is_pdf(source: &SourceDocument) -> bool {
    source.mime_type.eq_ignore_ascii_case(PDF_MIME_TYPE)
        || source.uri.extension().as_deref() == Some("pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(uri: &str, mime_type: &str) -> SourceDocument {
        SourceDocument {
            id: SourceId::new(1).expect("id"),
            uri: StorageUri::parse(uri).expect("uri"),
            filename: "x".to_string(),
            mime_type: mime_type.to_string(),
            description: None,
            fingerprint: Fingerprint::new(0, 0),
        }
    }

    #[test]
    fn source_id_must_be_positive() {
        assert!(SourceId::new(42).is_ok());
        assert!(matches!(
            SourceId::new(0),
            Err(DomainError::InvalidSourceId(0))
        ));
        assert!(SourceId::new(-3).is_err());
    }

    #[test]
    fn pdf_detection_uses_mime_or_extension() {
        assert!(is_pdf(&document("public://a.bin", "application/pdf")));
        assert!(is_pdf(&document("public://a.PDF", "application/octet-stream")));
        assert!(!is_pdf(&document("public://a.txt", "text/plain")));
    }
}
