mod artifact;
mod destination;
mod error;
mod settings;
mod source;
mod staleness;
mod uri;

pub use artifact::{ImageDimensions, PreviewArtifact};
pub use destination::{destination_uri, preview_file_name, sanitize_file_name, PREVIEW_NAMESPACE};
pub use error::DomainError;
pub use settings::{PreviewSettings, SeparatorTag};
pub use source::{is_pdf, Fingerprint, SourceDocument, SourceId, PDF_MIME_TYPE};
pub use staleness::{is_stale, StaleReason};
pub use uri::StorageUri;
