use pdfpreview_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("source unreadable: {0}")]
    SourceUnreadable(String),
    #[error("cannot prepare directory: {0}")]
    Directory(String),
    #[error("rasterization failed: {0}")]
    Rasterization(String),
    #[error("rasterization timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("io error: {0}")]
    Io(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("decode error: {0}")]
    Decode(String),
}
