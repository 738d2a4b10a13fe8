use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("source id must be positive, got {0}")]
    InvalidSourceId(i64),
    #[error("source file name must not be empty")]
    EmptyFileName,
    #[error("malformed storage uri: {0}")]
    MalformedUri(String),
    #[error("unknown separator tag: {0}")]
    UnknownTag(String),
}
