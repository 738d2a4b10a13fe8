use std::path::{Path, PathBuf};

use pdfpreview_domain::{Fingerprint, ImageDimensions, SourceDocument, SourceId, StorageUri};

use crate::ApplicationError;

/// Read side of the host's file storage.
pub trait SourceFileStore: Send + Sync {
    fn local_path(&self, uri: &StorageUri) -> Result<PathBuf, ApplicationError>;

    fn fingerprint(&self, uri: &StorageUri) -> Result<Fingerprint, ApplicationError>;

    fn uri_for_path(&self, path: &Path) -> Result<StorageUri, ApplicationError>;
}

/// Where derived previews live.
pub trait PreviewStorage: Send + Sync {
    fn local_path(&self, uri: &StorageUri) -> Result<PathBuf, ApplicationError>;

    fn exists(&self, uri: &StorageUri) -> Result<bool, ApplicationError>;

    /// Create the directory `uri` and any missing parents.
    fn prepare_directory(&self, uri: &StorageUri) -> Result<(), ApplicationError>;

    /// Returns `Ok(false)` when nothing was there to delete.
    fn delete(&self, uri: &StorageUri) -> Result<bool, ApplicationError>;
}

pub trait Transliterator: Send + Sync {
    fn transliterate(&self, text: &str, langcode: &str) -> String;
}

pub trait ImageProbe: Send + Sync {
    fn dimensions(&self, path: &Path) -> Result<ImageDimensions, ApplicationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
}

impl DocumentFormat {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Jpeg,
}

impl RasterFormat {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
        }
    }
}

/// One conversion option. Values are carried verbatim and must reach the
/// engine as separate arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterArgument {
    Background(String),
    Flatten,
    Resize(String),
    Quality(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterizeRequest {
    pub source_path: PathBuf,
    pub source_format: DocumentFormat,
    pub output_path: PathBuf,
    pub output_format: RasterFormat,
    pub arguments: Vec<RasterArgument>,
    pub frame: u32,
}

pub trait RasterizationEngine: Send + Sync {
    fn rasterize(&self, request: &RasterizeRequest) -> Result<(), ApplicationError>;
}

#[derive(Debug, Clone)]
pub struct NewSourceFile {
    pub uri: StorageUri,
    pub filename: String,
    pub mime_type: String,
    pub description: Option<String>,
    pub fingerprint: Fingerprint,
}

#[derive(Debug, Clone)]
pub struct UpsertSourceResult {
    pub source: SourceDocument,
    pub inserted: bool,
}

/// The host's record of managed files, including the last observed
/// fingerprint of each.
pub trait FileCatalog: Send + Sync {
    fn initialize(&self) -> Result<(), ApplicationError>;

    /// Insert by uri, or return the existing record untouched.
    fn register(&self, file: &NewSourceFile) -> Result<UpsertSourceResult, ApplicationError>;

    fn save(&self, source: &SourceDocument) -> Result<(), ApplicationError>;

    fn find(&self, id: SourceId) -> Result<Option<SourceDocument>, ApplicationError>;

    fn list(&self) -> Result<Vec<SourceDocument>, ApplicationError>;

    fn remove(&self, id: SourceId) -> Result<bool, ApplicationError>;
}

#[derive(Debug, Clone, Default)]
pub struct FileScanSummary {
    pub scanned_files: usize,
    pub files: Vec<PathBuf>,
}

pub trait FileScanner: Send + Sync {
    fn scan_pdfs(&self, folder: &str) -> Result<FileScanSummary, ApplicationError>;
}
