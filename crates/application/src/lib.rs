mod cache;
mod error;
mod formatter;
mod locks;
mod ports;
mod service;
mod use_cases;

#[cfg(test)]
mod testing;

pub use cache::{CacheOptions, PreviewCacheService};
pub use error::ApplicationError;
pub use formatter::{FieldElement, FieldFormatter, FieldItem, FileLinkElement, ImageElement, RenderElement};
pub use ports::{
    DocumentFormat, FileCatalog, FileScanSummary, FileScanner, ImageProbe, NewSourceFile,
    RasterArgument, RasterFormat, RasterizationEngine, RasterizeRequest, PreviewStorage,
    SourceFileStore, Transliterator, UpsertSourceResult,
};
pub use service::{ApplicationService, DeleteReport, ImportReport, TouchReport};
pub use use_cases::{
    DeleteFileCommand, ImportFolderCommand, ListFilesCommand, PreviewFileCommand,
    RenderFilesCommand, SettingsSummaryQuery, TouchFileCommand,
};
