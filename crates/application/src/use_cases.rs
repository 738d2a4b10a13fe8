use std::path::PathBuf;

use pdfpreview_domain::SourceId;

#[derive(Debug, Clone)]
pub struct ImportFolderCommand {
    pub folder: String,
}

#[derive(Debug, Clone, Default)]
pub struct ListFilesCommand;

#[derive(Debug, Clone, Copy)]
pub struct PreviewFileCommand {
    pub source_id: SourceId,
}

#[derive(Debug, Clone)]
pub struct RenderFilesCommand {
    pub source_ids: Vec<SourceId>,
}

/// Re-observe a catalogued file, optionally at a new location.
#[derive(Debug, Clone)]
pub struct TouchFileCommand {
    pub source_id: SourceId,
    pub new_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteFileCommand {
    pub source_id: SourceId,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsSummaryQuery;
