use std::sync::Arc;

use pdfpreview_domain::{PreviewArtifact, SourceDocument, SourceId, StaleReason, PDF_MIME_TYPE};
use tracing::info;

use crate::{
    ApplicationError, DeleteFileCommand, FieldElement, FieldFormatter, FieldItem, FileCatalog,
    FileScanner, ImportFolderCommand, ListFilesCommand, NewSourceFile, PreviewCacheService,
    PreviewFileCommand, RenderFilesCommand, SettingsSummaryQuery, SourceFileStore,
    TouchFileCommand,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub scanned_files: usize,
    pub pdf_files: usize,
    pub newly_registered: usize,
    pub invalidated: usize,
}

#[derive(Debug, Clone)]
pub struct TouchReport {
    pub source: SourceDocument,
    pub invalidated: Option<StaleReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteReport {
    pub preview_removed: bool,
}

/// Host-side wiring: keeps the file catalog in step with disk and fires the
/// cache hooks on import, update, render and delete.
pub struct ApplicationService {
    catalog: Box<dyn FileCatalog>,
    scanner: Box<dyn FileScanner>,
    sources: Arc<dyn SourceFileStore>,
    cache: Arc<PreviewCacheService>,
    formatter: FieldFormatter,
}

impl ApplicationService {
    pub fn new(
        catalog: Box<dyn FileCatalog>,
        scanner: Box<dyn FileScanner>,
        sources: Arc<dyn SourceFileStore>,
        cache: Arc<PreviewCacheService>,
    ) -> Self {
        let formatter = FieldFormatter::new(Arc::clone(&cache));
        Self {
            catalog,
            scanner,
            sources,
            cache,
            formatter,
        }
    }

    pub fn bootstrap(&self) -> Result<(), ApplicationError> {
        self.catalog.initialize()
    }

    pub fn import_folder(
        &self,
        command: ImportFolderCommand,
    ) -> Result<ImportReport, ApplicationError> {
        if command.folder.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "folder path must not be empty".to_string(),
            ));
        }

        let scan = self.scanner.scan_pdfs(&command.folder)?;
        let mut report = ImportReport {
            scanned_files: scan.scanned_files,
            pdf_files: scan.files.len(),
            ..ImportReport::default()
        };

        for path in scan.files {
            let uri = self.sources.uri_for_path(&path)?;
            let fingerprint = self.sources.fingerprint(&uri)?;
            let upsert = self.catalog.register(&NewSourceFile {
                filename: uri.basename().to_string(),
                uri,
                mime_type: PDF_MIME_TYPE.to_string(),
                description: None,
                fingerprint: fingerprint.clone(),
            })?;

            if upsert.inserted {
                report.newly_registered += 1;
                continue;
            }

            let original = upsert.source;
            let updated = SourceDocument {
                fingerprint,
                ..original.clone()
            };
            if self.apply_update(&updated, &original)?.is_some() {
                report.invalidated += 1;
            }
        }

        info!(
            scanned = report.scanned_files,
            registered = report.newly_registered,
            invalidated = report.invalidated,
            "import finished"
        );
        Ok(report)
    }

    pub fn list_files(
        &self,
        _command: ListFilesCommand,
    ) -> Result<Vec<SourceDocument>, ApplicationError> {
        self.catalog.list()
    }

    pub fn preview_file(
        &self,
        command: PreviewFileCommand,
    ) -> Result<PreviewArtifact, ApplicationError> {
        let source = self.require(command.source_id)?;
        let artifact = self.cache.get_preview(&source)?;
        Ok(self.cache.load_dimensions(artifact))
    }

    pub fn render_files(
        &self,
        command: RenderFilesCommand,
    ) -> Result<Vec<FieldElement>, ApplicationError> {
        let items = command
            .source_ids
            .into_iter()
            .map(|id| self.require(id).map(FieldItem::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.formatter.view_elements(&items))
    }

    pub fn touch_file(&self, command: TouchFileCommand) -> Result<TouchReport, ApplicationError> {
        let original = self.require(command.source_id)?;
        let uri = match command.new_path.as_deref() {
            Some(path) => self.sources.uri_for_path(path)?,
            None => original.uri.clone(),
        };
        let fingerprint = self.sources.fingerprint(&uri)?;
        let updated = SourceDocument {
            filename: uri.basename().to_string(),
            uri,
            fingerprint,
            ..original.clone()
        };

        let invalidated = self.apply_update(&updated, &original)?;
        Ok(TouchReport {
            source: updated,
            invalidated,
        })
    }

    pub fn delete_file(&self, command: DeleteFileCommand) -> Result<DeleteReport, ApplicationError> {
        let source = self.require(command.source_id)?;
        let preview_removed = self.cache.delete_preview(&source)?;
        self.catalog.remove(source.id)?;
        Ok(DeleteReport { preview_removed })
    }

    pub fn settings_summary(&self, _query: SettingsSummaryQuery) -> Vec<String> {
        self.formatter.settings_summary()
    }

    fn apply_update(
        &self,
        updated: &SourceDocument,
        original: &SourceDocument,
    ) -> Result<Option<StaleReason>, ApplicationError> {
        // The catalog keeps the old snapshot until invalidation succeeds, so a
        // failed delete is retried on the next observation.
        let invalidated = self.cache.on_source_updated(updated, original)?;
        self.catalog.save(updated)?;
        Ok(invalidated)
    }

    fn require(&self, id: SourceId) -> Result<SourceDocument, ApplicationError> {
        self.catalog
            .find(id)?
            .ok_or_else(|| ApplicationError::NotFound(format!("file not found for id={}", id.get())))
    }
}
