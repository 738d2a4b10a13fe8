use std::path::PathBuf;
use std::sync::Arc;

use pdfpreview_domain::{
    destination_uri, is_stale, PreviewArtifact, PreviewSettings, SourceDocument, StaleReason,
    StorageUri,
};
use tracing::{debug, info, warn};

use crate::locks::KeyedLocks;
use crate::{
    ApplicationError, DocumentFormat, ImageProbe, PreviewStorage, RasterArgument, RasterFormat,
    RasterizationEngine, RasterizeRequest, SourceFileStore, Transliterator,
};

const BACKGROUND_COLOR: &str = "white";
const FIRST_FRAME: u32 = 0;

#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// Storage scheme previews are written under, e.g. `public`.
    pub scheme: String,
    /// Language passed to the transliterator when deriving file names.
    pub langcode: String,
    pub settings: PreviewSettings,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            scheme: "public".to_string(),
            langcode: "en".to_string(),
            settings: PreviewSettings::default(),
        }
    }
}

/// Get-or-create cache of first-page previews, keyed by source id and name.
///
/// Creation and deletion of the same destination are serialised through a
/// per-uri lock, so concurrent requests for a missing preview run the engine
/// once.
pub struct PreviewCacheService {
    sources: Arc<dyn SourceFileStore>,
    storage: Arc<dyn PreviewStorage>,
    engine: Arc<dyn RasterizationEngine>,
    transliterator: Arc<dyn Transliterator>,
    probe: Arc<dyn ImageProbe>,
    options: CacheOptions,
    locks: KeyedLocks,
}

impl PreviewCacheService {
    pub fn new(
        sources: Arc<dyn SourceFileStore>,
        storage: Arc<dyn PreviewStorage>,
        engine: Arc<dyn RasterizationEngine>,
        transliterator: Arc<dyn Transliterator>,
        probe: Arc<dyn ImageProbe>,
        options: CacheOptions,
    ) -> Self {
        Self {
            sources,
            storage,
            engine,
            transliterator,
            probe,
            options,
            locks: KeyedLocks::default(),
        }
    }

    pub fn settings(&self) -> &PreviewSettings {
        &self.options.settings
    }

    pub fn destination_uri(&self, source: &SourceDocument) -> Result<StorageUri, ApplicationError> {
        let name = self
            .transliterator
            .transliterate(source.uri.file_stem(), &self.options.langcode);
        Ok(destination_uri(&self.options.scheme, source.id, &name)?)
    }

    pub fn get_preview(&self, source: &SourceDocument) -> Result<PreviewArtifact, ApplicationError> {
        let destination = self.destination_uri(source)?;
        if self.storage.exists(&destination)? {
            debug!(source_id = source.id.get(), uri = %destination, "preview cache hit");
            return Ok(PreviewArtifact::present(destination));
        }

        let lock = self.locks.acquire(&destination);
        let _guard = lock.lock();
        // Another request may have finished creating it while we waited.
        if self.storage.exists(&destination)? {
            debug!(source_id = source.id.get(), uri = %destination, "preview created concurrently");
            return Ok(PreviewArtifact::present(destination));
        }

        self.create_unlocked(source, &destination)?;
        Ok(PreviewArtifact::present(destination))
    }

    /// Render `source` into `destination`, replacing whatever is there.
    pub fn create_preview(
        &self,
        source: &SourceDocument,
        destination: &StorageUri,
    ) -> Result<(), ApplicationError> {
        let lock = self.locks.acquire(destination);
        let _guard = lock.lock();
        self.create_unlocked(source, destination)
    }

    /// Update hook. Drops the preview derived from `original` when the file
    /// moved or its fingerprint changed; regeneration waits for the next
    /// request.
    pub fn on_source_updated(
        &self,
        updated: &SourceDocument,
        original: &SourceDocument,
    ) -> Result<Option<StaleReason>, ApplicationError> {
        let Some(reason) = is_stale(updated, original) else {
            debug!(source_id = original.id.get(), "source unchanged, keeping preview");
            return Ok(None);
        };

        info!(source_id = original.id.get(), ?reason, "source changed, invalidating preview");
        self.delete_preview(original)?;
        Ok(Some(reason))
    }

    /// Delete hook. Missing previews are not an error.
    pub fn delete_preview(&self, source: &SourceDocument) -> Result<bool, ApplicationError> {
        let destination = self.destination_uri(source)?;
        let lock = self.locks.acquire(&destination);
        let _guard = lock.lock();
        let removed = self.storage.delete(&destination)?;
        if removed {
            info!(source_id = source.id.get(), uri = %destination, "preview deleted");
        }
        Ok(removed)
    }

    /// Fill in width and height by reading the stored image. Unreadable
    /// images leave the dimensions empty.
    pub fn load_dimensions(&self, artifact: PreviewArtifact) -> PreviewArtifact {
        if !artifact.present {
            return artifact;
        }
        let dimensions = self
            .storage
            .local_path(&artifact.uri)
            .and_then(|path| self.probe.dimensions(&path));
        match dimensions {
            Ok(dimensions) => artifact.with_dimensions(Some(dimensions)),
            Err(error) => {
                warn!(uri = %artifact.uri, %error, "preview is not a readable image");
                artifact.with_dimensions(None)
            }
        }
    }

    pub fn rasterize_request(&self, source_path: PathBuf, output_path: PathBuf) -> RasterizeRequest {
        let settings = &self.options.settings;
        RasterizeRequest {
            source_path,
            source_format: DocumentFormat::Pdf,
            output_path,
            output_format: RasterFormat::Jpeg,
            arguments: vec![
                RasterArgument::Background(BACKGROUND_COLOR.to_string()),
                RasterArgument::Flatten,
                RasterArgument::Resize(settings.size.clone()),
                RasterArgument::Quality(settings.quality.clone()),
            ],
            frame: FIRST_FRAME,
        }
    }

    fn create_unlocked(
        &self,
        source: &SourceDocument,
        destination: &StorageUri,
    ) -> Result<(), ApplicationError> {
        let source_path = self.sources.local_path(&source.uri)?;
        self.storage.prepare_directory(&destination.dirname())?;
        let output_path = self.storage.local_path(destination)?;

        let request = self.rasterize_request(source_path, output_path);
        self.engine.rasterize(&request)?;

        if !self.storage.exists(destination)? {
            return Err(ApplicationError::Rasterization(format!(
                "engine reported success but no preview exists at {destination}"
            )));
        }
        info!(source_id = source.id.get(), uri = %destination, "preview created");
        Ok(())
    }
}
