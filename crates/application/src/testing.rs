use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use pdfpreview_domain::{Fingerprint, ImageDimensions, SourceDocument, SourceId, StorageUri};

use crate::{
    ApplicationError, CacheOptions, ImageProbe, PreviewCacheService, PreviewStorage,
    RasterizationEngine, RasterizeRequest, SourceFileStore, Transliterator,
};

pub(crate) fn pdf_source(id: i64, uri: &str, modified: i64, size: u64) -> SourceDocument {
    let uri = StorageUri::parse(uri).expect("uri");
    SourceDocument {
        id: SourceId::new(id).expect("id"),
        filename: uri.basename().to_string(),
        uri,
        mime_type: "application/pdf".to_string(),
        description: None,
        fingerprint: Fingerprint::new(modified, size),
    }
}

/// Sources live under `/files`, uri targets map one to one.
#[derive(Default)]
pub(crate) struct FakeSources {
    fingerprints: Mutex<HashMap<StorageUri, Fingerprint>>,
}

impl FakeSources {
    pub(crate) fn set_fingerprint(&self, uri: &str, fingerprint: Fingerprint) {
        self.fingerprints
            .lock()
            .insert(StorageUri::parse(uri).expect("uri"), fingerprint);
    }
}

impl SourceFileStore for FakeSources {
    fn local_path(&self, uri: &StorageUri) -> Result<PathBuf, ApplicationError> {
        if uri.target().contains("unreadable") {
            return Err(ApplicationError::SourceUnreadable(uri.to_string()));
        }
        Ok(PathBuf::from(format!("/files/{}", uri.target())))
    }

    fn fingerprint(&self, uri: &StorageUri) -> Result<Fingerprint, ApplicationError> {
        self.fingerprints
            .lock()
            .get(uri)
            .cloned()
            .ok_or_else(|| ApplicationError::SourceUnreadable(uri.to_string()))
    }

    fn uri_for_path(&self, path: &Path) -> Result<StorageUri, ApplicationError> {
        let relative = path
            .strip_prefix("/files")
            .map_err(|_| ApplicationError::InvalidInput(format!("{path:?}")))?;
        Ok(StorageUri::new("public", &relative.to_string_lossy())?)
    }
}

/// Previews live under `/cache`.
#[derive(Default)]
pub(crate) struct FakeStorage {
    files: Mutex<HashSet<PathBuf>>,
    prepared: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
    fail_next_delete: AtomicBool,
}

impl FakeStorage {
    pub(crate) fn write(&self, path: &Path) {
        self.files.lock().insert(path.to_path_buf());
    }

    pub(crate) fn contains(&self, uri: &StorageUri) -> bool {
        let path = self.local_path(uri).expect("path");
        self.files.lock().contains(&path)
    }

    pub(crate) fn prepared(&self) -> Vec<String> {
        self.prepared.lock().clone()
    }

    pub(crate) fn deleted(&self) -> Vec<String> {
        self.deleted.lock().clone()
    }

    pub(crate) fn fail_next_delete(&self) {
        self.fail_next_delete.store(true, Ordering::SeqCst);
    }
}

impl PreviewStorage for FakeStorage {
    fn local_path(&self, uri: &StorageUri) -> Result<PathBuf, ApplicationError> {
        Ok(PathBuf::from(format!("/cache/{}", uri.target())))
    }

    fn exists(&self, uri: &StorageUri) -> Result<bool, ApplicationError> {
        Ok(self.contains(uri))
    }

    fn prepare_directory(&self, uri: &StorageUri) -> Result<(), ApplicationError> {
        self.prepared.lock().push(uri.to_string());
        Ok(())
    }

    fn delete(&self, uri: &StorageUri) -> Result<bool, ApplicationError> {
        if self.fail_next_delete.swap(false, Ordering::SeqCst) {
            return Err(ApplicationError::Io("permission denied".to_string()));
        }
        let path = self.local_path(uri)?;
        let removed = self.files.lock().remove(&path);
        if removed {
            self.deleted.lock().push(uri.to_string());
        }
        Ok(removed)
    }
}

pub(crate) struct FakeEngine {
    storage: Arc<FakeStorage>,
    calls: AtomicUsize,
    requests: Mutex<Vec<RasterizeRequest>>,
    fail_next: AtomicBool,
    writes_output: bool,
    delay: Option<Duration>,
}

impl FakeEngine {
    pub(crate) fn new(storage: Arc<FakeStorage>) -> Self {
        Self {
            storage,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            fail_next: AtomicBool::new(false),
            writes_output: true,
            delay: None,
        }
    }

    pub(crate) fn silent(storage: Arc<FakeStorage>) -> Self {
        Self {
            writes_output: false,
            ..Self::new(storage)
        }
    }

    pub(crate) fn slow(storage: Arc<FakeStorage>, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(storage)
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<RasterizeRequest> {
        self.requests.lock().last().cloned()
    }

    pub(crate) fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

impl RasterizationEngine for FakeEngine {
    fn rasterize(&self, request: &RasterizeRequest) -> Result<(), ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ApplicationError::Rasterization("exit status 1".to_string()));
        }
        if self.writes_output {
            self.storage.write(&request.output_path);
        }
        Ok(())
    }
}

pub(crate) struct FakeTransliterator;

impl Transliterator for FakeTransliterator {
    fn transliterate(&self, text: &str, _langcode: &str) -> String {
        text.replace('Ü', "U").replace('ü', "u")
    }
}

pub(crate) struct FakeProbe;

impl ImageProbe for FakeProbe {
    fn dimensions(&self, path: &Path) -> Result<ImageDimensions, ApplicationError> {
        if path.extension().and_then(|ext| ext.to_str()) != Some("jpg") {
            return Err(ApplicationError::Decode(format!("{path:?}")));
        }
        Ok(ImageDimensions {
            width: 100,
            height: 141,
        })
    }
}

pub(crate) fn service_with(
    storage: Arc<FakeStorage>,
    engine: Arc<FakeEngine>,
    options: CacheOptions,
) -> PreviewCacheService {
    PreviewCacheService::new(
        Arc::new(FakeSources::default()),
        storage,
        engine,
        Arc::new(FakeTransliterator),
        Arc::new(FakeProbe),
        options,
    )
}

pub(crate) struct Harness {
    pub(crate) cache: Arc<PreviewCacheService>,
    pub(crate) engine: Arc<FakeEngine>,
    pub(crate) storage: Arc<FakeStorage>,
    pub(crate) sources: Arc<FakeSources>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self::with_options(CacheOptions::default())
    }

    pub(crate) fn with_options(options: CacheOptions) -> Self {
        let storage = Arc::new(FakeStorage::default());
        let engine = Arc::new(FakeEngine::new(storage.clone()));
        let sources = Arc::new(FakeSources::default());
        let cache = Arc::new(PreviewCacheService::new(
            sources.clone(),
            storage.clone(),
            engine.clone(),
            Arc::new(FakeTransliterator),
            Arc::new(FakeProbe),
            options,
        ));
        Self {
            cache,
            engine,
            storage,
            sources,
        }
    }
}
