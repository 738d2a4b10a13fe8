use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use pdfpreview_application::{ApplicationError, SourceFileStore};
use pdfpreview_domain::{Fingerprint, StorageUri};
use sha2::{Digest, Sha256};

use crate::fs::SchemeRoots;

/// Source files read straight from disk. With `hash_content` set, every
/// fingerprint also carries a SHA-256 of the file, which costs a full read.
#[derive(Debug, Clone)]
pub struct FsSourceFileStore {
    schemes: SchemeRoots,
    hash_content: bool,
}

impl FsSourceFileStore {
    pub fn new(schemes: SchemeRoots, hash_content: bool) -> Self {
        Self {
            schemes,
            hash_content,
        }
    }
}

impl SourceFileStore for FsSourceFileStore {
    fn local_path(&self, uri: &StorageUri) -> Result<PathBuf, ApplicationError> {
        let path = self.schemes.resolve(uri)?;
        path.canonicalize().map_err(|error| {
            ApplicationError::SourceUnreadable(format!("{}: {error}", path.display()))
        })
    }

    fn fingerprint(&self, uri: &StorageUri) -> Result<Fingerprint, ApplicationError> {
        let path = self.local_path(uri)?;
        let unreadable = |error: io::Error| {
            ApplicationError::SourceUnreadable(format!("{}: {error}", path.display()))
        };

        let metadata = path.metadata().map_err(unreadable)?;
        let modified = metadata
            .modified()
            .map_err(unreadable)?
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs() as i64)
            .unwrap_or_default();
        let fingerprint = Fingerprint::new(modified, metadata.len());

        if !self.hash_content {
            return Ok(fingerprint);
        }
        let hash = sha256_file(&path).map_err(unreadable)?;
        Ok(fingerprint.with_content_hash(hash))
    }

    fn uri_for_path(&self, path: &Path) -> Result<StorageUri, ApplicationError> {
        self.schemes.uri_for_path(path)
    }
}

fn sha256_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}
