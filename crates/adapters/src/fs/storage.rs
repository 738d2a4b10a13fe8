use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use pdfpreview_application::{ApplicationError, PreviewStorage};
use pdfpreview_domain::StorageUri;

use crate::fs::SchemeRoots;

#[derive(Debug, Clone)]
pub struct FsPreviewStorage {
    schemes: SchemeRoots,
}

impl FsPreviewStorage {
    pub fn new(schemes: SchemeRoots) -> Self {
        Self { schemes }
    }
}

impl PreviewStorage for FsPreviewStorage {
    fn local_path(&self, uri: &StorageUri) -> Result<PathBuf, ApplicationError> {
        self.schemes.resolve(uri)
    }

    fn exists(&self, uri: &StorageUri) -> Result<bool, ApplicationError> {
        Ok(self.schemes.resolve(uri)?.is_file())
    }

    fn prepare_directory(&self, uri: &StorageUri) -> Result<(), ApplicationError> {
        let path = self.schemes.resolve(uri)?;
        fs::create_dir_all(&path)
            .map_err(|error| ApplicationError::Directory(format!("{}: {error}", path.display())))
    }

    fn delete(&self, uri: &StorageUri) -> Result<bool, ApplicationError> {
        let path = self.schemes.resolve(uri)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
            Err(error) => Err(ApplicationError::Io(format!("{}: {error}", path.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage(dir: &TempDir) -> FsPreviewStorage {
        FsPreviewStorage::new(SchemeRoots::new().with_root("public", dir.path()))
    }

    #[test]
    fn prepare_creates_nested_directories() {
        let dir = TempDir::new().expect("tempdir");
        let storage = storage(&dir);
        let uri = StorageUri::parse("public://pdfpreview/nested").expect("uri");
        storage.prepare_directory(&uri).expect("prepare");
        storage.prepare_directory(&uri).expect("prepare twice");
        assert!(dir.path().join("pdfpreview").join("nested").is_dir());
    }

    #[test]
    fn exists_and_delete_follow_the_file() {
        let dir = TempDir::new().expect("tempdir");
        let storage = storage(&dir);
        let uri = StorageUri::parse("public://pdfpreview/1-a.jpg").expect("uri");
        assert!(!storage.exists(&uri).expect("exists"));

        storage.prepare_directory(&uri.dirname()).expect("prepare");
        fs::write(storage.local_path(&uri).expect("path"), b"jpeg").expect("write");
        assert!(storage.exists(&uri).expect("exists"));

        assert!(storage.delete(&uri).expect("delete"));
        assert!(!storage.delete(&uri).expect("delete missing"));
        assert!(!storage.exists(&uri).expect("exists"));
    }

    #[test]
    fn directory_is_not_a_preview() {
        let dir = TempDir::new().expect("tempdir");
        let storage = storage(&dir);
        let uri = StorageUri::parse("public://pdfpreview").expect("uri");
        storage.prepare_directory(&uri).expect("prepare");
        assert!(!storage.exists(&uri).expect("exists"));
    }
}
