use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use pdfpreview_application::ApplicationError;
use pdfpreview_domain::StorageUri;

const FILE_SCHEME: &str = "file";

/// Maps storage schemes such as `public` to directories on disk.
///
/// `file://` uris are always understood and carry an absolute path.
#[derive(Debug, Clone, Default)]
pub struct SchemeRoots {
    roots: BTreeMap<String, PathBuf>,
}

impl SchemeRoots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, scheme: &str, root: impl Into<PathBuf>) -> Self {
        self.roots.insert(scheme.to_ascii_lowercase(), root.into());
        self
    }

    pub fn resolve(&self, uri: &StorageUri) -> Result<PathBuf, ApplicationError> {
        if uri.scheme() == FILE_SCHEME {
            let path = PathBuf::from(uri.target());
            if !path.is_absolute() {
                return Err(ApplicationError::InvalidInput(format!(
                    "file uri must be absolute: {uri}"
                )));
            }
            return Ok(path);
        }

        let root = self.roots.get(uri.scheme()).ok_or_else(|| {
            ApplicationError::InvalidInput(format!("no root configured for scheme: {uri}"))
        })?;

        let mut path = root.clone();
        for segment in uri.target().split('/').filter(|segment| !segment.is_empty()) {
            if segment == "." || segment == ".." {
                return Err(ApplicationError::InvalidInput(format!(
                    "relative segments are not allowed: {uri}"
                )));
            }
            path.push(segment);
        }
        Ok(path)
    }

    /// Express a local path as a uri, preferring a configured scheme whose
    /// root contains it.
    pub fn uri_for_path(&self, path: &Path) -> Result<StorageUri, ApplicationError> {
        let canonical = path.canonicalize().map_err(|error| {
            ApplicationError::SourceUnreadable(format!("{}: {error}", path.display()))
        })?;

        for (scheme, root) in &self.roots {
            let Ok(root) = root.canonicalize() else {
                continue;
            };
            if let Ok(relative) = canonical.strip_prefix(&root) {
                let target = relative
                    .components()
                    .filter_map(|component| match component {
                        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join("/");
                return Ok(StorageUri::new(scheme, &target)?);
            }
        }

        Ok(StorageUri::new(FILE_SCHEME, &canonical.to_string_lossy())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolves_scheme_targets_under_root() {
        let roots = SchemeRoots::new().with_root("public", "/srv/files");
        let uri = StorageUri::parse("public://pdfpreview/42-Report.jpg").expect("uri");
        assert_eq!(
            roots.resolve(&uri).expect("path"),
            PathBuf::from("/srv/files/pdfpreview/42-Report.jpg")
        );
    }

    #[test]
    fn rejects_unknown_scheme_and_traversal() {
        let roots = SchemeRoots::new().with_root("public", "/srv/files");
        let private = StorageUri::parse("private://a.jpg").expect("uri");
        assert!(matches!(
            roots.resolve(&private),
            Err(ApplicationError::InvalidInput(_))
        ));
        let escape = StorageUri::parse("public://../etc/passwd").expect("uri");
        assert!(roots.resolve(&escape).is_err());
    }

    #[test]
    fn paths_under_root_become_scheme_uris() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("docs")).expect("mkdir");
        let file = dir.path().join("docs").join("Report.pdf");
        std::fs::write(&file, b"%PDF-1.4").expect("write");

        let roots = SchemeRoots::new().with_root("public", dir.path());
        let uri = roots.uri_for_path(&file).expect("uri");
        assert_eq!(uri.to_string(), "public://docs/Report.pdf");
        assert_eq!(
            roots.resolve(&uri).expect("path").canonicalize().expect("canonical"),
            file.canonicalize().expect("canonical")
        );
    }

    #[test]
    fn paths_outside_roots_become_file_uris() {
        let dir = TempDir::new().expect("tempdir");
        let file = dir.path().join("loose.pdf");
        std::fs::write(&file, b"%PDF-1.4").expect("write");

        let uri = SchemeRoots::new().uri_for_path(&file).expect("uri");
        assert_eq!(uri.scheme(), "file");
        assert_eq!(
            SchemeRoots::new().resolve(&uri).expect("path"),
            file.canonicalize().expect("canonical")
        );
    }
}
