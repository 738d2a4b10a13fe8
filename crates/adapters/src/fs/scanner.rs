use std::path::Path;

use pdfpreview_application::{ApplicationError, FileScanSummary, FileScanner};
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct WalkdirPdfScanner;

impl FileScanner for WalkdirPdfScanner {
    fn scan_pdfs(&self, folder: &str) -> Result<FileScanSummary, ApplicationError> {
        let folder_path = Path::new(folder);
        if !folder_path.is_dir() {
            return Err(ApplicationError::InvalidInput(format!(
                "folder does not exist or is not a directory: {folder}"
            )));
        }

        let mut summary = FileScanSummary::default();

        for entry in WalkDir::new(folder_path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }

            summary.scanned_files += 1;
            let is_pdf = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            if !is_pdf {
                continue;
            }

            let canonical = entry
                .path()
                .canonicalize()
                .map_err(|error| ApplicationError::Io(error.to_string()))?;
            summary.files.push(canonical);
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_pdfs_recursively() {
        let dir = TempDir::new().expect("tempdir");
        fs::create_dir_all(dir.path().join("nested")).expect("mkdir");
        fs::write(dir.path().join("a.pdf"), b"%PDF").expect("write");
        fs::write(dir.path().join("nested").join("B.PDF"), b"%PDF").expect("write");
        fs::write(dir.path().join("notes.txt"), b"text").expect("write");

        let summary = WalkdirPdfScanner
            .scan_pdfs(&dir.path().to_string_lossy())
            .expect("scan");
        assert_eq!(summary.scanned_files, 3);
        assert_eq!(summary.files.len(), 2);
        assert!(summary.files.iter().all(|path| path.is_absolute()));
    }

    #[test]
    fn missing_folder_is_invalid_input() {
        let result = WalkdirPdfScanner.scan_pdfs("/definitely/not/here");
        assert!(matches!(result, Err(ApplicationError::InvalidInput(_))));
    }
}
