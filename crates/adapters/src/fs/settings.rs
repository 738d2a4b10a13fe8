use std::fs;
use std::path::Path;

use pdfpreview_application::ApplicationError;
use pdfpreview_domain::PreviewSettings;

/// Read formatter settings from a JSON file. A missing file yields the
/// defaults; keys left out of the file keep their default values.
pub fn load_settings(path: &Path) -> Result<PreviewSettings, ApplicationError> {
    if !path.exists() {
        return Ok(PreviewSettings::default());
    }
    let raw = fs::read_to_string(path)
        .map_err(|error| ApplicationError::Io(format!("{}: {error}", path.display())))?;
    serde_json::from_str(&raw).map_err(|error| {
        ApplicationError::InvalidInput(format!("invalid settings in {}: {error}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfpreview_domain::SeparatorTag;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let settings = load_settings(&dir.path().join("nope.json")).expect("settings");
        assert_eq!(settings, PreviewSettings::default());
    }

    #[test]
    fn partial_file_overrides_named_keys() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("pdfpreview.settings.json");
        fs::write(&path, r#"{"quality": "90", "tag": "div", "show_description": true}"#)
            .expect("write");

        let settings = load_settings(&path).expect("settings");
        assert_eq!(settings.quality, "90");
        assert_eq!(settings.tag, SeparatorTag::Div);
        assert!(settings.show_description);
        assert_eq!(settings.size, "100x100");
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").expect("write");
        assert!(matches!(
            load_settings(&path),
            Err(ApplicationError::InvalidInput(_))
        ));
    }
}
