use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_path: String,
    pub public_root: PathBuf,
    pub public_base_url: String,
    pub settings_path: PathBuf,
    pub converter: PathBuf,
    pub engine_timeout: Duration,
    pub langcode: String,
    pub hash_content: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: "catalog.sqlite3".to_string(),
            public_root: PathBuf::from("files"),
            public_base_url: "/files".to_string(),
            settings_path: PathBuf::from("pdfpreview.settings.json"),
            converter: PathBuf::from("convert"),
            engine_timeout: Duration::from_secs(60),
            langcode: "en".to_string(),
            hash_content: false,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `PDFPREVIEW_*` variables. Values that do not
    /// parse are reported back as errors.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();
        if let Some(value) = lookup("PDFPREVIEW_CATALOG") {
            config.catalog_path = value;
        }
        if let Some(value) = lookup("PDFPREVIEW_PUBLIC_ROOT") {
            config.public_root = PathBuf::from(value);
        }
        if let Some(value) = lookup("PDFPREVIEW_PUBLIC_URL") {
            config.public_base_url = value;
        }
        if let Some(value) = lookup("PDFPREVIEW_SETTINGS") {
            config.settings_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("PDFPREVIEW_CONVERTER") {
            config.converter = PathBuf::from(value);
        }
        if let Some(value) = lookup("PDFPREVIEW_TIMEOUT_SECS") {
            let secs = value
                .parse::<u64>()
                .map_err(|_| format!("PDFPREVIEW_TIMEOUT_SECS must be a whole number: {value}"))?;
            config.engine_timeout = Duration::from_secs(secs);
        }
        if let Some(value) = lookup("PDFPREVIEW_LANGCODE") {
            config.langcode = value;
        }
        if let Some(value) = lookup("PDFPREVIEW_HASH_CONTENT") {
            config.hash_content = parse_flag(&value)
                .ok_or_else(|| format!("PDFPREVIEW_HASH_CONTENT must be true or false: {value}"))?;
        }
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
