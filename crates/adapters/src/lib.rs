pub mod fs;
pub mod locale;
pub mod magick;
pub mod migrations;
pub mod presenters;
pub mod sqlite;

pub use fs::{load_settings, FsPreviewStorage, FsSourceFileStore, SchemeRoots, WalkdirPdfScanner};
pub use locale::AsciiTransliterator;
pub use magick::ImageMagickRasterizer;
pub use presenters::{present_artifact, present_source_row, HtmlPresenter};
pub use sqlite::SqliteFileCatalog;

use pdfpreview_application::{ApplicationError, ImageProbe};
use pdfpreview_domain::ImageDimensions;
use std::path::Path;

/// Reads only the image header to learn its size.
#[derive(Debug, Default)]
pub struct ImageCrateProbe;

impl ImageProbe for ImageCrateProbe {
    fn dimensions(&self, path: &Path) -> Result<ImageDimensions, ApplicationError> {
        let (width, height) = image::io::Reader::open(path)
            .map_err(|error| ApplicationError::Io(error.to_string()))?
            .with_guessed_format()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?
            .into_dimensions()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?;
        Ok(ImageDimensions { width, height })
    }
}
