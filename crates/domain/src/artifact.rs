use serde::{Deserialize, Serialize};

use crate::StorageUri;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// The derived preview image. `dimensions` stays `None` until someone reads
/// the file back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewArtifact {
    pub uri: StorageUri,
    pub present: bool,
    pub dimensions: Option<ImageDimensions>,
}

impl PreviewArtifact {
    pub fn present(uri: StorageUri) -> Self {
        Self {
            uri,
            present: true,
            dimensions: None,
        }
    }

    pub fn with_dimensions(mut self, dimensions: Option<ImageDimensions>) -> Self {
        self.dimensions = dimensions;
        self
    }
}
