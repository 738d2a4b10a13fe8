use std::sync::Arc;

use pdfpreview_domain::{
    is_pdf, ImageDimensions, PreviewSettings, SeparatorTag, SourceDocument, StorageUri,
};
use tracing::warn;

use crate::PreviewCacheService;

/// One file attached to an entity field, with the item attributes the host
/// wants passed through to the rendered element.
#[derive(Debug, Clone)]
pub struct FieldItem {
    pub source: SourceDocument,
    pub attributes: Vec<(String, String)>,
}

impl FieldItem {
    pub fn new(source: SourceDocument) -> Self {
        Self {
            source,
            attributes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageElement {
    pub source_id: i64,
    pub uri: StorageUri,
    pub alt: String,
    pub dimensions: Option<ImageDimensions>,
    pub description: Option<String>,
    pub tag: SeparatorTag,
    pub attributes: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLinkElement {
    pub uri: StorageUri,
    pub filename: String,
    pub mime_type: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderElement {
    Image(ImageElement),
    FileLink(FileLinkElement),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldElement {
    pub delta: usize,
    pub element: RenderElement,
}

/// Renders file fields as preview images.
///
/// Nothing here fails: a preview that cannot be produced becomes a plain
/// file link when the fallback formatter is enabled and is left out
/// otherwise.
pub struct FieldFormatter {
    cache: Arc<PreviewCacheService>,
}

impl FieldFormatter {
    pub fn new(cache: Arc<PreviewCacheService>) -> Self {
        Self { cache }
    }

    fn settings(&self) -> &PreviewSettings {
        self.cache.settings()
    }

    pub fn settings_summary(&self) -> Vec<String> {
        let settings = self.settings();
        let mut summary = vec![
            format!("Preview size: {}", settings.size),
            format!("Preview quality: {}", settings.quality),
            format!("Separator tag: {}", settings.tag.as_str()),
            format!(
                "Descriptions: {}",
                if settings.show_description {
                    "Visible"
                } else {
                    "Hidden"
                }
            ),
        ];
        if settings.fallback_formatter {
            summary.push("Using the default file formatter for non-PDF files".to_string());
        }
        summary
    }

    pub fn view_elements(&self, items: &[FieldItem]) -> Vec<FieldElement> {
        items
            .iter()
            .enumerate()
            .filter_map(|(delta, item)| {
                self.view_item(item)
                    .map(|element| FieldElement { delta, element })
            })
            .collect()
    }

    fn view_item(&self, item: &FieldItem) -> Option<RenderElement> {
        let source = &item.source;
        if !is_pdf(source) {
            return self.fallback(source);
        }

        match self.cache.get_preview(source) {
            Ok(artifact) => {
                let artifact = self.cache.load_dimensions(artifact);
                let settings = self.settings();
                Some(RenderElement::Image(ImageElement {
                    source_id: source.id.get(),
                    uri: artifact.uri,
                    alt: source.filename.clone(),
                    dimensions: artifact.dimensions,
                    description: settings
                        .show_description
                        .then(|| source.description.clone())
                        .flatten(),
                    tag: settings.tag,
                    attributes: item.attributes.clone(),
                }))
            }
            Err(error) => {
                warn!(source_id = source.id.get(), %error, "preview unavailable");
                self.fallback(source)
            }
        }
    }

    fn fallback(&self, source: &SourceDocument) -> Option<RenderElement> {
        if !self.settings().fallback_formatter {
            return None;
        }
        Some(RenderElement::FileLink(FileLinkElement {
            uri: source.uri.clone(),
            filename: source.filename.clone(),
            mime_type: source.mime_type.clone(),
            description: source.description.clone(),
        }))
    }
}
