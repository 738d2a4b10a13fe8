use html_escape::{encode_double_quoted_attribute, encode_text};
use pdfpreview_application::{FieldElement, FileLinkElement, ImageElement, RenderElement};
use pdfpreview_domain::{PreviewArtifact, SourceDocument, StorageUri};

pub fn present_source_row(source: &SourceDocument) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        source.id.get(),
        source.mime_type,
        source.fingerprint.size,
        source.fingerprint.modified,
        source.uri
    )
}

pub fn present_artifact(artifact: &PreviewArtifact) -> String {
    match artifact.dimensions {
        Some(dimensions) => format!(
            "{} ({}x{})",
            artifact.uri, dimensions.width, dimensions.height
        ),
        None => format!("{} (dimensions unknown)", artifact.uri),
    }
}

/// Turns formatter output into markup. `public://` uris are served from
/// `public_base_url`; other schemes are emitted as-is.
#[derive(Debug, Clone)]
pub struct HtmlPresenter {
    public_base_url: String,
}

impl HtmlPresenter {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into(),
        }
    }

    pub fn url_for(&self, uri: &StorageUri) -> String {
        match uri.scheme() {
            "public" => format!(
                "{}/{}",
                self.public_base_url.trim_end_matches('/'),
                uri.target()
            ),
            _ => uri.to_string(),
        }
    }

    pub fn present_elements(&self, elements: &[FieldElement]) -> String {
        elements
            .iter()
            .map(|field| match &field.element {
                RenderElement::Image(image) => self.present_image(image),
                RenderElement::FileLink(link) => self.present_link(link),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn present_image(&self, image: &ImageElement) -> String {
        let tag = image.tag.as_str();
        let mut img = format!(
            "<img src=\"{}\" alt=\"{}\"",
            encode_double_quoted_attribute(&self.url_for(&image.uri)),
            encode_double_quoted_attribute(&image.alt)
        );
        if let Some(dimensions) = image.dimensions {
            img.push_str(&format!(
                " width=\"{}\" height=\"{}\"",
                dimensions.width, dimensions.height
            ));
        }
        for (name, value) in &image.attributes {
            if !is_attribute_name(name) {
                continue;
            }
            img.push_str(&format!(
                " {name}=\"{}\"",
                encode_double_quoted_attribute(value)
            ));
        }
        img.push_str(" />");

        let mut out = format!(
            "<{tag} class=\"pdfpreview\" id=\"pdfpreview-{}\"><{tag} class=\"pdfpreview-image-wrapper\">{img}</{tag}>",
            image.source_id
        );
        if let Some(description) = &image.description {
            out.push_str(&format!(
                "<{tag} class=\"pdfpreview-description\">{}</{tag}>",
                encode_text(description)
            ));
        }
        out.push_str(&format!("</{tag}>"));
        out
    }

    fn present_link(&self, link: &FileLinkElement) -> String {
        let label = link.description.as_deref().unwrap_or(&link.filename);
        format!(
            "<span class=\"file\"><a href=\"{}\" type=\"{}\">{}</a></span>",
            encode_double_quoted_attribute(&self.url_for(&link.uri)),
            encode_double_quoted_attribute(&link.mime_type),
            encode_text(label)
        )
    }
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}
