use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorTag {
    #[default]
    Span,
    Div,
}

impl SeparatorTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Span => "span",
            Self::Div => "div",
        }
    }
}

impl FromStr for SeparatorTag {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "span" => Ok(Self::Span),
            "div" => Ok(Self::Div),
            other => Err(DomainError::UnknownTag(other.to_string())),
        }
    }
}

/// Formatter settings. `size` and `quality` are handed to the rasterizer as
/// opaque strings and are not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    pub size: String,
    pub quality: String,
    pub show_description: bool,
    pub tag: SeparatorTag,
    pub fallback_formatter: bool,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            size: "100x100".to_string(),
            quality: "75".to_string(),
            show_description: false,
            tag: SeparatorTag::Span,
            fallback_formatter: true,
        }
    }
}
