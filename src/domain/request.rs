//! Outgoing analysis request and the collected input it is built from.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Language hint sent when nothing else is configured
pub const DEFAULT_LANGUAGE: &str = "en";

/// Which of the two input modes a request carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Free-text news headline
    Text,
    /// Image file to check for manipulation
    Image,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// An image selected for upload, read lazily at submission time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
}

impl ImageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File name for display, falling back to the full path
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The single collected input. Text and image can never both be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Input {
    #[default]
    Empty,
    Text(String),
    Image(ImageFile),
}

impl Input {
    pub fn kind(&self) -> Option<InputKind> {
        match self {
            Self::Empty => None,
            Self::Text(_) => Some(InputKind::Text),
            Self::Image(_) => Some(InputKind::Image),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(headline) => headline.is_empty(),
            Self::Image(_) => false,
        }
    }

    pub fn headline(&self) -> Option<&str> {
        match self {
            Self::Text(headline) => Some(headline),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&ImageFile> {
        match self {
            Self::Image(file) => Some(file),
            _ => None,
        }
    }
}

/// Request metadata hints
///
/// Text requests always carry `country`, `category` and `pageSize`, as
/// empty strings when unset. Image requests carry only `language`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub language: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(
        default,
        rename = "pageSize",
        skip_serializing_if = "Option::is_none"
    )]
    pub page_size: Option<String>,
}

impl Metadata {
    /// Metadata for an image request
    pub fn language_only(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            country: None,
            category: None,
            page_size: None,
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::language_only(DEFAULT_LANGUAGE)
    }
}

/// Optional hints attached to a text request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextHints {
    pub country: Option<String>,
    pub category: Option<String>,
    pub page_size: Option<String>,
}

/// JSON envelope posted to the analysis endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(rename = "type")]
    pub kind: InputKind,

    /// Headline text, or a `data:image/...;base64,` URI
    pub data: String,

    pub metadata: Metadata,
}

impl AnalysisRequest {
    /// Build a text request; unset hints are sent as empty strings
    pub fn text(headline: impl Into<String>, language: impl Into<String>, hints: &TextHints) -> Self {
        let or_empty = |v: &Option<String>| Some(v.clone().unwrap_or_default());
        Self {
            kind: InputKind::Text,
            data: headline.into(),
            metadata: Metadata {
                language: language.into(),
                country: or_empty(&hints.country),
                category: or_empty(&hints.category),
                page_size: or_empty(&hints.page_size),
            },
        }
    }

    /// Build an image request from an already-encoded data URI
    pub fn image(data_uri: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            kind: InputKind::Image,
            data: data_uri.into(),
            metadata: Metadata::language_only(language),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_request_wire_shape() {
        let hints = TextHints {
            country: Some("us".to_string()),
            category: None,
            page_size: Some("5".to_string()),
        };
        let request = AnalysisRequest::text("Moon made of cheese", "en", &hints);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "text",
                "data": "Moon made of cheese",
                "metadata": {
                    "language": "en",
                    "country": "us",
                    "category": "",
                    "pageSize": "5"
                }
            })
        );
    }

    #[test]
    fn test_image_request_omits_text_hints() {
        let request = AnalysisRequest::image("data:image/png;base64,AAAA", "en");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["metadata"], serde_json::json!({ "language": "en" }));
    }

    #[test]
    fn test_input_variants() {
        assert!(Input::Empty.is_empty());
        assert!(Input::Text(String::new()).is_empty());
        assert_eq!(Input::Text("x".into()).kind(), Some(InputKind::Text));

        let image = Input::Image(ImageFile::new("/tmp/face.jpg"));
        assert_eq!(image.kind(), Some(InputKind::Image));
        assert_eq!(image.image().unwrap().display_name(), "face.jpg");
        assert!(image.headline().is_none());
    }
}
