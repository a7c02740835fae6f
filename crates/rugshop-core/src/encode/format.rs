//! Output formats produced by the compressor.

use serde::{Deserialize, Serialize};

/// Lossy formats the compressor can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Baseline JPEG. No alpha channel; transparent areas are flattened onto white.
    #[default]
    #[serde(rename = "JPEG", alias = "jpeg", alias = "jpg")]
    Jpeg,
    /// Lossy WebP with alpha.
    #[serde(rename = "WEBP", alias = "webp")]
    Webp,
}

impl OutputFormat {
    /// Parse a user-facing name or MIME type.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" | "image/jpeg" => Some(OutputFormat::Jpeg),
            "webp" | "image/webp" => Some(OutputFormat::Webp),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Webp => "image/webp",
        }
    }

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Webp => "webp",
        }
    }

    pub fn supports_alpha(self) -> bool {
        matches!(self, OutputFormat::Webp)
    }
}
