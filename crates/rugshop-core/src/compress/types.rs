//! Inputs, outputs and errors of the compressor.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::SettingsError;
use crate::decode::DecodeError;
use crate::encode::OutputFormat;

/// An uploaded file as picked by the user: name, declared type and bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// True when the declared media type is an `image/*` type.
    pub fn is_image(&self) -> bool {
        self.mime_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }
}

/// Why a file was returned untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "camelCase")]
pub enum PassThroughReason {
    NotAnImage,
    EncodeFailed(String),
}

/// What the compressor did with a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CompressionOutcome {
    #[serde(rename_all = "camelCase")]
    Compressed {
        /// Quality of the returned candidate.
        quality: f32,
        attempts: u32,
        /// False when the floor quality still missed the byte budget.
        within_budget: bool,
    },
    PassThrough(PassThroughReason),
}

/// The file handed to the blob store after compression.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedImage {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    /// Output dimensions; `None` for pass-through files.
    pub dimensions: Option<(u32, u32)>,
    /// Fresh stamp for re-encoded files; `None` when the input came back untouched.
    pub last_modified: Option<DateTime<Utc>>,
    pub outcome: CompressionOutcome,
}

impl CompressedImage {
    /// Return the source exactly as it arrived.
    pub fn pass_through(source: SourceImage, reason: PassThroughReason) -> Self {
        Self {
            name: source.name,
            mime_type: source.mime_type,
            bytes: source.bytes,
            dimensions: None,
            last_modified: None,
            outcome: CompressionOutcome::PassThrough(reason),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self.outcome, CompressionOutcome::PassThrough(_))
    }
}

/// Failures that stop a single file from being compressed.
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("Could not decode image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid compression settings: {0}")]
    InvalidSettings(#[from] SettingsError),

    #[error("Compression was cancelled")]
    Cancelled,
}

/// Replace the extension of `name` with the format's canonical one.
///
/// A leading dot is not treated as an extension separator, and a missing
/// name falls back to `image`.
pub fn derive_output_name(name: &str, format: OutputFormat) -> String {
    let trimmed = name.trim();
    let stem = match trimmed.rfind('.') {
        Some(idx) if idx > 0 => &trimmed[..idx],
        _ => trimmed,
    };
    let stem = if stem.is_empty() { "image" } else { stem };
    format!("{}.{}", stem, format.extension())
}
