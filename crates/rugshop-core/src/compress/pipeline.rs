//! Decode, resize, draw and encode one upload.

use std::sync::atomic::AtomicBool;

use chrono::Utc;
use tracing::{info, warn};

use super::search::{search_quality, SearchOutcome};
use super::surface::Surface;
use super::types::derive_output_name;
use super::{
    CompressError, CompressedImage, CompressionOutcome, CompressionSettings, PassThroughReason,
    SourceImage,
};
use crate::decode::{decode_image, fit_dimensions};

/// Compress one file toward the settings' byte budget.
///
/// Non-image files and files the encoder cannot handle come back unchanged.
/// A budget that cannot be met even at `min_quality` still yields the floor
/// candidate, reported with `within_budget: false`.
///
/// # Errors
///
/// * `CompressError::InvalidSettings` - settings failed validation (image inputs only)
/// * `CompressError::Decode` - the bytes are not a decodable raster image
pub fn compress(
    source: SourceImage,
    settings: &CompressionSettings,
) -> Result<CompressedImage, CompressError> {
    compress_cancellable(source, settings, &AtomicBool::new(false))
}

/// Like [`compress`], checking `cancel` between quality attempts.
///
/// A cancelled call returns `CompressError::Cancelled`, never a partial file.
pub fn compress_cancellable(
    source: SourceImage,
    settings: &CompressionSettings,
    cancel: &AtomicBool,
) -> Result<CompressedImage, CompressError> {
    if !source.is_image() {
        warn!(name = %source.name, mime = %source.mime_type, "not an image, passing through");
        return Ok(CompressedImage::pass_through(
            source,
            PassThroughReason::NotAnImage,
        ));
    }

    settings.validate()?;

    let surface = {
        let decoded = decode_image(&source.bytes, settings.max_decode_dimension)?;
        let (width, height) =
            fit_dimensions(decoded.width, decoded.height, settings.max_dimension);
        Surface::prepare(&decoded, width, height, settings.output_format)?
    };
    let (width, height) = surface.dimensions();

    let candidate = match search_quality(settings, cancel, |quality| surface.encode(quality)) {
        SearchOutcome::Found(candidate) => candidate,
        SearchOutcome::InitialEncodeFailed(err) => {
            warn!(name = %source.name, error = %err, "encode failed, passing through");
            return Ok(CompressedImage::pass_through(
                source,
                PassThroughReason::EncodeFailed(err.to_string()),
            ));
        }
        SearchOutcome::Cancelled => return Err(CompressError::Cancelled),
    };

    let within_budget = candidate.bytes.len() <= settings.target_bytes;
    if !within_budget {
        warn!(
            name = %source.name,
            bytes = candidate.bytes.len(),
            target = settings.target_bytes,
            "byte budget missed at minimum quality"
        );
    }
    info!(
        name = %source.name,
        width,
        height,
        bytes = candidate.bytes.len(),
        attempts = candidate.attempts,
        "compressed image"
    );

    Ok(CompressedImage {
        name: derive_output_name(&source.name, settings.output_format),
        mime_type: settings.output_format.mime_type().to_string(),
        bytes: candidate.bytes,
        dimensions: Some((width, height)),
        last_modified: Some(Utc::now()),
        outcome: CompressionOutcome::Compressed {
            quality: candidate.quality,
            attempts: candidate.attempts,
            within_budget,
        },
    })
}
