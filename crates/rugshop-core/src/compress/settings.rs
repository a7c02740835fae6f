//! Compression settings and their validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::OutputFormat;

/// Default bound on the longer side after resizing, in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 1200;
/// Default byte budget (120 KiB).
pub const DEFAULT_TARGET_BYTES: usize = 120 * 1024;
pub const DEFAULT_INITIAL_QUALITY: f32 = 0.55;
pub const DEFAULT_MIN_QUALITY: f32 = 0.08;
pub const DEFAULT_QUALITY_STEP: f32 = 0.07;
/// Decode guard: sources with a longer side above this are rejected.
pub const DEFAULT_MAX_DECODE_DIMENSION: u32 = 16_384;
/// Smallest accepted `quality_step`. Encoders work in whole percent, so finer
/// steps only repeat identical encodes.
pub const MIN_QUALITY_STEP: f32 = 0.001;

/// Invalid combinations of compression settings.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("{name} must be at least 1 pixel")]
    ZeroDimension { name: &'static str },

    #[error("targetBytes must be greater than zero")]
    ZeroBudget,

    #[error("{name} must be within (0, 1], got {value}")]
    QualityOutOfRange { name: &'static str, value: f32 },

    #[error("minQuality ({min}) must not exceed initialQuality ({initial})")]
    MinAboveInitial { min: f32, initial: f32 },

    #[error("qualityStep must be a positive number, got {0}")]
    NonPositiveStep(f32),

    #[error("qualityStep must be at least {min}, got {value}")]
    StepTooSmall { value: f32, min: f32 },
}

/// Knobs for one compression call.
///
/// Deserializes from camelCase JSON with every field optional, so the browser
/// can send `{ "outputFormat": "WEBP" }` and inherit the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressionSettings {
    /// Upper bound on the longer side after resizing.
    pub max_dimension: u32,
    /// Desired upper bound on the encoded size.
    pub target_bytes: usize,
    pub output_format: OutputFormat,
    /// Starting encode quality, in (0, 1].
    pub initial_quality: f32,
    /// Floor below which quality is never lowered, in (0, 1].
    pub min_quality: f32,
    /// Decrement applied per retry.
    pub quality_step: f32,
    pub max_decode_dimension: u32,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            target_bytes: DEFAULT_TARGET_BYTES,
            output_format: OutputFormat::default(),
            initial_quality: DEFAULT_INITIAL_QUALITY,
            min_quality: DEFAULT_MIN_QUALITY,
            quality_step: DEFAULT_QUALITY_STEP,
            max_decode_dimension: DEFAULT_MAX_DECODE_DIMENSION,
        }
    }
}

impl CompressionSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_target_bytes(mut self, target_bytes: usize) -> Self {
        self.target_bytes = target_bytes;
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Check every invariant the quality search relies on.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_dimension == 0 {
            return Err(SettingsError::ZeroDimension {
                name: "maxDimension",
            });
        }
        if self.max_decode_dimension == 0 {
            return Err(SettingsError::ZeroDimension {
                name: "maxDecodeDimension",
            });
        }
        if self.target_bytes == 0 {
            return Err(SettingsError::ZeroBudget);
        }
        check_quality("initialQuality", self.initial_quality)?;
        check_quality("minQuality", self.min_quality)?;
        if self.min_quality > self.initial_quality {
            return Err(SettingsError::MinAboveInitial {
                min: self.min_quality,
                initial: self.initial_quality,
            });
        }
        if !self.quality_step.is_finite() || self.quality_step <= 0.0 {
            return Err(SettingsError::NonPositiveStep(self.quality_step));
        }
        if self.quality_step < MIN_QUALITY_STEP {
            return Err(SettingsError::StepTooSmall {
                value: self.quality_step,
                min: MIN_QUALITY_STEP,
            });
        }
        Ok(())
    }

    /// Upper bound on encode attempts: `ceil((initial - min) / step) + 1`.
    ///
    /// Computed in `f64` and saturating, so unvalidated settings cannot overflow.
    pub fn max_attempts(&self) -> u32 {
        let span = (f64::from(self.initial_quality) - f64::from(self.min_quality)).max(0.0);
        let steps = (span / f64::from(self.quality_step)).ceil();
        if steps.is_nan() {
            return 1;
        }
        // `as` saturates at u32::MAX for out-of-range floats
        (steps as u32).saturating_add(1)
    }
}

fn check_quality(name: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(SettingsError::QualityOutOfRange { name, value })
    }
}
