//! Adaptive image compression for product uploads.
//!
//! Given a picked file and a byte budget, the compressor:
//! 1. Decodes the file (non-images pass through untouched)
//! 2. Downscales so the longer side fits `max_dimension` (never upscales)
//! 3. Draws onto a scoped surface, white-filled for JPEG
//! 4. Re-encodes with linearly decaying quality until the budget is met
//!    or `min_quality` has been tried
//!
//! # Examples
//!
//! ```ignore
//! use rugshop_core::compress::{compress, CompressionSettings, SourceImage};
//!
//! let source = SourceImage::new("rug.png", "image/png", std::fs::read("rug.png")?);
//! let out = compress(source, &CompressionSettings::default())?;
//! println!("{} -> {} bytes", out.name, out.size());
//! ```

mod batch;
mod pipeline;
mod search;
mod settings;
mod surface;
mod types;

pub use batch::{compress_batch, BatchEntry, BatchFailure, BatchReport};
pub use pipeline::{compress, compress_cancellable};
pub use search::{search_quality, Candidate, SearchOutcome};
pub use settings::{
    CompressionSettings, SettingsError, DEFAULT_INITIAL_QUALITY, DEFAULT_MAX_DECODE_DIMENSION,
    DEFAULT_MAX_DIMENSION, DEFAULT_MIN_QUALITY, DEFAULT_QUALITY_STEP, DEFAULT_TARGET_BYTES,
};
pub use surface::Surface;
pub use types::{
    derive_output_name, CompressError, CompressedImage, CompressionOutcome, PassThroughReason,
    SourceImage,
};
