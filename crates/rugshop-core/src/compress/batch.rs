//! Fan-out compression for multi-file selections.
//!
//! Each file is compressed independently; one failure never affects its
//! siblings. On native targets the work is spread over rayon's pool, on
//! wasm32 it runs in order on the calling worker.

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use tracing::warn;

use super::{compress, CompressError, CompressedImage, CompressionSettings, SourceImage};

/// Result for one file of a batch, in input order.
#[derive(Debug)]
pub struct BatchEntry {
    /// Name of the source file, kept for error reporting.
    pub source_name: String,
    pub result: Result<CompressedImage, CompressError>,
}

/// A file that could not be compressed.
#[derive(Debug)]
pub struct BatchFailure {
    pub index: usize,
    pub source_name: String,
    pub error: CompressError,
}

#[derive(Debug)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_err()).count()
    }

    /// Split into compressed files and per-file failures.
    pub fn into_parts(self) -> (Vec<CompressedImage>, Vec<BatchFailure>) {
        let mut accepted = Vec::new();
        let mut failures = Vec::new();

        for (index, entry) in self.entries.into_iter().enumerate() {
            match entry.result {
                Ok(image) => accepted.push(image),
                Err(error) => failures.push(BatchFailure {
                    index,
                    source_name: entry.source_name,
                    error,
                }),
            }
        }
        (accepted, failures)
    }

    /// Abort the whole selection on the first failure.
    pub fn into_all_or_nothing(self) -> Result<Vec<CompressedImage>, CompressError> {
        self.entries.into_iter().map(|e| e.result).collect()
    }
}

/// Compress every source with the same settings.
pub fn compress_batch(sources: Vec<SourceImage>, settings: &CompressionSettings) -> BatchReport {
    #[cfg(not(target_arch = "wasm32"))]
    let entries: Vec<BatchEntry> = sources
        .into_par_iter()
        .map(|source| compress_entry(source, settings))
        .collect();

    #[cfg(target_arch = "wasm32")]
    let entries: Vec<BatchEntry> = sources
        .into_iter()
        .map(|source| compress_entry(source, settings))
        .collect();

    BatchReport { entries }
}

fn compress_entry(source: SourceImage, settings: &CompressionSettings) -> BatchEntry {
    let source_name = source.name.clone();
    let result = compress(source, settings);
    if let Err(err) = &result {
        warn!(name = %source_name, error = %err, "file excluded from batch");
    }
    BatchEntry {
        source_name,
        result,
    }
}
