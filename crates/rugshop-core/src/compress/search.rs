//! Linear quality decay toward a byte budget.
//!
//! Quality starts at `initial_quality` and drops by `quality_step` per retry,
//! clamped at `min_quality`, until a candidate fits `target_bytes` or the
//! floor has been tried.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use super::CompressionSettings;
use crate::encode::EncodeError;

/// The candidate kept by the search.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub bytes: Vec<u8>,
    pub quality: f32,
    /// Successful and failed encode calls made.
    pub attempts: u32,
}

#[derive(Debug)]
pub enum SearchOutcome {
    Found(Candidate),
    /// The very first encode failed; nothing usable was produced.
    InitialEncodeFailed(EncodeError),
    Cancelled,
}

/// Run the quality search with `encode` as the codec.
///
/// The smallest successful candidate is kept; for codecs whose size falls
/// with quality that is always the last one. A failed re-encode ends the
/// search with the best candidate so far. `cancel` is checked before every
/// encode.
pub fn search_quality<F>(
    settings: &CompressionSettings,
    cancel: &AtomicBool,
    mut encode: F,
) -> SearchOutcome
where
    F: FnMut(f32) -> Result<Vec<u8>, EncodeError>,
{
    let max_attempts = settings.max_attempts();
    let mut quality = settings.initial_quality;

    if cancel.load(Ordering::Relaxed) {
        return SearchOutcome::Cancelled;
    }

    let mut best = match encode(quality) {
        Ok(bytes) => Candidate {
            bytes,
            quality,
            attempts: 1,
        },
        Err(err) => return SearchOutcome::InitialEncodeFailed(err),
    };
    debug!(quality, bytes = best.bytes.len(), target = settings.target_bytes, "encoded candidate");

    let mut attempts = 1;
    while best.bytes.len() > settings.target_bytes
        && quality > settings.min_quality
        && attempts < max_attempts
    {
        if cancel.load(Ordering::Relaxed) {
            return SearchOutcome::Cancelled;
        }

        attempts += 1;
        // The last permitted attempt always tries the floor, whatever f32 drift left behind
        quality = if attempts == max_attempts {
            settings.min_quality
        } else {
            (quality - settings.quality_step).max(settings.min_quality)
        };

        match encode(quality) {
            Ok(bytes) => {
                debug!(quality, bytes = bytes.len(), target = settings.target_bytes, "encoded candidate");
                if bytes.len() <= best.bytes.len() {
                    best.bytes = bytes;
                    best.quality = quality;
                }
            }
            Err(err) => {
                warn!(quality, error = %err, "re-encode failed, keeping previous candidate");
                break;
            }
        }
    }

    best.attempts = attempts;
    SearchOutcome::Found(best)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The search always terminates within the attempt bound and never
        /// returns a quality outside [min, initial].
        #[test]
        fn prop_bounded_and_in_range(
            initial in 0.1f32..=1.0,
            min_fraction in 0.01f32..=1.0,
            step in 0.005f32..=0.5,
            target in 1usize..=20_000,
            bytes_per_unit in 100f32..=50_000.0,
        ) {
            let mut s = CompressionSettings::default().with_target_bytes(target);
            s.initial_quality = initial;
            s.min_quality = (initial * min_fraction).max(0.001);
            s.quality_step = step;
            prop_assume!(s.validate().is_ok());

            let cancel = AtomicBool::new(false);
            let mut calls = 0u32;
            let outcome = search_quality(&s, &cancel, |q| {
                calls += 1;
                Ok(vec![0u8; (q * bytes_per_unit) as usize])
            });

            let SearchOutcome::Found(found) = outcome else {
                return Err(TestCaseError::fail("expected a candidate"));
            };
            prop_assert!(calls <= s.max_attempts());
            prop_assert!(found.quality >= s.min_quality && found.quality <= s.initial_quality);
            // Either the budget is met or the floor was tried
            prop_assert!(found.bytes.len() <= target || found.quality == s.min_quality);
        }
    }
}
