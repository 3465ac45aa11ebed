//! Record reducer
//!
//! Subsamples a feature record list by a configurable drop fraction:
//! shuffle a working copy, drop the first `floor(len * p)` elements, and
//! re-sort the remainder by `voxel_index`. The RNG is owned and seedable so
//! reductions can be made reproducible, instead of relying on an implicit
//! process-wide generator.

use rand::seq::SliceRandom;
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::extract::VoxelFeatureRecord;

/// Invalid reducer configuration
#[derive(Debug, Error, PartialEq)]
pub enum ReduceError {
    #[error("drop fraction {0} is outside [0, 1]")]
    DropFraction(f64),
}

/// Stateful reduction stage
///
/// Holds the drop fraction and the random source. Validation happens at
/// construction and reconfiguration, so [`process`](Self::process) itself
/// cannot fail.
#[derive(Debug, Clone)]
pub struct RecordReducer {
    drop_fraction: f64,
    rng: Pcg32,
}

impl RecordReducer {
    /// Create a reducer with an OS-seeded random source
    pub fn new(drop_fraction: f64) -> Result<Self, ReduceError> {
        Self::with_rng(drop_fraction, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Create a reducer with a fixed seed for reproducible subsets
    pub fn with_seed(drop_fraction: f64, seed: u64) -> Result<Self, ReduceError> {
        Self::with_rng(drop_fraction, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(drop_fraction: f64, rng: Pcg32) -> Result<Self, ReduceError> {
        validate(drop_fraction)?;
        Ok(Self { drop_fraction, rng })
    }

    pub fn drop_fraction(&self) -> f64 {
        self.drop_fraction
    }

    pub fn set_drop_fraction(&mut self, drop_fraction: f64) -> Result<(), ReduceError> {
        validate(drop_fraction)?;
        self.drop_fraction = drop_fraction;
        Ok(())
    }

    /// Produce a uniformly random subset of `input`, sorted by `voxel_index`
    ///
    /// The output length is exactly `len - floor(len * p)`: all records for
    /// `p = 0`, an empty list for `p = 1`. `None` input performs no work and
    /// returns `None`.
    pub fn process(
        &mut self,
        input: Option<&[VoxelFeatureRecord]>,
    ) -> Option<Vec<VoxelFeatureRecord>> {
        let records = input?;

        let mut working = records.to_vec();
        working.shuffle(&mut self.rng);
        let dropped = drop_count(working.len(), self.drop_fraction);
        working.drain(..dropped);
        working.sort_unstable_by_key(|r| r.voxel_index);

        log::debug!(
            "kept {} of {} records (drop fraction {})",
            working.len(),
            records.len(),
            self.drop_fraction
        );
        Some(working)
    }
}

fn validate(drop_fraction: f64) -> Result<(), ReduceError> {
    if drop_fraction.is_finite() && (0.0..=1.0).contains(&drop_fraction) {
        Ok(())
    } else {
        Err(ReduceError::DropFraction(drop_fraction))
    }
}

fn drop_count(len: usize, drop_fraction: f64) -> usize {
    (len as f64 * drop_fraction).floor() as usize
}
