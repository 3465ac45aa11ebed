//! Per-feature value ranges
//!
//! Derived on demand from a record list rather than kept as long-lived
//! mutable state, so a consumer can never observe ranges that are stale with
//! respect to the records it holds.

use crate::extract::{VoxelFeatureRecord, FEATURE_COUNT};

/// Minimum and maximum observed value per feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRanges {
    pub min: [f64; FEATURE_COUNT],
    pub max: [f64; FEATURE_COUNT],
}

impl FeatureRanges {
    /// Scan `records` for per-feature extrema; `None` for an empty slice
    pub fn from_records(records: &[VoxelFeatureRecord]) -> Option<Self> {
        let (first, rest) = records.split_first()?;
        let mut min = first.features;
        let mut max = first.features;
        for record in rest {
            for feature in 0..FEATURE_COUNT {
                min[feature] = min[feature].min(record.features[feature]);
                max[feature] = max[feature].max(record.features[feature]);
            }
        }
        Some(Self { min, max })
    }

    /// Map `value` into `[0, 1]` relative to the range of `feature`
    ///
    /// A constant feature (zero span) maps to 0. Values outside the observed
    /// range are clamped.
    pub fn normalize(&self, feature: usize, value: f64) -> f64 {
        let span = self.max[feature] - self.min[feature];
        if span == 0.0 {
            0.0
        } else {
            ((value - self.min[feature]) / span).clamp(0.0, 1.0)
        }
    }
}
