//! Volume feature extractor
//!
//! Derives one [`VoxelFeatureRecord`] per voxel of a scalar volume:
//! raw intensity, the mean and population standard deviation of the 3x3x3
//! in-bounds neighborhood, and the magnitude of a one-sided finite-difference
//! gradient. Boundary voxels use a smaller neighborhood (no wrapping,
//! reflection, or zero padding) and a zero gradient contribution on any axis
//! whose forward neighbor is out of bounds.

use rayon::prelude::*;

use crate::volume::{voxel_coords, GridVolume, ScalarView};

/// Number of derived features per voxel
pub const FEATURE_COUNT: usize = 4;

/// Indices into [`VoxelFeatureRecord::features`]
pub const INTENSITY: usize = 0;
pub const LOCAL_AVERAGE: usize = 1;
pub const LOCAL_STD_DEV: usize = 2;
pub const GRADIENT_MAGNITUDE: usize = 3;

/// Derived feature values for a single voxel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VoxelFeatureRecord {
    /// Unique flat index of the voxel: `z*nx*ny + y*nx + x`
    pub voxel_index: usize,
    /// `[intensity, local_average, local_std_dev, gradient_magnitude]`
    pub features: [f64; FEATURE_COUNT],
}

impl VoxelFeatureRecord {
    pub fn intensity(&self) -> f64 {
        self.features[INTENSITY]
    }

    pub fn local_average(&self) -> f64 {
        self.features[LOCAL_AVERAGE]
    }

    pub fn local_std_dev(&self) -> f64 {
        self.features[LOCAL_STD_DEV]
    }

    pub fn gradient_magnitude(&self) -> f64 {
        self.features[GRADIENT_MAGNITUDE]
    }
}

/// Stateful extraction stage
///
/// Rebuilds its record list from scratch on every successful
/// [`process`](Self::process) call, reusing the allocation across runs.
/// Absent or non-scalar input is a silent no-op that leaves the previous
/// output untouched, since "no data yet" is an expected state in a
/// pull-based pipeline.
#[derive(Debug, Default)]
pub struct VolumeFeatureExtractor {
    // Lazily allocated on the first successful run
    records: Option<Vec<VoxelFeatureRecord>>,
}

impl VolumeFeatureExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract features for every voxel of `input`
    ///
    /// Produces exactly `nx * ny * nz` records sorted ascending by
    /// `voxel_index`. A volume with a zero dimension yields an empty list.
    /// `None` input or an unsupported sample format leaves any previous
    /// records unchanged.
    pub fn process(&mut self, input: Option<&GridVolume>) {
        let Some(volume) = input else {
            return;
        };
        let Some(view) = volume.scalar() else {
            log::debug!("unsupported sample format, keeping previous records");
            return;
        };

        let voxel_count = volume.voxel_count();
        let records = self.records.get_or_insert_with(Vec::new);
        records.resize(voxel_count, VoxelFeatureRecord::default());

        // Each record depends only on the read-only input, so every slot can
        // be filled independently.
        records
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, record)| *record = voxel_record(view, i));

        // Traversal already emits index order, but downstream consumers rely
        // on the ordering contract, so enforce it rather than assume it.
        records.sort_unstable_by_key(|r| r.voxel_index);

        let (nx, ny, nz) = volume.dimensions();
        log::debug!("extracted {voxel_count} records from {nx}x{ny}x{nz} volume");
    }

    /// Records from the most recent successful run, sorted by `voxel_index`;
    /// `None` before the first successful run
    pub fn records(&self) -> Option<&[VoxelFeatureRecord]> {
        self.records.as_deref()
    }
}

/// Compute the full feature record for the voxel at flat index `index`
fn voxel_record(view: ScalarView<'_>, index: usize) -> VoxelFeatureRecord {
    let (x, y, z) = voxel_coords(view.dimensions(), index);
    let intensity = view.linear(index);
    let (average, std_dev) = neighborhood_stats(view, x, y, z);
    let gradient = gradient_magnitude(view, x, y, z);
    VoxelFeatureRecord {
        voxel_index: index,
        features: [intensity, average, std_dev, gradient],
    }
}

/// Mean and population standard deviation over the in-bounds 3x3x3
/// neighborhood of `(x, y, z)`
///
/// Both statistics divide by the exact number of in-bounds samples visited
/// (between 1 and 27), never a fixed neighborhood size. The count is at
/// least 1 because the center voxel is always in bounds.
fn neighborhood_stats(view: ScalarView<'_>, x: usize, y: usize, z: usize) -> (f64, f64) {
    let (nx, ny, nz) = view.dimensions();
    let x_range = x.saturating_sub(1)..=(x + 1).min(nx - 1);
    let y_range = y.saturating_sub(1)..=(y + 1).min(ny - 1);
    let z_range = z.saturating_sub(1)..=(z + 1).min(nz - 1);

    let mut sum = 0.0;
    let mut count = 0u32;
    for zz in z_range.clone() {
        for yy in y_range.clone() {
            for xx in x_range.clone() {
                sum += view.at(xx, yy, zz);
                count += 1;
            }
        }
    }
    let average = sum / f64::from(count);

    let mut sum_sq_dev = 0.0;
    for zz in z_range {
        for yy in y_range.clone() {
            for xx in x_range.clone() {
                let dev = view.at(xx, yy, zz) - average;
                sum_sq_dev += dev * dev;
            }
        }
    }
    let std_dev = (sum_sq_dev / f64::from(count)).sqrt();

    (average, std_dev)
}

/// Magnitude of the one-sided finite-difference gradient at `(x, y, z)`
///
/// Each component is `sample(c) - sample(c+1)` along its axis, or zero when
/// the forward neighbor is out of bounds. Only the magnitude is retained, so
/// the sign convention is irrelevant.
fn gradient_magnitude(view: ScalarView<'_>, x: usize, y: usize, z: usize) -> f64 {
    let (nx, ny, nz) = view.dimensions();
    let here = view.at(x, y, z);

    let gx = if x + 1 < nx { here - view.at(x + 1, y, z) } else { 0.0 };
    let gy = if y + 1 < ny { here - view.at(x, y + 1, z) } else { 0.0 };
    let gz = if z + 1 < nz { here - view.at(x, y, z + 1) } else { 0.0 };

    (gx * gx + gy * gy + gz * gz).sqrt()
}
