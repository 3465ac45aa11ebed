//! Per-voxel feature extraction for dense 3-D scalar volumes
//!
//! Two pure, synchronous pipeline stages for volume analysis:
//!
//! - [`VolumeFeatureExtractor`] derives one feature record per voxel
//!   (intensity, local average, local standard deviation, gradient
//!   magnitude) from a [`GridVolume`].
//! - [`RecordReducer`] subsamples a record list by a configurable drop
//!   fraction with a seedable random source.
//!
//! Record lists are always sorted ascending by voxel index before being
//! handed downstream, so consumers can rely on ordered lookup.
//!
//! # Modules
//! - `volume`: the input boundary (typed sample buffers, scalar views,
//!   linear-index helpers)
//! - `extract`: the neighborhood-statistics kernel and extraction stage
//! - `reduce`: random subsampling of record lists
//! - `ranges`: on-demand per-feature min/max derivation

pub mod extract;
pub mod ranges;
pub mod reduce;
pub mod volume;

pub use extract::{
    VolumeFeatureExtractor, VoxelFeatureRecord, FEATURE_COUNT, GRADIENT_MAGNITUDE, INTENSITY,
    LOCAL_AVERAGE, LOCAL_STD_DEV,
};
pub use ranges::FeatureRanges;
pub use reduce::{RecordReducer, ReduceError};
pub use volume::{linear_index, voxel_coords, GridVolume, ScalarView, VolumeError, VoxelBuffer};
