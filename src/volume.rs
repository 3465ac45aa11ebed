//! Input boundary: dense 3-D scalar volumes
//!
//! A [`GridVolume`] owns integer dimensions and a typed sample buffer.
//! Samples are stored flat in x-fastest order: index = x + y*nx + z*nx*ny.
//! Feature extraction reads samples through a [`ScalarView`], which converts
//! any supported scalar format to f64 on access.

use thiserror::Error;

/// Errors raised when constructing a volume from raw samples
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VolumeError {
    #[error("sample count {actual} does not match dimensions {dims:?} ({expected} voxels)")]
    SampleCountMismatch {
        dims: (usize, usize, usize),
        expected: usize,
        actual: usize,
    },
}

/// Flat index of voxel `(x, y, z)` in a grid of the given dimensions:
/// `z*nx*ny + y*nx + x`
#[inline]
pub fn linear_index(dims: (usize, usize, usize), x: usize, y: usize, z: usize) -> usize {
    let (nx, ny, _) = dims;
    z * nx * ny + y * nx + x
}

/// Inverse of [`linear_index`]: recover `(x, y, z)` from a flat index
#[inline]
pub fn voxel_coords(dims: (usize, usize, usize), index: usize) -> (usize, usize, usize) {
    let (nx, ny, _) = dims;
    let z = index / (nx * ny);
    let rem = index % (nx * ny);
    (rem % nx, rem / nx, z)
}

/// Typed sample storage for a volume
///
/// The scalar formats are all convertible to f64; `Rgba8` represents the
/// host's color-volume data, which the feature extractor does not support.
#[derive(Debug, Clone, PartialEq)]
pub enum VoxelBuffer {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Rgba8(Vec<[u8; 4]>),
}

impl VoxelBuffer {
    /// Number of voxels stored in the buffer
    pub fn len(&self) -> usize {
        match self {
            VoxelBuffer::U8(v) => v.len(),
            VoxelBuffer::U16(v) => v.len(),
            VoxelBuffer::F32(v) => v.len(),
            VoxelBuffer::F64(v) => v.len(),
            VoxelBuffer::Rgba8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether samples are single scalars (f64-convertible)
    pub fn is_scalar(&self) -> bool {
        !matches!(self, VoxelBuffer::Rgba8(_))
    }
}

/// A dense 3-D volume: dimensions plus a flat sample buffer
#[derive(Debug, Clone, PartialEq)]
pub struct GridVolume {
    dims: (usize, usize, usize),
    buffer: VoxelBuffer,
}

impl GridVolume {
    /// Create a volume, validating that the buffer holds exactly
    /// `nx * ny * nz` samples
    pub fn new(dims: (usize, usize, usize), buffer: VoxelBuffer) -> Result<Self, VolumeError> {
        let expected = dims.0 * dims.1 * dims.2;
        if buffer.len() != expected {
            return Err(VolumeError::SampleCountMismatch {
                dims,
                expected,
                actual: buffer.len(),
            });
        }
        Ok(Self { dims, buffer })
    }

    pub fn from_u16(dims: (usize, usize, usize), samples: Vec<u16>) -> Result<Self, VolumeError> {
        Self::new(dims, VoxelBuffer::U16(samples))
    }

    pub fn from_f32(dims: (usize, usize, usize), samples: Vec<f32>) -> Result<Self, VolumeError> {
        Self::new(dims, VoxelBuffer::F32(samples))
    }

    pub fn from_f64(dims: (usize, usize, usize), samples: Vec<f64>) -> Result<Self, VolumeError> {
        Self::new(dims, VoxelBuffer::F64(samples))
    }

    /// Grid dimensions `(nx, ny, nz)`
    pub fn dimensions(&self) -> (usize, usize, usize) {
        self.dims
    }

    /// Total voxel count `nx * ny * nz`
    pub fn voxel_count(&self) -> usize {
        self.dims.0 * self.dims.1 * self.dims.2
    }

    /// Read-only scalar access, or `None` if the sample format is not scalar
    pub fn scalar(&self) -> Option<ScalarView<'_>> {
        if self.buffer.is_scalar() {
            Some(ScalarView {
                dims: self.dims,
                buffer: &self.buffer,
            })
        } else {
            None
        }
    }
}

/// Read-only f64 view over a scalar-format volume
#[derive(Debug, Clone, Copy)]
pub struct ScalarView<'a> {
    dims: (usize, usize, usize),
    buffer: &'a VoxelBuffer,
}

impl ScalarView<'_> {
    pub fn dimensions(&self) -> (usize, usize, usize) {
        self.dims
    }

    /// Sample at flat index `i`
    #[inline]
    pub fn linear(&self, i: usize) -> f64 {
        match self.buffer {
            VoxelBuffer::U8(v) => f64::from(v[i]),
            VoxelBuffer::U16(v) => f64::from(v[i]),
            VoxelBuffer::F32(v) => f64::from(v[i]),
            VoxelBuffer::F64(v) => v[i],
            // scalar() never hands out a view over a color buffer
            VoxelBuffer::Rgba8(_) => unreachable!("ScalarView over non-scalar buffer"),
        }
    }

    /// Sample at coordinates `(x, y, z)`
    #[inline]
    pub fn at(&self, x: usize, y: usize, z: usize) -> f64 {
        self.linear(linear_index(self.dims, x, y, z))
    }
}
