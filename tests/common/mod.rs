//! Common test utilities for volume-features integration tests

use volume_features::{linear_index, GridVolume};

/// Build a volume where every sample equals `value`
pub fn uniform_volume(dims: (usize, usize, usize), value: f64) -> GridVolume {
    let n = dims.0 * dims.1 * dims.2;
    GridVolume::from_f64(dims, vec![value; n]).expect("sample count matches dims")
}

/// Build a volume with a linear ramp along x: sample(x, y, z) = x
pub fn ramp_x_volume(dims: (usize, usize, usize)) -> GridVolume {
    let mut samples = vec![0.0; dims.0 * dims.1 * dims.2];
    for z in 0..dims.2 {
        for y in 0..dims.1 {
            for x in 0..dims.0 {
                samples[linear_index(dims, x, y, z)] = x as f64;
            }
        }
    }
    GridVolume::from_f64(dims, samples).expect("sample count matches dims")
}

/// Build a deterministic non-uniform volume for structural tests
pub fn varied_volume(dims: (usize, usize, usize)) -> GridVolume {
    let n = dims.0 * dims.1 * dims.2;
    let samples: Vec<f64> = (0..n).map(|i| ((i * 31 + 7) % 97) as f64).collect();
    GridVolume::from_f64(dims, samples).expect("sample count matches dims")
}
