//! Noise generation for sphere spikes.
//!
//! The displacement field only needs a scalar 3D field; `NoiseField` lets
//! tests substitute a fixed field for the simplex generator.

use noise::{NoiseFn, Simplex};

/// Scalar 3D noise field
pub trait NoiseField {
    /// Sample the field at a position. Nominal range [-1, 1].
    fn sample_3d(&self, x: f64, y: f64, z: f64) -> f32;
}

/// Simplex noise generator for sphere spikes
pub struct SimplexNoise {
    simplex: Simplex,
}

impl SimplexNoise {
    /// Create new noise generator with seed
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: Simplex::new(seed),
        }
    }
}

impl Default for SimplexNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NoiseField for SimplexNoise {
    fn sample_3d(&self, x: f64, y: f64, z: f64) -> f32 {
        self.simplex.get([x, y, z]) as f32
    }
}
