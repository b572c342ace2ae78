//! Sphere geometry and deformation constants.

/// Sphere mesh and displacement constants
#[derive(Debug, Clone)]
pub struct SphereGeometry {
    /// Undeformed sphere radius (world units)
    pub radius: f32,

    /// Longitude segments (vertices per row = segments + 1)
    pub width_segments: u32,

    /// Latitude segments (rows = segments + 1)
    pub height_segments: u32,

    /// Sphere position in world space
    pub position: [f32; 3],

    /// Added to band peaks before dividing (silent bands stay finite)
    pub epsilon: f32,

    /// Multiplier applied to the low-frequency sensitivity knob
    /// Formula: low_boost = 1 + (low_avg / (low_max + ε)) * (low_scale * knob)
    pub low_sensitivity_scale: f32,

    /// Multiplier applied to the high-frequency sensitivity knob
    /// Formula: high_boost = 1 + (high_avg / (high_max + ε)) * (high_scale * knob)
    pub high_sensitivity_scale: f32,

    /// Rotation per frame per unit of speed (radians)
    pub rotation_step: f32,
}

impl Default for SphereGeometry {
    fn default() -> Self {
        Self {
            radius: 20.0,
            width_segments: 48,
            height_segments: 48,
            position: [0.0, 0.0, -5.0],
            epsilon: 1e-6,
            low_sensitivity_scale: 0.1,
            high_sensitivity_scale: 0.5,
            rotation_step: 0.005,
        }
    }
}

impl SphereGeometry {
    /// Number of mesh vertices: (width + 1) * (height + 1)
    pub fn vertex_count(&self) -> usize {
        (self.width_segments as usize + 1) * (self.height_segments as usize + 1)
    }
}

/// Noise field configuration
#[derive(Debug, Clone)]
pub struct NoiseConfig {
    /// Simplex permutation seed
    pub seed: u32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self { seed: 0 }
    }
}
