//! Audio-modulated radial displacement of sphere surface points.
//!
//! Two independent channels combine additively:
//! - low band energy scales the base radius (uniform swelling)
//! - high band energy scales the noise spike amplitude

use glam::Vec3;

use crate::audio::BandLevels;
use crate::noise::{NoiseField, SimplexNoise};
use crate::params::{SphereGeometry, VisualParameters};

/// Displacement field over the sphere surface
pub struct DisplacementField<N = SimplexNoise> {
    noise: N,
    radius: f32,
    epsilon: f32,
    low_scale: f32,
    high_scale: f32,
}

impl<N: NoiseField> DisplacementField<N> {
    pub fn new(noise: N, geometry: &SphereGeometry) -> Self {
        Self {
            noise,
            radius: geometry.radius,
            epsilon: geometry.epsilon,
            low_scale: geometry.low_sensitivity_scale,
            high_scale: geometry.high_sensitivity_scale,
        }
    }

    /// Radius multiplier from bass energy
    pub fn low_boost(&self, bands: &BandLevels, params: &VisualParameters) -> f32 {
        1.0 + (bands.low_avg / (bands.low_max + self.epsilon))
            * (self.low_scale * params.low_frequency_sensitivity)
    }

    /// Spike amplitude multiplier from treble energy
    pub fn high_boost(&self, bands: &BandLevels, params: &VisualParameters) -> f32 {
        1.0 + (bands.high_avg / (bands.high_max + self.epsilon))
            * (self.high_scale * params.high_frequency_sensitivity)
    }

    /// Noise at a unit-sphere point. Time drifts the field along x only.
    pub fn spike_noise(&self, unit: Vec3, time_s: f32, spike_frequency: f32) -> f32 {
        let f = spike_frequency as f64;
        self.noise.sample_3d(
            unit.x as f64 * f + time_s as f64,
            unit.y as f64 * f,
            unit.z as f64 * f,
        )
    }

    /// Displaced radius for a unit-sphere point
    pub fn radius_at(
        &self,
        unit: Vec3,
        time_s: f32,
        params: &VisualParameters,
        bands: &BandLevels,
    ) -> f32 {
        let low_boost = self.low_boost(bands, params);
        let high_boost = self.high_boost(bands, params);
        let n = self.spike_noise(unit, time_s, params.spike_frequency);

        self.radius * low_boost + (params.spike_length * n) * high_boost
    }

    /// New position for `point` (any length; only its direction is used)
    pub fn displace(
        &self,
        point: Vec3,
        time_s: f32,
        params: &VisualParameters,
        bands: &BandLevels,
    ) -> Vec3 {
        let unit = point.normalize_or_zero();
        unit * self.radius_at(unit, time_s, params, bands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::classify;

    /// Field with the same value everywhere
    struct ConstantNoise(f32);

    impl NoiseField for ConstantNoise {
        fn sample_3d(&self, _x: f64, _y: f64, _z: f64) -> f32 {
            self.0
        }
    }

    /// Field that echoes its x coordinate (exposes the sampling position)
    struct EchoX;

    impl NoiseField for EchoX {
        fn sample_3d(&self, x: f64, _y: f64, _z: f64) -> f32 {
            x as f32
        }
    }

    fn alternating_bins() -> Vec<f32> {
        (0..64).map(|i| if i % 2 == 0 { 10.0 } else { 90.0 }).collect()
    }

    #[test]
    fn test_silence_keeps_base_radius() {
        let field = DisplacementField::new(ConstantNoise(0.0), &SphereGeometry::default());
        let bands = classify(&[0.0; 64]);
        let params = VisualParameters::default();

        let p = field.displace(Vec3::new(3.0, 4.0, 0.0), 1.5, &params, &bands);
        assert!((p.length() - 20.0).abs() < 1e-5);
        assert!((p.normalize() - Vec3::new(0.6, 0.8, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_silent_bands_do_not_divide_by_zero() {
        let field = DisplacementField::new(ConstantNoise(0.5), &SphereGeometry::default());
        let bands = classify(&[0.0; 64]);
        let params = VisualParameters::default();

        assert_eq!(field.low_boost(&bands, &params), 1.0);
        assert_eq!(field.high_boost(&bands, &params), 1.0);
        let r = field.radius_at(Vec3::Z, 0.0, &params, &bands);
        assert!((r - 25.0).abs() < 1e-5);
    }

    #[test]
    fn test_alternating_spectrum_formula() {
        let field = DisplacementField::new(ConstantNoise(0.25), &SphereGeometry::default());
        let bands = classify(&alternating_bins());
        let params = VisualParameters::default();

        let expected_low = 1.0 + (bands.low_avg / (90.0 + 1e-6)) * 0.5;
        let expected_high = 1.0 + (bands.high_avg / (90.0 + 1e-6)) * 2.5;
        assert!((field.low_boost(&bands, &params) - expected_low).abs() < 1e-6);
        assert!((field.high_boost(&bands, &params) - expected_high).abs() < 1e-6);

        let p = field.displace(Vec3::Z, 0.0, &params, &bands);
        let expected_radius = 20.0 * expected_low + 10.0 * 0.25 * expected_high;
        assert!((p - Vec3::Z * expected_radius).length() < 1e-4);
    }

    #[test]
    fn test_simplex_end_to_end_point() {
        let geometry = SphereGeometry::default();
        let field = DisplacementField::new(SimplexNoise::new(0), &geometry);
        let reference = SimplexNoise::new(0);
        let bands = classify(&alternating_bins());
        let params = VisualParameters::default();

        let low_boost = 1.0 + (bands.low_avg / (bands.low_max + 1e-6)) * (0.1 * 5.0);
        let high_boost = 1.0 + (bands.high_avg / (bands.high_max + 1e-6)) * (0.5 * 5.0);
        let n = reference.sample_3d(0.0, 0.0, 5.0);
        let expected = 20.0 * low_boost + 10.0 * n * high_boost;

        let p = field.displace(Vec3::new(0.0, 0.0, 1.0), 0.0, &params, &bands);
        assert!((p.z - expected).abs() < 1e-4);
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
    }

    #[test]
    fn test_time_only_shifts_x_sampling() {
        let field = DisplacementField::new(EchoX, &SphereGeometry::default());
        let unit = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(field.spike_noise(unit, 0.0, 5.0), 0.0);
        assert_eq!(field.spike_noise(unit, 2.0, 5.0), 2.0);
        assert_eq!(field.spike_noise(Vec3::X, 2.0, 5.0), 7.0);
    }

    #[test]
    fn test_spike_length_monotonic() {
        let geometry = SphereGeometry::default();
        let field = DisplacementField::new(SimplexNoise::new(3), &geometry);
        let bands = classify(&alternating_bins());
        let canonical = Vec3::new(1.0, 2.0, 2.0).normalize() * geometry.radius;

        let unit = canonical.normalize();
        let n = field.spike_noise(unit, 0.7, 5.0);
        assert!(n != 0.0);

        let mut previous = -1.0;
        for length in [0.0, 2.5, 5.0, 10.0, 20.0] {
            let params = VisualParameters {
                spike_length: length,
                ..VisualParameters::default()
            };
            // Isolate the spike term: compare against the swollen base radius
            let base = unit * geometry.radius * field.low_boost(&bands, &params);
            let offset = (field.displace(canonical, 0.7, &params, &bands) - base).length();
            assert!(offset > previous || length == 0.0);
            previous = offset;
        }
    }

    #[test]
    fn test_zero_point_stays_at_origin() {
        let field = DisplacementField::new(ConstantNoise(1.0), &SphereGeometry::default());
        let p = field.displace(Vec3::ZERO, 0.0, &VisualParameters::default(), &classify(&[1.0; 8]));
        assert_eq!(p, Vec3::ZERO);
    }
}
