//! Scene context threaded through the frame loop.

use glam::{Mat4, Quat, Vec3};

use crate::audio::SpectrumSource;
use crate::camera::CameraSystem;
use crate::noise::{NoiseField, SimplexNoise};
use crate::params::{RenderConfig, SphereGeometry, VisualParameters};
use crate::sphere::{FrameOutcome, SphereSystem};

/// Sphere and camera, built once at startup
pub struct SceneContext<N = SimplexNoise> {
    pub sphere: SphereSystem<N>,
    pub camera: CameraSystem,
}

impl<N: NoiseField> SceneContext<N> {
    pub fn new(geometry: SphereGeometry, noise: N, render_config: &RenderConfig) -> Self {
        Self {
            sphere: SphereSystem::new(geometry, noise),
            camera: CameraSystem::new(render_config),
        }
    }

    /// Run the per-frame sphere update
    pub fn tick(
        &mut self,
        time_s: f32,
        params: &VisualParameters,
        source: Option<&mut dyn SpectrumSource>,
    ) -> FrameOutcome {
        self.sphere.update(time_s, params, source)
    }

    /// Sphere model matrix: translation then rotation about Y
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(
            Quat::from_rotation_y(self.sphere.rotation_y()),
            Vec3::from_array(self.sphere.geometry.position),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_matrix_places_and_rotates_sphere() {
        let mut scene = SceneContext::new(
            SphereGeometry::default(),
            SimplexNoise::new(0),
            &RenderConfig::default(),
        );
        let params = VisualParameters {
            speed: 10.0,
            ..VisualParameters::default()
        };
        // 0.05 rad per frame
        for _ in 0..10 {
            scene.tick(0.0, &params, None);
        }

        let model = scene.model_matrix();
        let center = model.transform_point3(Vec3::ZERO);
        assert!((center - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-6);

        let x_axis = model.transform_vector3(Vec3::X);
        assert!((x_axis.x - 0.5_f32.cos()).abs() < 1e-4);
        assert!((x_axis.z + 0.5_f32.sin()).abs() < 1e-4);
    }
}
