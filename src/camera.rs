//! Fixed perspective camera looking down -Z.

use glam::{Mat4, Vec3};

use crate::params::RenderConfig;

/// Perspective camera with a fixed position
pub struct CameraSystem {
    position: Vec3,
    fov_y_radians: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl CameraSystem {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            position: Vec3::from_array(config.camera_position),
            fov_y_radians: config.fov_degrees.to_radians(),
            aspect: config.aspect_ratio(),
            near: config.near_plane,
            far: config.far_plane,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Update aspect ratio after a window resize (zero sizes ignored)
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    #[cfg(test)]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Create view-projection matrix (wgpu depth range 0..1)
    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_y_radians, self.aspect, self.near, self.far);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_center_projects_to_screen_center() {
        let camera = CameraSystem::new(&RenderConfig::default());
        let clip = camera.view_proj() * Vec3::new(0.0, 0.0, -5.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;

        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn test_sphere_fits_in_view() {
        let camera = CameraSystem::new(&RenderConfig::default());
        // Top of an undeformed sphere (radius 20 at z = -5)
        let clip = camera.view_proj() * Vec3::new(0.0, 20.0, -5.0).extend(1.0);
        let ndc_y = clip.y / clip.w;
        assert!(ndc_y > 0.0 && ndc_y < 1.0);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = CameraSystem::new(&RenderConfig::default());
        camera.set_viewport(800, 800);
        assert_eq!(camera.aspect(), 1.0);
        camera.set_viewport(0, 600);
        assert_eq!(camera.aspect(), 1.0);
    }
}
