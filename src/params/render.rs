//! Rendering, camera and lighting configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane
    pub near_plane: f32,

    /// Far clipping plane
    pub far_plane: f32,

    /// Camera position (looks down -Z)
    pub camera_position: [f32; 3],

    /// Directional light position (shines toward the origin)
    pub light_position: [f32; 3],

    /// Directional light intensity
    pub light_intensity: f32,

    /// Ambient light intensity
    pub ambient_intensity: f32,

    /// Specular highlight color (hex RGB)
    pub specular_color: u32,

    /// Phong shininess exponent
    pub shininess: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 45.0,
            near_plane: 0.1,
            far_plane: 9999.0,
            camera_position: [0.0, 0.0, 100.0],
            light_position: [10.0, 10.0, 10.0],
            light_intensity: 0.5,
            ambient_intensity: 0.5,
            specular_color: 0x222222,
            shininess: 40.0,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}
