#[derive(Debug, Clone, Default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub transform: TransformConfig,
    pub shaders: ShaderConfig,
}

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Scene Viewer",
            width: 1000,
            height: 800,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// World units moved per held pan key per frame.
    pub pan_step: f32,
    /// Change in distance-from-target per held zoom key per frame.
    pub zoom_step: f32,
    /// Zooming in stops here; must be positive.
    pub min_distance: f32,
    /// Closest an orthographic eye gets to its target. Keeps the desk objects
    /// in front of the near plane.
    pub ortho_min_distance: f32,
    pub perspective_distance: f32,
    pub ortho_distance: f32,
    /// Half height of the orthographic view volume. Width follows the aspect ratio.
    pub ortho_half_extent: f32,
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            pan_step: 0.05,
            zoom_step: 0.1,
            min_distance: 0.1,
            ortho_min_distance: 6.0,
            perspective_distance: 12.0,
            ortho_distance: 10.0,
            ortho_half_extent: 6.0,
            fov_y_degrees: 45.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformConfig {
    pub step: f32,
    pub translation_limit: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            step: 0.05,
            translation_limit: 20.0,
            min_scale: 0.05,
            max_scale: 10.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShaderConfig {
    pub folder: &'static str,
    pub vertex: &'static str,
    pub fragment: &'static str,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            folder: "assets/shaders",
            vertex: "vertex.wgsl",
            fragment: "fragment.wgsl",
        }
    }
}

pub struct GraphicsConfig;

impl GraphicsConfig {
    pub fn backends() -> wgpu::Backends {
        if cfg!(target_os = "macos") {
            wgpu::Backends::METAL
        } else {
            wgpu::Backends::PRIMARY | wgpu::Backends::GL
        }
    }
}
