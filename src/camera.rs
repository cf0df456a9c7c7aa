use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::config::CameraConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Perspective,
    OrthoFront,
    OrthoSide,
    OrthoTop,
}

impl ProjectionMode {
    pub fn name(&self) -> &'static str {
        match self {
            ProjectionMode::Perspective => "perspective",
            ProjectionMode::OrthoFront => "ortho front",
            ProjectionMode::OrthoSide => "ortho side",
            ProjectionMode::OrthoTop => "ortho top",
        }
    }

    pub fn is_orthographic(&self) -> bool {
        !matches!(self, ProjectionMode::Perspective)
    }

    /// Unit vector pointing from the target towards the eye.
    fn eye_direction(&self) -> Vec3 {
        match self {
            ProjectionMode::Perspective => Vec3::new(0.0, 0.4, 1.0).normalize(),
            ProjectionMode::OrthoFront => Vec3::Z,
            ProjectionMode::OrthoSide => Vec3::X,
            ProjectionMode::OrthoTop => Vec3::Y,
        }
    }

    fn up(&self) -> Vec3 {
        match self {
            // Looking straight down; Y can't be up.
            ProjectionMode::OrthoTop => Vec3::NEG_Z,
            _ => Vec3::Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

impl PanDirection {
    pub fn name(&self) -> &'static str {
        match self {
            PanDirection::Left => "left",
            PanDirection::Right => "right",
            PanDirection::Up => "up",
            PanDirection::Down => "down",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

const CANONICAL_TARGET: Vec3 = Vec3::ZERO;

/// Orbit-style camera: an eye placed `distance` away from `target` along the
/// active mode's fixed direction. Panning moves both in the view plane.
#[derive(Debug, Clone)]
pub struct CameraController {
    config: CameraConfig,
    mode: ProjectionMode,
    target: Vec3,
    distance: f32,
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Self {
        let mut camera = Self {
            config,
            mode: ProjectionMode::Perspective,
            target: CANONICAL_TARGET,
            distance: 0.0,
        };
        camera.reset_vantage();
        camera
    }

    #[allow(dead_code)]
    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    #[allow(dead_code)]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[allow(dead_code)]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn eye(&self) -> Vec3 {
        self.target + self.mode.eye_direction() * self.distance
    }

    /// Switching to another mode snaps the camera to that mode's canonical
    /// vantage point. Re-selecting the active mode keeps the current pan/zoom.
    pub fn select_projection(&mut self, mode: ProjectionMode) {
        if mode == self.mode {
            return;
        }

        log::debug!("Projection mode: {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
        self.reset_vantage();
    }

    fn reset_vantage(&mut self) {
        self.target = CANONICAL_TARGET;
        self.distance = if self.mode.is_orthographic() {
            self.config.ortho_distance
        } else {
            self.config.perspective_distance
        };
    }

    /// Right and up axes of the view plane, in world space.
    pub fn view_plane_axes(&self) -> (Vec3, Vec3) {
        let forward = -self.mode.eye_direction();
        let right = forward.cross(self.mode.up()).normalize();
        let up = right.cross(forward);
        (right, up)
    }

    pub fn pan(&mut self, direction: PanDirection) {
        let (right, up) = self.view_plane_axes();

        let axis = match direction {
            PanDirection::Left => -right,
            PanDirection::Right => right,
            PanDirection::Up => up,
            PanDirection::Down => -up,
        };

        self.target += axis * self.config.pan_step;
    }

    pub fn zoom(&mut self, direction: ZoomDirection) {
        let distance = match direction {
            ZoomDirection::In => self.distance - self.config.zoom_step,
            ZoomDirection::Out => self.distance + self.config.zoom_step,
        };

        // An ortho eye inside the desk only clips it away; the extent doesn't shrink.
        let min_distance = if self.mode.is_orthographic() {
            self.config.ortho_min_distance
        } else {
            self.config.min_distance
        };

        // Past the far plane there is nothing left to see.
        self.distance = distance.clamp(min_distance, self.config.z_far * 0.5);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, self.mode.up())
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        let CameraConfig {
            z_near,
            z_far,
            ortho_half_extent,
            fov_y_degrees,
            ..
        } = self.config;

        if self.mode.is_orthographic() {
            let half_width = ortho_half_extent * aspect_ratio;
            Mat4::orthographic_rh(
                -half_width,
                half_width,
                -ortho_half_extent,
                ortho_half_extent,
                z_near,
                z_far,
            )
        } else {
            Mat4::perspective_rh(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Default)]
pub struct CameraUniform {
    view: Mat4,
    projection: Mat4,
}

impl CameraUniform {
    pub fn update(&mut self, resolution: winit::dpi::PhysicalSize<u32>, camera: &CameraController) {
        let aspect_ratio = resolution.width.max(1) as f32 / resolution.height.max(1) as f32;
        self.view = camera.view_matrix();
        self.projection = camera.projection_matrix(aspect_ratio);
    }

    pub fn create_buffer(&self, device: &wgpu::Device) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Uniform Buffer"),
            contents: bytemuck::cast_slice(&[*self]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    pub fn update_buffer(&self, queue: &wgpu::Queue, buffer: &wgpu::Buffer) {
        queue.write_buffer(buffer, 0, bytemuck::cast_slice(&[*self]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> CameraController {
        CameraController::new(CameraConfig::default())
    }

    #[test]
    fn starts_in_perspective_at_canonical_vantage() {
        let camera = camera();
        assert_eq!(camera.mode(), ProjectionMode::Perspective);
        assert_eq!(camera.target(), Vec3::ZERO);
        assert_eq!(camera.distance(), CameraConfig::default().perspective_distance);
    }

    #[test]
    fn pan_moves_by_one_step_per_press() {
        let mut camera = camera();
        let start = camera.eye();

        for n in 1..=5 {
            camera.pan(PanDirection::Right);
            let expected = start + Vec3::X * 0.05 * n as f32;
            assert!(camera.eye().abs_diff_eq(expected, 1e-5));
        }
    }

    #[test]
    fn pan_up_follows_view_plane_up() {
        let mut camera = camera();
        let (_, up) = camera.view_plane_axes();
        let start = camera.target();

        camera.pan(PanDirection::Up);
        camera.pan(PanDirection::Up);

        assert!(camera.target().abs_diff_eq(start + up * 0.1, 1e-5));
        assert!(up.dot(camera.eye() - camera.target()).abs() < 1e-5);
    }

    #[test]
    fn pan_is_reversible() {
        let mut camera = camera();
        let start = camera.eye();

        for _ in 0..13 {
            camera.pan(PanDirection::Left);
            camera.pan(PanDirection::Down);
        }
        for _ in 0..13 {
            camera.pan(PanDirection::Right);
            camera.pan(PanDirection::Up);
        }

        assert!(camera.eye().abs_diff_eq(start, 1e-4));
    }

    #[test]
    fn zoom_never_reaches_zero() {
        let mut camera = camera();

        for _ in 0..10_000 {
            camera.zoom(ZoomDirection::In);
            assert!(camera.distance() > 0.0);
        }

        assert_eq!(camera.distance(), CameraConfig::default().min_distance);
        assert!(camera.view_matrix().is_finite());
    }

    #[test]
    fn zoom_out_then_in_restores_distance() {
        let mut camera = camera();
        let start = camera.distance();

        camera.zoom(ZoomDirection::Out);
        camera.zoom(ZoomDirection::Out);
        camera.zoom(ZoomDirection::In);
        camera.zoom(ZoomDirection::In);

        assert!((camera.distance() - start).abs() < 1e-5);
    }

    #[test]
    fn ortho_zoom_in_keeps_the_desk_in_front_of_the_near_plane() {
        let scene = crate::scene::Scene::build();
        let mut camera = camera();
        camera.select_projection(ProjectionMode::OrthoFront);

        for _ in 0..200 {
            camera.zoom(ZoomDirection::In);
        }
        assert_eq!(camera.distance(), CameraConfig::default().ortho_min_distance);

        let clip_from_world = camera.projection_matrix(1.25) * camera.view_matrix();
        for (_, object) in scene.objects.iter() {
            let mesh = &scene.meshes[object.mesh_id];
            let clip_from_object = clip_from_world * object.model_matrix();

            for vertex in &mesh.vertices {
                let clip = clip_from_object * vertex.position.extend(1.0);
                let depth = clip.z / clip.w;
                assert!(
                    (0.0..=1.0).contains(&depth),
                    "{} clipped at depth {}",
                    object.name,
                    depth
                );
            }
        }
    }

    #[test]
    fn reselecting_the_active_mode_changes_nothing() {
        let mut camera = camera();
        camera.select_projection(ProjectionMode::OrthoSide);
        camera.pan(PanDirection::Left);
        camera.zoom(ZoomDirection::In);

        let target = camera.target();
        let distance = camera.distance();
        let view = camera.view_matrix();

        camera.select_projection(ProjectionMode::OrthoSide);

        assert_eq!(camera.target(), target);
        assert_eq!(camera.distance(), distance);
        assert_eq!(camera.view_matrix(), view);
    }

    #[test]
    fn returning_to_perspective_discards_pans() {
        let mut fresh = camera();
        let canonical_eye = fresh.eye();

        for _ in 0..20 {
            fresh.pan(PanDirection::Right);
            fresh.zoom(ZoomDirection::In);
        }
        fresh.select_projection(ProjectionMode::OrthoFront);
        fresh.select_projection(ProjectionMode::Perspective);

        assert_eq!(fresh.eye(), canonical_eye);
        assert_eq!(fresh.target(), Vec3::ZERO);
    }

    #[test]
    fn ortho_presets_look_at_origin_from_their_axis() {
        let mut camera = camera();
        let distance = CameraConfig::default().ortho_distance;

        camera.select_projection(ProjectionMode::OrthoFront);
        assert!(camera.eye().abs_diff_eq(Vec3::Z * distance, 1e-6));

        camera.select_projection(ProjectionMode::OrthoSide);
        assert!(camera.eye().abs_diff_eq(Vec3::X * distance, 1e-6));

        camera.select_projection(ProjectionMode::OrthoTop);
        assert!(camera.eye().abs_diff_eq(Vec3::Y * distance, 1e-6));
        assert!(camera.view_matrix().is_finite());
    }

    #[test]
    fn holding_pan_right_shifts_view_translation() {
        let mut camera = camera();
        let before = camera.view_matrix();

        let frames = 17;
        for _ in 0..frames {
            camera.pan(PanDirection::Right);
        }
        let after = camera.view_matrix();

        let shift = before.w_axis.x - after.w_axis.x;
        assert!((shift - frames as f32 * 0.05).abs() < 1e-4);
        assert!((before.w_axis.y - after.w_axis.y).abs() < 1e-5);
    }

    #[test]
    fn projection_kind_follows_mode() {
        let mut camera = camera();

        let perspective = camera.projection_matrix(1.25);
        assert_eq!(perspective.w_axis.w, 0.0);

        camera.select_projection(ProjectionMode::OrthoTop);
        let ortho = camera.projection_matrix(1.25);
        assert_eq!(ortho.w_axis.w, 1.0);

        let half_extent = CameraConfig::default().ortho_half_extent;
        assert!((ortho.x_axis.x - 1.0 / (half_extent * 1.25)).abs() < 1e-6);
        assert!((ortho.y_axis.y - 1.0 / half_extent).abs() < 1e-6);
    }
}
