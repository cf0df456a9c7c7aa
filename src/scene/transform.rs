use glam::{Mat4, Quat, Vec3};

use crate::transform_state::TransformState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Scale first, then rotate, then translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Layers the keyboard offsets on top: the object grows in place, then slides.
    pub fn with_offsets(&self, offsets: &TransformState) -> Self {
        Self {
            translation: self.translation + offsets.translation(),
            rotation: self.rotation,
            scale: self.scale * offsets.scale(),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformConfig;

    #[test]
    fn matrix_scales_before_translating() {
        let transform = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0))
            .with_scale(Vec3::splat(2.0));

        let point = transform.matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!(point.abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn matrix_rotates_before_translating() {
        let transform = Transform::from_translation(Vec3::new(0.0, 0.0, 5.0))
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));

        let point = transform.matrix().transform_point3(Vec3::X);
        assert!(point.abs_diff_eq(Vec3::new(0.0, 0.0, 4.0), 1e-6));
    }

    #[test]
    fn offsets_add_translation_and_multiply_scale() {
        let mut offsets = TransformState::new(TransformConfig::default());
        offsets.set_translation(Vec3::new(0.1, 0.2, 0.3));
        offsets.set_scale(Vec3::new(2.0, 1.0, 0.5));

        let base = Transform::from_translation(Vec3::Y).with_scale(Vec3::splat(2.0));
        let combined = base.with_offsets(&offsets);

        assert!(combined
            .translation
            .abs_diff_eq(Vec3::new(0.1, 1.2, 0.3), 1e-6));
        assert!(combined.scale.abs_diff_eq(Vec3::new(4.0, 2.0, 1.0), 1e-6));
    }

    #[test]
    fn translated_offsets_match_documented_composition() {
        let mut offsets = TransformState::new(TransformConfig::default());
        offsets.set_translation(Vec3::new(0.1, 0.0, 0.0));

        let model = Transform::IDENTITY.with_offsets(&offsets).matrix();
        let expected = Mat4::from_translation(Vec3::new(0.1, 0.0, 0.0))
            * Mat4::from_scale(Vec3::new(1.0, 1.0, 1.0));

        assert!(model.abs_diff_eq(expected, 1e-6));
        assert!((model.w_axis.x - 0.1).abs() < 1e-6);
    }
}
