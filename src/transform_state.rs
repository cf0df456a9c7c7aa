use glam::Vec3;

use crate::config::TransformConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformChannel {
    TranslateX,
    TranslateY,
    TranslateZ,
    ScaleX,
    ScaleY,
    ScaleZ,
}

impl TransformChannel {
    pub fn name(&self) -> &'static str {
        match self {
            TransformChannel::TranslateX => "tx",
            TransformChannel::TranslateY => "ty",
            TransformChannel::TranslateZ => "tz",
            TransformChannel::ScaleX => "sx",
            TransformChannel::ScaleY => "sy",
            TransformChannel::ScaleZ => "sz",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformNudge {
    pub channel: TransformChannel,
    pub nudge: Nudge,
}

/// Keyboard-driven offsets applied to the interactive scene object.
#[derive(Debug, Clone)]
pub struct TransformState {
    translation: Vec3,
    scale: Vec3,
    config: TransformConfig,
}

impl TransformState {
    pub fn new(config: TransformConfig) -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
            config,
        }
    }

    pub fn apply(&mut self, nudge: TransformNudge) {
        let delta = match nudge.nudge {
            Nudge::Increase => self.config.step,
            Nudge::Decrease => -self.config.step,
        };

        let limit = self.config.translation_limit;
        let (min_scale, max_scale) = (self.config.min_scale, self.config.max_scale);

        match nudge.channel {
            TransformChannel::TranslateX => {
                self.translation.x = (self.translation.x + delta).clamp(-limit, limit)
            }
            TransformChannel::TranslateY => {
                self.translation.y = (self.translation.y + delta).clamp(-limit, limit)
            }
            TransformChannel::TranslateZ => {
                self.translation.z = (self.translation.z + delta).clamp(-limit, limit)
            }
            TransformChannel::ScaleX => {
                self.scale.x = (self.scale.x + delta).clamp(min_scale, max_scale)
            }
            TransformChannel::ScaleY => {
                self.scale.y = (self.scale.y + delta).clamp(min_scale, max_scale)
            }
            TransformChannel::ScaleZ => {
                self.scale.z = (self.scale.z + delta).clamp(min_scale, max_scale)
            }
        }
    }

    #[allow(dead_code)]
    pub fn set_translation(&mut self, translation: Vec3) {
        let limit = self.config.translation_limit;
        self.translation = translation.clamp(Vec3::splat(-limit), Vec3::splat(limit));
    }

    #[allow(dead_code)]
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale.clamp(
            Vec3::splat(self.config.min_scale),
            Vec3::splat(self.config.max_scale),
        );
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn report(&self) -> String {
        format!(
            "tx = {} ty = {} tz = {}\nsx = {} sy = {} sz = {}",
            self.translation.x,
            self.translation.y,
            self.translation.z,
            self.scale.x,
            self.scale.y,
            self.scale.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nudge(channel: TransformChannel, nudge: Nudge) -> TransformNudge {
        TransformNudge { channel, nudge }
    }

    #[test]
    fn starts_at_identity() {
        let state = TransformState::new(TransformConfig::default());
        assert_eq!(state.translation(), Vec3::ZERO);
        assert_eq!(state.scale(), Vec3::ONE);
    }

    #[test]
    fn each_nudge_touches_one_channel() {
        let mut state = TransformState::new(TransformConfig::default());

        state.apply(nudge(TransformChannel::TranslateY, Nudge::Increase));
        assert!(state
            .translation()
            .abs_diff_eq(Vec3::new(0.0, 0.05, 0.0), 1e-6));
        assert_eq!(state.scale(), Vec3::ONE);

        state.apply(nudge(TransformChannel::ScaleZ, Nudge::Decrease));
        assert!(state.scale().abs_diff_eq(Vec3::new(1.0, 1.0, 0.95), 1e-6));
        assert!(state
            .translation()
            .abs_diff_eq(Vec3::new(0.0, 0.05, 0.0), 1e-6));
    }

    #[test]
    fn increase_then_decrease_cancels_out() {
        let mut state = TransformState::new(TransformConfig::default());

        for _ in 0..7 {
            state.apply(nudge(TransformChannel::TranslateX, Nudge::Increase));
        }
        for _ in 0..7 {
            state.apply(nudge(TransformChannel::TranslateX, Nudge::Decrease));
        }

        assert!(state.translation().abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn translation_is_bounded() {
        let config = TransformConfig {
            translation_limit: 0.2,
            ..Default::default()
        };
        let mut state = TransformState::new(config);

        for _ in 0..100 {
            state.apply(nudge(TransformChannel::TranslateZ, Nudge::Decrease));
        }

        assert_eq!(state.translation().z, -0.2);
    }

    #[test]
    fn scale_never_collapses_or_mirrors() {
        let mut state = TransformState::new(TransformConfig::default());

        for _ in 0..1000 {
            state.apply(nudge(TransformChannel::ScaleX, Nudge::Decrease));
        }

        assert_eq!(state.scale().x, TransformConfig::default().min_scale);
        assert!(state.scale().x > 0.0);
    }

    #[test]
    fn report_lists_all_six_values() {
        let mut state = TransformState::new(TransformConfig::default());
        state.set_translation(Vec3::new(0.5, 0.0, -1.0));

        assert_eq!(
            state.report(),
            "tx = 0.5 ty = 0 tz = -1\nsx = 1 sy = 1 sz = 1"
        );
    }
}
