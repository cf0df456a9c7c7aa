use std::collections::HashSet;

use winit::{
    event::{ElementState, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::{
    camera::{PanDirection, ProjectionMode, ZoomDirection},
    transform_state::{Nudge, TransformChannel, TransformNudge},
};

/// Keys currently held down. Polled once per frame rather than reacting to
/// individual key events, so a held key acts on every frame.
#[derive(Debug, Default)]
pub struct HeldKeys {
    keys: HashSet<KeyCode>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };

                match event.state {
                    ElementState::Pressed => self.press(code),
                    ElementState::Released => self.release(code),
                }
            }
            // Releases are not delivered while unfocused; drop everything to avoid stuck keys.
            WindowEvent::Focused(false) => self.keys.clear(),
            _ => (),
        }
    }

    pub fn press(&mut self, key: KeyCode) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Zoom(ZoomDirection),
    Pan(PanDirection),
    SelectProjection(ProjectionMode),
    Nudge(TransformNudge),
    PrintTransform,
}

impl Action {
    pub fn describe(&self) -> String {
        match self {
            Action::Quit => "close the window and exit".to_string(),
            Action::Zoom(ZoomDirection::In) => "zoom in".to_string(),
            Action::Zoom(ZoomDirection::Out) => "zoom out".to_string(),
            Action::Pan(direction) => format!("pan {}", direction.name()),
            Action::SelectProjection(mode) => format!("{} view", mode.name()),
            Action::Nudge(nudge) => format!(
                "{} {}",
                nudge.channel.name(),
                match nudge.nudge {
                    Nudge::Increase => "+",
                    Nudge::Decrease => "-",
                }
            ),
            Action::PrintTransform => "print transform values".to_string(),
        }
    }
}

/// Ordered key to action table. Actions of held keys are dispatched in table
/// order, which keeps frames deterministic regardless of press order.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, Action)>,
}

impl KeyBindings {
    pub fn new(bindings: Vec<(KeyCode, Action)>) -> Self {
        Self { bindings }
    }

    pub fn held_actions<'a>(&'a self, held: &'a HeldKeys) -> impl Iterator<Item = Action> + 'a {
        self.bindings
            .iter()
            .filter(|(key, _)| held.is_held(*key))
            .map(|(_, action)| *action)
    }

    /// Keys bound to more than one action, with those actions in table order.
    pub fn collisions(&self) -> Vec<(KeyCode, Vec<Action>)> {
        let mut collisions: Vec<(KeyCode, Vec<Action>)> = Vec::new();

        for (key, action) in &self.bindings {
            if let Some((_, actions)) = collisions.iter_mut().find(|(k, _)| k == key) {
                actions.push(*action);
            } else {
                collisions.push((*key, vec![*action]));
            }
        }

        collisions.retain(|(_, actions)| actions.len() > 1);
        collisions
    }

    pub fn banner(&self) -> String {
        let mut banner = String::from("\n*** KEY FUNCTIONS: ***\n");

        for (key, action) in &self.bindings {
            banner.push_str(&format!("{} - {}\n", key_label(*key), action.describe()));
        }

        banner
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use TransformChannel::*;

        let nudge = |channel, nudge| Action::Nudge(TransformNudge { channel, nudge });

        Self::new(vec![
            (KeyCode::Escape, Action::Quit),
            (
                KeyCode::Digit1,
                Action::SelectProjection(ProjectionMode::OrthoFront),
            ),
            (
                KeyCode::Digit2,
                Action::SelectProjection(ProjectionMode::OrthoSide),
            ),
            (
                KeyCode::Digit3,
                Action::SelectProjection(ProjectionMode::OrthoTop),
            ),
            (
                KeyCode::KeyP,
                Action::SelectProjection(ProjectionMode::Perspective),
            ),
            (KeyCode::KeyW, Action::Zoom(ZoomDirection::In)),
            (KeyCode::KeyS, Action::Zoom(ZoomDirection::Out)),
            (KeyCode::KeyA, Action::Pan(PanDirection::Left)),
            (KeyCode::KeyD, Action::Pan(PanDirection::Right)),
            (KeyCode::KeyQ, Action::Pan(PanDirection::Up)),
            (KeyCode::KeyE, Action::Pan(PanDirection::Down)),
            (KeyCode::KeyX, nudge(TranslateX, Nudge::Increase)),
            (KeyCode::KeyC, nudge(TranslateX, Nudge::Decrease)),
            (KeyCode::KeyY, nudge(TranslateY, Nudge::Increase)),
            (KeyCode::KeyU, nudge(TranslateY, Nudge::Decrease)),
            (KeyCode::KeyN, nudge(TranslateZ, Nudge::Increase)),
            (KeyCode::KeyM, nudge(TranslateZ, Nudge::Decrease)),
            (KeyCode::KeyF, nudge(ScaleX, Nudge::Increase)),
            (KeyCode::KeyJ, nudge(ScaleX, Nudge::Decrease)),
            (KeyCode::KeyG, nudge(ScaleY, Nudge::Increase)),
            (KeyCode::KeyK, nudge(ScaleY, Nudge::Decrease)),
            (KeyCode::KeyH, nudge(ScaleZ, Nudge::Increase)),
            (KeyCode::KeyL, nudge(ScaleZ, Nudge::Decrease)),
            (KeyCode::KeyP, Action::PrintTransform),
        ])
    }
}

fn key_label(key: KeyCode) -> String {
    let name = format!("{:?}", key);

    name.strip_prefix("Key")
        .or_else(|| name.strip_prefix("Digit"))
        .map(str::to_string)
        .unwrap_or_else(|| match key {
            KeyCode::Escape => "ESC".to_string(),
            _ => name.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_actions_follow_table_order() {
        let mut held = HeldKeys::new();
        held.press(KeyCode::KeyD);
        held.press(KeyCode::Digit1);

        let bindings = KeyBindings::default();
        let actions: Vec<Action> = bindings.held_actions(&held).collect();

        assert_eq!(
            actions,
            vec![
                Action::SelectProjection(ProjectionMode::OrthoFront),
                Action::Pan(PanDirection::Right),
            ]
        );
    }

    #[test]
    fn released_keys_stop_dispatching() {
        let mut held = HeldKeys::new();
        held.press(KeyCode::KeyA);
        held.release(KeyCode::KeyA);

        let bindings = KeyBindings::default();
        assert_eq!(bindings.held_actions(&held).count(), 0);
    }

    #[test]
    fn unbound_keys_produce_no_actions() {
        let mut held = HeldKeys::new();
        held.press(KeyCode::KeyZ);
        held.press(KeyCode::F5);

        let bindings = KeyBindings::default();
        assert_eq!(bindings.held_actions(&held).count(), 0);
    }

    #[test]
    fn default_bindings_report_the_p_collision() {
        let collisions = KeyBindings::default().collisions();

        assert_eq!(
            collisions,
            vec![(
                KeyCode::KeyP,
                vec![
                    Action::SelectProjection(ProjectionMode::Perspective),
                    Action::PrintTransform,
                ]
            )]
        );
    }

    #[test]
    fn held_p_dispatches_both_actions() {
        let mut held = HeldKeys::new();
        held.press(KeyCode::KeyP);

        let bindings = KeyBindings::default();
        let actions: Vec<Action> = bindings.held_actions(&held).collect();

        assert_eq!(
            actions,
            vec![
                Action::SelectProjection(ProjectionMode::Perspective),
                Action::PrintTransform,
            ]
        );
    }

    #[test]
    fn banner_lists_every_binding() {
        let bindings = KeyBindings::default();
        let banner = bindings.banner();

        assert!(banner.contains("ESC - close the window and exit"));
        assert!(banner.contains("W - zoom in"));
        assert!(banner.contains("1 - ortho front view"));
        assert!(banner.contains("P - perspective view"));
        assert!(banner.contains("P - print transform values"));
        assert!(banner.contains("X - tx +"));
        assert_eq!(banner.lines().filter(|l| l.contains(" - ")).count(), 24);
    }
}
