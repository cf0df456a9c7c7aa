use crate::{
    camera::CameraController,
    config::ViewerConfig,
    input::{Action, HeldKeys, KeyBindings},
    scene::Scene,
    transform_state::TransformState,
};

/// Everything the render loop mutates between frames.
pub struct ViewerState {
    pub camera: CameraController,
    pub transform: TransformState,
    pub scene: Scene,
    pub bindings: KeyBindings,
    quit_requested: bool,
}

impl ViewerState {
    pub fn new(config: &ViewerConfig) -> Self {
        let bindings = KeyBindings::default();

        for (key, actions) in bindings.collisions() {
            let described: Vec<String> = actions.iter().map(Action::describe).collect();
            log::warn!(
                "Key {:?} is bound to {} actions: {}",
                key,
                actions.len(),
                described.join(", ")
            );
        }

        Self {
            camera: CameraController::new(config.camera.clone()),
            transform: TransformState::new(config.transform.clone()),
            scene: Scene::build(),
            bindings,
            quit_requested: false,
        }
    }

    /// Dispatches the actions of every held key, in binding table order.
    pub fn process_input(&mut self, held: &HeldKeys) {
        let actions: Vec<Action> = self.bindings.held_actions(held).collect();

        for action in actions {
            self.apply_action(action);
        }
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit_requested = true,
            Action::Zoom(direction) => self.camera.zoom(direction),
            Action::Pan(direction) => self.camera.pan(direction),
            Action::SelectProjection(mode) => self.camera.select_projection(mode),
            Action::Nudge(nudge) => self.transform.apply(nudge),
            Action::PrintTransform => println!("{}", self.transform.report()),
        }
    }

    pub fn update(&mut self) {
        self.scene.update(&self.transform);
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}
