use glam::{Mat4, Quat, Vec3, Vec4};
use id_arena::{Arena, Id};

use crate::scene::{Mesh, Transform};
use crate::transform_state::TransformState;

pub type MeshId = Id<Mesh>;
pub type ObjectId = Id<SceneObject>;

pub struct SceneObject {
    pub name: String,
    pub mesh_id: MeshId,
    pub transform: Transform,
    pub color: Vec4,
    /// Follows the keyboard transform offsets every frame.
    pub interactive: bool,
    model_matrix: Mat4,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, mesh_id: MeshId, transform: Transform, color: Vec4) -> Self {
        Self {
            name: name.into(),
            mesh_id,
            transform,
            color,
            interactive: false,
            model_matrix: transform.matrix(),
        }
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }
}

pub struct Scene {
    pub meshes: Arena<Mesh>,
    pub objects: Arena<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            meshes: Arena::new(),
            objects: Arena::new(),
        }
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.alloc(mesh)
    }

    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        self.objects.alloc(object)
    }

    #[allow(dead_code)]
    pub fn get_object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    #[allow(dead_code)]
    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    /// Recomputes model matrices of interactive objects. Static objects keep
    /// the matrix computed when they were added.
    pub fn update(&mut self, offsets: &TransformState) {
        for (_, object) in self.objects.iter_mut() {
            if object.interactive {
                object.model_matrix = object.transform.with_offsets(offsets).matrix();
            }
        }
    }

    /// The fixed desk scene shown by the viewer.
    pub fn build() -> Self {
        let mut scene = Scene::new();

        let plane = scene.add_mesh(Mesh::plane());
        let cube = scene.add_mesh(Mesh::cube());
        let cylinder = scene.add_mesh(Mesh::cylinder(32));
        let cone = scene.add_mesh(Mesh::cone(32));
        let sphere = scene.add_mesh(Mesh::sphere(16, 32));
        let pyramid = scene.add_mesh(Mesh::pyramid());
        let torus = scene.add_mesh(Mesh::torus(1.0, 0.2, 32, 16));

        let objects = [
            SceneObject::new(
                "Floor",
                plane,
                Transform::IDENTITY.with_scale(Vec3::new(20.0, 1.0, 10.0)),
                Vec4::new(0.45, 0.42, 0.38, 1.0),
            ),
            SceneObject::new(
                "Book",
                cube,
                Transform::from_translation(Vec3::new(-3.5, 0.25, 0.5))
                    .with_rotation(Quat::from_rotation_y(15f32.to_radians()))
                    .with_scale(Vec3::new(3.0, 0.5, 2.2)),
                Vec4::new(0.55, 0.12, 0.10, 1.0),
            ),
            SceneObject::new(
                "Mug",
                cylinder,
                Transform::from_translation(Vec3::new(2.5, 0.0, 1.5))
                    .with_scale(Vec3::new(0.6, 1.4, 0.6)),
                Vec4::new(0.85, 0.85, 0.80, 1.0),
            ),
            SceneObject::new(
                "Mug Handle",
                torus,
                Transform::from_translation(Vec3::new(3.1, 0.7, 1.5))
                    .with_rotation(Quat::from_rotation_x(90f32.to_radians()))
                    .with_scale(Vec3::splat(0.3)),
                Vec4::new(0.85, 0.85, 0.80, 1.0),
            ),
            SceneObject::new(
                "Ball",
                sphere,
                Transform::from_translation(Vec3::new(0.0, 0.6, 3.0))
                    .with_scale(Vec3::splat(0.6)),
                Vec4::new(0.20, 0.45, 0.80, 1.0),
            ),
            SceneObject::new(
                "Lamp Shade",
                cone,
                Transform::from_translation(Vec3::new(4.0, 0.0, -2.5))
                    .with_scale(Vec3::new(1.0, 1.5, 1.0)),
                Vec4::new(0.90, 0.75, 0.30, 1.0),
            ),
            SceneObject::new(
                "Paperweight",
                pyramid,
                Transform::from_translation(Vec3::new(-1.5, 0.0, -2.5))
                    .with_rotation(Quat::from_rotation_y(30f32.to_radians()))
                    .with_scale(Vec3::splat(1.2)),
                Vec4::new(0.30, 0.70, 0.45, 1.0),
            ),
            SceneObject::new(
                "Block",
                cube,
                Transform::from_translation(Vec3::new(0.0, 1.0, 0.0)),
                Vec4::new(0.80, 0.35, 0.60, 1.0),
            )
            .interactive(),
        ];

        for object in objects {
            scene.add_object(object);
        }

        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformConfig;
    use crate::transform_state::{Nudge, TransformChannel, TransformNudge};

    #[test]
    fn build_places_one_interactive_object() {
        let scene = Scene::build();

        let interactive: Vec<&SceneObject> = scene
            .objects
            .iter()
            .map(|(_, object)| object)
            .filter(|object| object.interactive)
            .collect();

        assert_eq!(interactive.len(), 1);
        assert_eq!(interactive[0].name, "Block");
    }

    #[test]
    fn every_object_references_a_scene_mesh() {
        let scene = Scene::build();

        for (_, object) in scene.objects.iter() {
            assert!(scene.meshes.get(object.mesh_id).is_some(), "{}", object.name);
        }
    }

    #[test]
    fn update_moves_only_interactive_objects() {
        let mut scene = Scene::build();
        let block = scene.get_object_by_name("Block").unwrap();
        let book = scene.get_object_by_name("Book").unwrap();
        let book_before = scene.get_object(book).unwrap().model_matrix();

        let mut offsets = TransformState::new(TransformConfig::default());
        offsets.apply(TransformNudge {
            channel: TransformChannel::TranslateX,
            nudge: Nudge::Increase,
        });
        offsets.apply(TransformNudge {
            channel: TransformChannel::TranslateX,
            nudge: Nudge::Increase,
        });
        scene.update(&offsets);

        let block_matrix = scene.get_object(block).unwrap().model_matrix();
        assert!((block_matrix.w_axis.x - 0.1).abs() < 1e-6);
        assert!((block_matrix.w_axis.y - 1.0).abs() < 1e-6);
        assert_eq!(scene.get_object(book).unwrap().model_matrix(), book_before);
    }

    #[test]
    fn update_with_default_offsets_keeps_base_transform() {
        let mut scene = Scene::build();
        let block = scene.get_object_by_name("Block").unwrap();
        let before = scene.get_object(block).unwrap().model_matrix();

        scene.update(&TransformState::new(TransformConfig::default()));

        assert!(scene
            .get_object(block)
            .unwrap()
            .model_matrix()
            .abs_diff_eq(before, 1e-6));
    }
}
