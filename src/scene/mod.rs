pub mod mesh;
pub mod scene;
pub mod transform;

pub use mesh::{Mesh, Vertex};
pub use scene::{MeshId, Scene, SceneObject};
pub use transform::Transform;
