pub mod render_mesh;
pub mod renderer;
pub mod scene_pass;
pub mod shader_loader;
pub mod texture;
