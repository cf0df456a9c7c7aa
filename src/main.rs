use anyhow::Result;

mod camera;
mod config;
mod input;
mod rendering;
mod scene;
mod transform_state;
mod viewer;
mod window;

fn main() -> Result<()> {
    pretty_env_logger::init();

    window::run(config::ViewerConfig::default())?;

    Ok(())
}
