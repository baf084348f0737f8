mod app;
mod camera;
mod config;
mod error;
mod framebuffer;
mod input;
mod mesh;
mod rasterizer;
mod renderer;
mod scene;
mod texture;
mod vertex;

use std::path::PathBuf;

use anyhow::Context;

use crate::app::App;
use crate::config::AppConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // usage: tactic-grid [config.json]
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("loading configuration")?;

    let mut app = App::new(config).context("creating window")?;
    app.run()?;
    Ok(())
}
