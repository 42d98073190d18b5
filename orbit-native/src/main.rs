mod app;
mod hud;
mod input;
mod renderer;

use std::path::PathBuf;

use anyhow::Context;
use orbit_core::config::{AppConfig, DEFAULT_CONFIG_FILE};

fn main() -> anyhow::Result<()>
{
  // wgpu validation errors and warnings go to the console. RUST_LOG overrides
  // the default, e.g. RUST_LOG=wgpu=debug for more verbose GPU output.
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("info,wgpu_hal=off,naga=warn"),
  )
  .init();

  let config_path =
    std::env::args_os().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

  let config = AppConfig::load_or_default(&config_path)
    .with_context(|| format!("failed to load config {}", config_path.display()))?;

  app::run(config)
}
