//! Binary entry point: config, logging, then the event loop.

mod frame;
mod renderer;
mod window;

use clap::Parser;
use orrery_config::{CliArgs, Config, default_config_dir};
use tracing::{error, info, warn};

fn main() {
    let args = CliArgs::parse();
    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", config_dir.display());
            Config::default()
        }
    };
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );

    info!(
        "Starting orrery ({}x{}, vsync: {})",
        config.window.width, config.window.height, config.window.vsync
    );
    if !config.scene.texture_dir.exists() {
        warn!(
            "Texture directory {} does not exist, bodies will use flat colors",
            config.scene.texture_dir.display()
        );
    }

    if let Err(e) = window::run(config) {
        error!("Event loop error: {e}");
        std::process::exit(1);
    }
}
