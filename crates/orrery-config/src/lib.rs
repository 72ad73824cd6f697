//! Configuration for the orrery.
//!
//! Settings persist to disk as RON and can be overridden on the command line
//! via clap. Unknown fields are ignored and missing sections fall back to
//! defaults, so old config files keep working across versions.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, RenderConfig, SceneConfig, WindowConfig,
    default_config_dir,
};
pub use error::ConfigError;
