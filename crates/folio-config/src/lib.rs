//! Configuration system for Folio.
//!
//! Settings persist to disk as a RON file in the platform config directory.
//! CLI flags parsed with clap override whatever the file contains, and a
//! reload check reports whether the file changed since it was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AnimationConfig, AssetConfig, CameraConfig, Config, DebugConfig, InputConfig, MovementConfig,
    SceneConfig, ThemeName, WindowConfig, config_dir,
};
pub use error::ConfigError;
