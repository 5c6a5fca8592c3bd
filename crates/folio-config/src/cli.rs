//! Command-line argument parsing for Folio.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, ThemeName};

/// Folio command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "folio", about = "Walkable 3D portfolio scene")]
pub struct CliArgs {
    /// Scene theme to assemble.
    #[arg(long, value_enum)]
    pub theme: Option<ThemeName>,

    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Character speed in world units per second.
    #[arg(long)]
    pub speed: Option<f32>,

    /// Speed above which the walk cycle plays.
    #[arg(long)]
    pub walk_threshold: Option<f32>,

    /// Directory that asset paths are resolved against.
    #[arg(long)]
    pub asset_root: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run this many frames without opening a window, then exit.
    #[arg(long)]
    pub headless_ticks: Option<u64>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(theme) = args.theme {
            self.scene.theme = theme;
        }
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(speed) = args.speed {
            self.movement.speed = Some(speed);
        }
        if let Some(threshold) = args.walk_threshold {
            self.animation.walk_threshold = Some(threshold);
        }
        if let Some(ref root) = args.asset_root {
            self.assets.root = root.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            theme: Some(ThemeName::Countryside),
            width: Some(1920),
            speed: Some(4.8),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.scene.theme, ThemeName::Countryside);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.movement.speed, Some(4.8));
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.animation.walk_threshold, None);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "folio",
            "--theme",
            "city",
            "--walk-threshold",
            "0.5",
            "--asset-root",
            "/tmp/assets",
            "--headless-ticks",
            "120",
        ]);
        assert_eq!(args.theme, Some(ThemeName::City));
        assert_eq!(args.walk_threshold, Some(0.5));
        assert_eq!(args.asset_root, Some(PathBuf::from("/tmp/assets")));
        assert_eq!(args.headless_ticks, Some(120));

        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert_eq!(config.assets.root, PathBuf::from("/tmp/assets"));
        assert_eq!(config.animation.walk_threshold, Some(0.5));
    }
}
