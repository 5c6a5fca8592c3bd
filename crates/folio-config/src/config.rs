//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Key binding overrides.
    pub input: InputConfig,
    /// Avatar movement settings.
    pub movement: MovementConfig,
    /// Walk animation settings.
    pub animation: AnimationConfig,
    /// Orbit camera settings.
    pub camera: CameraConfig,
    /// Scene theme selection.
    pub scene: SceneConfig,
    /// Asset locations.
    pub assets: AssetConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Input configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Keybinding overrides (action name -> key code names).
    ///
    /// Example: `{"Forward": ["KeyI"], "ToggleFollow": ["KeyF"]}`.
    pub keybindings: HashMap<String, Vec<String>>,
}

/// Movement configuration. `None` fields fall back to the theme preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MovementConfig {
    /// Character speed in world units per second.
    pub speed: Option<f32>,
}

/// Walk animation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Speed above which the walk cycle plays. `None` uses the theme preset.
    pub walk_threshold: Option<f32>,
    /// Prefix stripped from every animation track name before binding.
    pub retarget_prefix: String,
    /// Mixer time advanced per frame, independent of wall-clock time.
    pub mixer_delta: f32,
}

/// Orbit camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Height the look-at target is pinned to while following the avatar.
    pub follow_height: f32,
    /// Vertical field of view in degrees. `None` uses the theme preset.
    pub fov_degrees: Option<f32>,
    /// Minimum orbit distance. `None` uses the theme preset.
    pub min_distance: Option<f32>,
    /// Maximum orbit distance. `None` uses the theme preset.
    pub max_distance: Option<f32>,
    /// Damping factor applied to queued orbit deltas each update.
    pub damping_factor: f32,
    /// Orbit rotation speed multiplier.
    pub rotate_speed: f32,
    /// Wheel zoom speed multiplier.
    pub zoom_speed: f32,
}

/// Available scene themes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ThemeName {
    /// Neon cyberpunk city.
    City,
    /// Green countryside under a sky-blue background.
    Countryside,
    /// Outer-space planet system with clickable planets.
    #[default]
    Space,
}

/// Scene configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Which theme to assemble.
    pub theme: ThemeName,
}

/// Asset locations, relative to `root` unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory that asset paths are resolved against.
    pub root: PathBuf,
    /// Skinned avatar model.
    pub avatar: PathBuf,
    /// Walk-cycle animation.
    pub walk_clip: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            vsync: true,
            title: "Folio".to_string(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            walk_threshold: None,
            retarget_prefix: "mixamorig".to_string(),
            mixer_delta: 1.0 / 60.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_height: 10.0,
            fov_degrees: None,
            min_distance: None,
            max_distance: None,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            avatar: PathBuf::from("avatar.glb"),
            walk_clip: PathBuf::from("walk.glb"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl AssetConfig {
    /// Full path of the avatar model.
    pub fn avatar_path(&self) -> PathBuf {
        self.root.join(&self.avatar)
    }

    /// Full path of the walk clip.
    pub fn walk_clip_path(&self) -> PathBuf {
        self.root.join(&self.walk_clip)
    }
}

/// Platform config directory for Folio (`<config>/folio`).
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("folio"))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
