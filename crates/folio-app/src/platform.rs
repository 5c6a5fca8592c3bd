//! Where Folio keeps its config and logs on this machine.

use std::path::{Path, PathBuf};

use folio_config::ConfigError;

const APP_NAME: &str = "folio";

/// Config and log directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Debug builds write `folio.log` here.
    pub log_dir: PathBuf,
}

impl AppDirs {
    /// Platform directories, with `config_override` replacing the config
    /// directory when given.
    pub fn resolve(config_override: Option<&Path>) -> Result<Self, ConfigError> {
        let config_dir = match config_override {
            Some(dir) => dir.to_path_buf(),
            None => folio_config::config_dir()?,
        };
        let log_dir = dirs::data_local_dir()
            .map(|dir| dir.join(APP_NAME).join("logs"))
            .unwrap_or_else(|| config_dir.join("logs"));
        Ok(Self {
            config_dir,
            log_dir,
        })
    }

    /// Directories rooted under `root`, for tests.
    pub fn with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_replaces_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = AppDirs::resolve(Some(dir.path())).unwrap();
        assert_eq!(dirs.config_dir, dir.path());
    }

    #[test]
    fn test_with_root_layout() {
        let dirs = AppDirs::with_root(Path::new("/tmp/x"));
        assert_eq!(dirs.config_dir, PathBuf::from("/tmp/x/folio/config"));
        assert_eq!(dirs.log_dir, PathBuf::from("/tmp/x/folio/logs"));
    }
}
