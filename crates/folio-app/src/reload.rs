//! Re-reads `config.ron` while the app runs.

use std::path::PathBuf;

use folio_config::{CliArgs, Config};
use tracing::warn;

/// The file's last known contents plus the CLI overrides to reapply on top.
pub struct ConfigWatch {
    dir: PathBuf,
    file: Config,
    cli: CliArgs,
}

impl ConfigWatch {
    /// `file` is the config as loaded from `dir`, before CLI overrides.
    pub fn new(dir: impl Into<PathBuf>, file: Config, cli: CliArgs) -> Self {
        Self {
            dir: dir.into(),
            file,
            cli,
        }
    }

    /// The effective config when the file changed since the last poll.
    ///
    /// A file that fails to read or parse keeps the previous config.
    pub fn poll(&mut self) -> Option<Config> {
        match self.file.reload(&self.dir) {
            Ok(Some(file)) => {
                self.file = file;
                let mut effective = self.file.clone();
                effective.apply_cli_overrides(&self.cli);
                Some(effective)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Keeping previous config: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watch(dir: &std::path::Path, cli: CliArgs) -> ConfigWatch {
        let config = Config::default();
        config.save(dir).unwrap();
        ConfigWatch::new(dir, config, cli)
    }

    #[test]
    fn test_unchanged_file_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut watch = watch(dir.path(), CliArgs::default());
        assert!(watch.poll().is_none());
    }

    #[test]
    fn test_edit_is_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut watch = watch(dir.path(), CliArgs::default());

        let mut edited = Config::default();
        edited.camera.rotate_speed = 2.0;
        edited.save(dir.path()).unwrap();

        let reloaded = watch.poll().unwrap();
        assert_eq!(reloaded.camera.rotate_speed, 2.0);
        assert!(watch.poll().is_none());
    }

    #[test]
    fn test_cli_overrides_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let cli = CliArgs {
            speed: Some(7.0),
            ..Default::default()
        };
        let mut watch = watch(dir.path(), cli);

        let mut edited = Config::default();
        edited.movement.speed = Some(1.0);
        edited.camera.zoom_speed = 3.0;
        edited.save(dir.path()).unwrap();

        let reloaded = watch.poll().unwrap();
        assert_eq!(reloaded.movement.speed, Some(7.0));
        assert_eq!(reloaded.camera.zoom_speed, 3.0);
    }

    #[test]
    fn test_broken_file_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        let mut watch = watch(dir.path(), CliArgs::default());
        std::fs::write(dir.path().join("config.ron"), "(window: oops").unwrap();
        assert!(watch.poll().is_none());

        Config::default().save(dir.path()).unwrap();
        assert!(watch.poll().is_none());
    }
}
