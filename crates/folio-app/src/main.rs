//! The `folio` binary.

use clap::Parser;
use folio_app::{
    AppDirs, ConfigWatch, FrameScheduler, HeadlessDriver, asset_requests, run_windowed,
};
use folio_assets::AssetLoader;
use folio_config::{CliArgs, Config};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let dirs = match AppDirs::resolve(args.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to resolve config directory: {e}");
            std::process::exit(1);
        }
    };

    let file_config = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    let mut config = file_config.clone();
    config.apply_cli_overrides(&args);

    folio_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(
        "Folio starting: theme {:?}, config at {}",
        config.scene.theme,
        dirs.config_dir.display()
    );

    let loader = AssetLoader::spawn(asset_requests(&config));
    let mut scheduler = FrameScheduler::new(&config, loader);

    if let Some(ticks) = args.headless_ticks {
        scheduler.start();
        HeadlessDriver::new(ticks).run(&mut scheduler);
        return;
    }

    let watch = ConfigWatch::new(dirs.config_dir, file_config, args);
    if let Err(e) = run_windowed(config, watch, scheduler) {
        error!("Event loop failed: {e}");
        std::process::exit(1);
    }
}
