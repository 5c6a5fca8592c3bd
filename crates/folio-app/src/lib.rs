//! Folio application: ECS world, frame scheduling and the drivers that tick it.

mod headless;
mod platform;
mod reload;
pub mod resources;
mod scheduler;
pub mod systems;
mod window;
mod world;

pub use headless::HeadlessDriver;
pub use platform::AppDirs;
pub use reload::ConfigWatch;
pub use scheduler::{FrameReport, FrameScheduler, FrameTick, SchedulerState};
pub use window::{WindowDriver, run_windowed, window_attributes_from_config};
pub use world::{asset_requests, build_world, resolve_theme, setup_scene};
