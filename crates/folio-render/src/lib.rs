//! Presenting frames: GPU context, perspective camera, and the per-frame clear pass.

pub mod camera;
pub mod frame;
pub mod gpu;

pub use camera::Camera;
pub use frame::{FrameOutcome, SceneRenderer, clear_color};
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
