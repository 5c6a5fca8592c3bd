//! Avatar control and the camera that watches it.

pub mod camera_follow;
pub mod movement;
pub mod orbit;

pub use camera_follow::{CameraFollowMode, update_target};
pub use movement::{apply_movement, compute_velocity, facing_yaw};
pub use orbit::OrbitControls;
