//! Keeps the orbit target on the avatar without moving the eye.

use bevy_ecs::prelude::*;
use glam::Vec3;
use tracing::info;

use crate::orbit::OrbitControls;

/// Camera-follow flag flipped by the toggle key. Nothing reads it besides the
/// toggle itself.
///
/// Key auto-repeat does not count as a press, so holding the key flips the
/// flag once rather than on every repeat.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraFollowMode(pub bool);

impl Default for CameraFollowMode {
    fn default() -> Self {
        Self(true)
    }
}

impl CameraFollowMode {
    pub fn toggle(&mut self) {
        self.0 = !self.0;
        info!("Camera follow mode: {}", if self.0 { "on" } else { "off" });
    }
}

/// Pins the orbit target above the avatar at `fixed_height`.
///
/// X and Z track the avatar; Y is always `fixed_height` regardless of the
/// avatar's height. No-op when there is no avatar.
pub fn update_target(controls: &mut OrbitControls, avatar_position: Option<Vec3>, fixed_height: f32) {
    let Some(avatar) = avatar_position else {
        return;
    };
    controls.set_target(Vec3::new(avatar.x, fixed_height, avatar.z));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> OrbitControls {
        OrbitControls::new(Vec3::new(0.0, 40.0, 20.0), Vec3::new(0.0, 4.0, -10.0), 5.0, 100.0)
    }

    #[test]
    fn test_target_tracks_avatar_xz_at_fixed_height() {
        let mut c = controls();
        for avatar in [
            Vec3::new(3.0, -50.0, 7.0),
            Vec3::new(-120.5, 0.0, 44.0),
            Vec3::new(0.0, 999.0, 0.0),
        ] {
            update_target(&mut c, Some(avatar), 10.0);
            assert_eq!(c.target(), Vec3::new(avatar.x, 10.0, avatar.z));
        }
    }

    #[test]
    fn test_eye_is_never_written() {
        let mut c = controls();
        let eye = c.eye();
        update_target(&mut c, Some(Vec3::new(50.0, 0.0, 50.0)), 10.0);
        assert_eq!(c.eye(), eye);
    }

    #[test]
    fn test_no_avatar_is_noop() {
        let mut c = controls();
        let before = (c.eye(), c.target());
        update_target(&mut c, None, 10.0);
        assert_eq!((c.eye(), c.target()), before);
    }

    #[test]
    fn test_follow_mode_toggles() {
        let mut mode = CameraFollowMode::default();
        assert!(mode.0);
        mode.toggle();
        assert!(!mode.0);
        mode.toggle();
        assert!(mode.0);
    }
}
