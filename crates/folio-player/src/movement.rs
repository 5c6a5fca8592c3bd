//! Direct velocity control of the avatar body from held movement keys.

use folio_input::HeldDirections;
use folio_physics::{AvatarBody, PhysicsWorld};
use glam::Vec3;

/// Horizontal velocity `(vx, vz)` for the held directions.
///
/// Forward is -Z and left is -X. When opposing keys are both held, backward
/// beats forward and right beats left. Diagonals are not normalised, so
/// forward+left moves at `speed * √2`.
pub fn compute_velocity(held: HeldDirections, speed: f32) -> (f32, f32) {
    let mut vx = 0.0;
    let mut vz = 0.0;
    if held.forward {
        vz = -speed;
    }
    if held.backward {
        vz = speed;
    }
    if held.left {
        vx = -speed;
    }
    if held.right {
        vx = speed;
    }
    (vx, vz)
}

/// Yaw about +Y that faces along `(vx, vz)`, or `None` when not moving.
pub fn facing_yaw(vx: f32, vz: f32) -> Option<f32> {
    if vx.hypot(vz) > 0.0 {
        Some(vx.atan2(vz))
    } else {
        None
    }
}

/// Writes `(vx, 0, vz)` as the avatar's velocity and, when moving, turns the
/// avatar to face its heading.
///
/// The velocity is overwritten every call, held keys or not, so vertical speed
/// restarts at zero each tick. Returns the applied velocity, or `None` without
/// touching anything when there is no avatar yet.
pub fn apply_movement(
    physics: &mut PhysicsWorld,
    avatar: Option<&AvatarBody>,
    held: HeldDirections,
    speed: f32,
) -> Option<Vec3> {
    let avatar = avatar?;
    let (vx, vz) = compute_velocity(held, speed);
    let velocity = Vec3::new(vx, 0.0, vz);
    avatar.set_velocity(physics, velocity);
    if let Some(yaw) = facing_yaw(vx, vz) {
        avatar.set_yaw(physics, yaw);
    }
    Some(velocity)
}
