//! The avatar's dynamic sphere body.

use glam::{Quat, Vec3};
use rapier3d::prelude::*;
use tracing::debug;

use crate::PhysicsWorld;

/// Handles to the avatar's rigid body and its sphere collider.
///
/// Rotations are locked on the body, so its orientation only ever changes when
/// [`set_yaw`](Self::set_yaw) writes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
    pub radius: f32,
}

/// Adds a dynamic sphere of `radius` and `mass` at `position`.
pub fn spawn_avatar(physics: &mut PhysicsWorld, radius: f32, position: Vec3, mass: f32) -> AvatarBody {
    let body = RigidBodyBuilder::dynamic()
        .translation(Vector::new(position.x, position.y, position.z))
        .lock_rotations()
        .build();
    let body_handle = physics.rigid_body_set.insert(body);

    let collider = ColliderBuilder::ball(radius).mass(mass).friction(0.0).build();
    let collider_handle =
        physics
            .collider_set
            .insert_with_parent(collider, body_handle, &mut physics.rigid_body_set);

    debug!("Avatar sphere r={radius} spawned at {position}");

    AvatarBody {
        body_handle,
        collider_handle,
        radius,
    }
}

impl AvatarBody {
    /// World-space centre of the sphere.
    pub fn position(&self, physics: &PhysicsWorld) -> Vec3 {
        physics
            .rigid_body_set
            .get(self.body_handle)
            .map(|body| {
                let t = body.translation();
                Vec3::new(t.x, t.y, t.z)
            })
            .unwrap_or(Vec3::ZERO)
    }

    /// Current orientation.
    pub fn orientation(&self, physics: &PhysicsWorld) -> Quat {
        physics
            .rigid_body_set
            .get(self.body_handle)
            .map(|body| {
                let r = body.rotation();
                Quat::from_xyzw(r.x, r.y, r.z, r.w)
            })
            .unwrap_or(Quat::IDENTITY)
    }

    /// Current linear velocity.
    pub fn velocity(&self, physics: &PhysicsWorld) -> Vec3 {
        physics
            .rigid_body_set
            .get(self.body_handle)
            .map(|body| {
                let v = body.linvel();
                Vec3::new(v.x, v.y, v.z)
            })
            .unwrap_or(Vec3::ZERO)
    }

    /// Overwrites the linear velocity and wakes the body.
    pub fn set_velocity(&self, physics: &mut PhysicsWorld, velocity: Vec3) {
        if let Some(body) = physics.rigid_body_set.get_mut(self.body_handle) {
            body.set_linvel(Vector::new(velocity.x, velocity.y, velocity.z), true);
        }
    }

    /// Sets the orientation to a pure rotation of `yaw` radians about +Y.
    pub fn set_yaw(&self, physics: &mut PhysicsWorld, yaw: f32) {
        if let Some(body) = physics.rigid_body_set.get_mut(self.body_handle) {
            body.set_rotation(rapier3d::math::Rotation::from_rotation_y(yaw), true);
        }
    }
}
