//! Rigid-body simulation for the avatar and the floor it walks on.
//!
//! Wraps the Rapier 3D physics engine behind a single [`PhysicsWorld`] resource
//! that owns all simulation state. The avatar body is the only source of truth
//! for the avatar's transform; everything visual copies from it.

mod avatar;

pub use avatar::{AvatarBody, spawn_avatar};

use bevy_ecs::prelude::*;
use rapier3d::prelude::*;
use tracing::debug;

/// Gravity along -Y in m/s².
pub const GRAVITY: f32 = -9.82;

/// Fixed simulation step in seconds.
pub const FIXED_DT: f32 = 1.0 / 60.0;

/// Central physics simulation resource owning all Rapier state.
#[derive(Resource)]
pub struct PhysicsWorld {
    /// World-space gravity vector.
    pub gravity: Vector,
    /// Timestep and solver configuration.
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    steps: u64,
}

impl PhysicsWorld {
    /// Creates an empty world with gravity `(0, -9.82, 0)` and a `1/60` s step.
    pub fn new() -> Self {
        let integration_parameters = IntegrationParameters {
            dt: FIXED_DT,
            ..Default::default()
        };

        Self {
            gravity: Vector::new(0.0, GRAVITY, 0.0),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            steps: 0,
        }
    }

    /// Advances the simulation by exactly one fixed timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
        self.steps += 1;
    }

    /// Number of steps taken since creation.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Returns the current gravity as `(x, y, z)`.
    pub fn gravity(&self) -> (f32, f32, f32) {
        (self.gravity.x, self.gravity.y, self.gravity.z)
    }

    /// Adds a static box collider. `half_extents` are half the box size.
    pub fn spawn_ground(&mut self, half_extents: glam::Vec3, center: glam::Vec3) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(Vector::new(center.x, center.y, center.z))
            .build();
        let handle = self.rigid_body_set.insert(body);
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        debug!(
            "Ground {:.0}x{:.0} at y={}",
            half_extents.x * 2.0,
            half_extents.z * 2.0,
            center.y
        );
        handle
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_world_initializes() {
        let world = PhysicsWorld::new();
        assert_eq!(world.rigid_body_set.len(), 0);
        assert_eq!(world.collider_set.len(), 0);
        assert_eq!(world.steps(), 0);
    }

    #[test]
    fn test_gravity_default() {
        assert_eq!(PhysicsWorld::new().gravity(), (0.0, -9.82, 0.0));
    }

    #[test]
    fn test_timestep_is_one_sixtieth() {
        let world = PhysicsWorld::new();
        assert!((world.integration_parameters.dt - 1.0 / 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ground_is_static() {
        let mut world = PhysicsWorld::new();
        let handle = world.spawn_ground(
            glam::Vec3::new(250.0, 0.5, 250.0),
            glam::Vec3::new(0.0, 1.5, 0.0),
        );
        assert!(world.rigid_body_set[handle].is_fixed());
        assert_eq!(world.collider_set.len(), 1);

        for _ in 0..30 {
            world.step();
        }
        let t = world.rigid_body_set[handle].translation();
        assert!((t.y - 1.5).abs() < 1e-6);
        assert_eq!(world.steps(), 30);
    }

    #[test]
    fn test_empty_world_steps_without_error() {
        let mut world = PhysicsWorld::new();
        for _ in 0..100 {
            world.step();
        }
    }
}
