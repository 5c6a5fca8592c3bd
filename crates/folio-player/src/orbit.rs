//! Mouse-driven orbit camera around a look-at target.
//!
//! Drag queues azimuth/polar deltas, the wheel queues a zoom factor, and
//! [`OrbitControls::update`] folds them into the eye position. With damping
//! enabled only a fraction of the queued rotation is applied per update and
//! the rest decays, which gives the camera its glide after a drag.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};

/// Polar angle is kept this far from the poles so the up vector stays defined.
const POLE_EPSILON: f32 = 1e-6;

/// Per-wheel-line zoom factor before `zoom_speed` is applied.
const ZOOM_BASE: f32 = 0.95;

/// Orbit camera state: eye, target and the pending user input.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitControls {
    eye: Vec3,
    target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Lowest polar angle from +Y, radians.
    pub min_polar_angle: f32,
    /// Highest polar angle from +Y, radians. π/2 keeps the eye above the target.
    pub max_polar_angle: f32,
    pub enable_damping: bool,
    /// Fraction of the queued rotation applied per update when damping.
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl OrbitControls {
    pub fn new(eye: Vec3, target: Vec3, min_distance: f32, max_distance: f32) -> Self {
        Self {
            eye,
            target,
            min_distance,
            max_distance,
            min_polar_angle: 0.0,
            max_polar_angle: FRAC_PI_2,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Moves the look-at point. The eye stays where it is until the next
    /// [`update`](Self::update) re-derives it around the new target.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn distance(&self) -> f32 {
        (self.eye - self.target).length()
    }

    /// Angle between +Y and the target-to-eye offset.
    pub fn polar_angle(&self) -> f32 {
        let offset = self.eye - self.target;
        let radius = offset.length();
        if radius == 0.0 {
            0.0
        } else {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        }
    }

    /// Azimuth of the target-to-eye offset about +Y, measured from +Z.
    pub fn azimuth(&self) -> f32 {
        let offset = self.eye - self.target;
        offset.x.atan2(offset.z)
    }

    /// Queue a drag of `delta` pixels on a viewport `viewport_height` pixels tall.
    /// Dragging the full height turns the camera once around.
    pub fn rotate_by_drag(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.delta_theta -= TAU * delta.x / viewport_height * self.rotate_speed;
        self.delta_phi -= TAU * delta.y / viewport_height * self.rotate_speed;
    }

    /// Queue a zoom of `lines` wheel lines. Positive lines move the eye closer.
    pub fn zoom_by_wheel(&mut self, lines: f32) {
        if lines == 0.0 {
            return;
        }
        self.scale *= ZOOM_BASE.powf(self.zoom_speed * lines);
    }

    /// Applies pending input and constraints, then rewrites the eye.
    ///
    /// Returns `true` when the eye moved.
    pub fn update(&mut self) -> bool {
        let offset = self.eye - self.target;
        let mut radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        if self.enable_damping {
            theta += self.delta_theta * self.damping_factor;
            phi += self.delta_phi * self.damping_factor;
        } else {
            theta += self.delta_theta;
            phi += self.delta_phi;
        }

        phi = phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);

        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        let new_eye = self.target + new_offset;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;

        let moved = new_eye.distance_squared(self.eye) > 1e-6;
        self.eye = new_eye;
        moved
    }
}
