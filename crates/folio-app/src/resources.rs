//! ECS resources shared by the per-frame systems.

use bevy_ecs::prelude::*;
use folio_animation::{PlaybackState, WalkAnimator};
use folio_assets::AssetLoader;
use folio_config::Config;
use folio_input::{KeyBindings, KeyboardState, PointerState};
use folio_physics::AvatarBody;
use folio_render::Camera;
use folio_scene::{SceneDescription, Theme};
use glam::{Quat, Vec2, Vec3};

/// Raw device state plus the bindings that interpret it.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub pointer: PointerState,
    pub bindings: KeyBindings,
}

impl InputState {
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    /// Drop per-frame edges (fresh presses, drag, wheel, clicks).
    pub fn clear_transients(&mut self) {
        self.keyboard.clear_transients();
        self.pointer.clear_transients();
    }
}

/// Which avatar stands in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarKind {
    /// The loaded skinned model.
    Model,
    /// Primitive stand-in after the model failed to load.
    Placeholder,
}

/// Transform the visual avatar is drawn with, copied from the body each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarVisual {
    pub position: Vec3,
    pub orientation: Quat,
}

/// The avatar's physics body and its visual. Both absent until an asset event
/// arrives.
#[derive(Resource, Debug, Clone, Default)]
pub struct AvatarState {
    pub body: Option<AvatarBody>,
    pub kind: Option<AvatarKind>,
    pub visual: Option<AvatarVisual>,
}

impl AvatarState {
    pub fn exists(&self) -> bool {
        self.body.is_some()
    }
}

/// Walk-cycle coordinator.
#[derive(Resource, Debug, Clone)]
pub struct WalkAnimation(pub WalkAnimator);

/// Frame counter and accumulated fixed time.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    pub tick: u64,
    pub elapsed: f32,
}

/// Per-session tunables resolved from the theme and config overrides.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Tuning {
    pub speed: f32,
    pub follow_height: f32,
    pub mixer_delta: f32,
}

impl Tuning {
    pub fn resolve(theme: &Theme, config: &Config) -> Self {
        Self {
            speed: config.movement.speed.unwrap_or(theme.speed),
            follow_height: config.camera.follow_height,
            mixer_delta: config.animation.mixer_delta,
        }
    }
}

/// Drawable size in physical pixels, used to turn clicks into rays.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport(pub Vec2);

/// The assembled scene.
#[derive(Resource, Debug, Clone)]
pub struct Scene(pub SceneDescription);

/// Background asset loads, polled once per frame.
#[derive(Resource)]
pub struct PendingAssets(pub AssetLoader);

/// Camera used for drawing and picking, synced from the orbit each frame.
#[derive(Resource, Debug, Clone)]
pub struct RenderCamera(pub Camera);

/// What the frame produced, read back by drivers.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    /// Velocity written by the movement controller, if an avatar exists.
    pub velocity: Option<Vec3>,
    pub playback: PlaybackState,
    /// Detail page requested by a planet click.
    pub navigation: Option<String>,
    pub redraw_requested: bool,
}
