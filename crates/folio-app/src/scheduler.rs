//! Frame scheduler: runs the ordered frame systems once per tick.
//!
//! The scheduler only computes the next state. Deciding when the next tick
//! happens belongs to a driver ([`HeadlessDriver`](crate::HeadlessDriver) or
//! [`WindowDriver`](crate::WindowDriver)).

use bevy_ecs::prelude::*;
use folio_animation::PlaybackState;
use folio_assets::AssetLoader;
use folio_config::Config;
use folio_input::KeyBindings;
use folio_player::OrbitControls;
use folio_scene::ThemeKind;
use folio_render::Camera;
use glam::{Vec2, Vec3};
use tracing::{info, warn};

use crate::resources::{
    AvatarState, FrameClock, FrameOutput, InputState, RenderCamera, Scene, Tuning, Viewport,
    WalkAnimation,
};
use crate::systems::frame_schedule;
use crate::world::{build_world, setup_scene, theme_with_overrides};

/// Lifecycle of a [`FrameScheduler`]. Moves to `Running` once and never back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchedulerState {
    #[default]
    Uninitialized,
    Running,
}

/// Snapshot of one tick, returned to the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Frames run so far, including this one.
    pub tick: u64,
    /// `false` when the tick was ignored because the scheduler was not started.
    pub ran: bool,
    pub velocity: Option<Vec3>,
    pub playback: PlaybackState,
    pub avatar_position: Option<Vec3>,
    pub camera_eye: Vec3,
    pub camera_target: Vec3,
    pub navigation: Option<String>,
    pub redraw_requested: bool,
}

/// One step of frame logic.
pub trait FrameTick {
    fn tick(&mut self) -> FrameReport;
}

pub struct FrameScheduler {
    world: World,
    schedule: Schedule,
    state: SchedulerState,
}

impl FrameScheduler {
    pub fn new(config: &Config, loader: AssetLoader) -> Self {
        Self {
            world: build_world(config, loader),
            schedule: frame_schedule(),
            state: SchedulerState::Uninitialized,
        }
    }

    /// Sets up the floor and lighting, then starts ticking. Later calls do nothing.
    pub fn start(&mut self) {
        if self.state == SchedulerState::Running {
            warn!("Frame scheduler already running");
            return;
        }
        setup_scene(&mut self.world);
        self.state = SchedulerState::Running;
        info!("Frame scheduler started");
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Input state, written by drivers between ticks.
    pub fn input_mut(&mut self) -> Mut<'_, InputState> {
        self.world.resource_mut::<InputState>()
    }

    pub fn avatar(&self) -> &AvatarState {
        self.world.resource::<AvatarState>()
    }

    pub fn camera(&self) -> &Camera {
        &self.world.resource::<RenderCamera>().0
    }

    /// Colour to clear the frame to, from the theme.
    pub fn clear_color(&self) -> [f32; 3] {
        self.world.resource::<Scene>().0.theme.clear_color.to_array()
    }

    /// Records a new drawable size for picking and the camera aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.world.resource_mut::<Viewport>().0 = Vec2::new(width as f32, height as f32);
        self.world
            .resource_mut::<RenderCamera>()
            .0
            .set_aspect_ratio(width as f32, height as f32);
    }

    /// Applies a reloaded configuration to the running world.
    ///
    /// Tuning, key bindings, orbit limits and the walk threshold change in
    /// place. The theme, window and asset paths only change on restart.
    pub fn apply_config(&mut self, config: &Config) {
        let kind = self.world.resource::<Scene>().0.theme.kind;
        if ThemeKind::from(config.scene.theme) != kind {
            warn!("Theme change to {:?} applies on restart", config.scene.theme);
        }
        let theme = theme_with_overrides(kind, config);

        self.world.insert_resource(Tuning::resolve(&theme, config));
        self.world.resource_mut::<InputState>().bindings =
            KeyBindings::from_overrides(&config.input.keybindings);

        let mut orbit = self.world.resource_mut::<OrbitControls>();
        orbit.min_distance = theme.camera.min_distance;
        orbit.max_distance = theme.camera.max_distance;
        orbit.damping_factor = config.camera.damping_factor;
        orbit.rotate_speed = config.camera.rotate_speed;
        orbit.zoom_speed = config.camera.zoom_speed;

        self.world.resource_mut::<RenderCamera>().0.fov_y = theme.camera.fov_y_degrees.to_radians();
        self.world
            .resource_mut::<WalkAnimation>()
            .0
            .set_threshold(theme.walk_threshold);
        info!("Configuration reloaded");
    }

    fn report(&self, ran: bool) -> FrameReport {
        let output = self.world.resource::<FrameOutput>();
        let orbit = self.world.resource::<OrbitControls>();
        FrameReport {
            tick: self.world.resource::<FrameClock>().tick,
            ran,
            velocity: output.velocity,
            playback: output.playback,
            avatar_position: self.avatar().visual.map(|visual| visual.position),
            camera_eye: orbit.eye(),
            camera_target: orbit.target(),
            navigation: output.navigation.clone(),
            redraw_requested: ran && output.redraw_requested,
        }
    }
}

impl FrameTick for FrameScheduler {
    fn tick(&mut self) -> FrameReport {
        if self.state == SchedulerState::Uninitialized {
            return self.report(false);
        }
        self.schedule.run(&mut self.world);
        self.world.resource_mut::<InputState>().clear_transients();
        self.report(true)
    }
}
