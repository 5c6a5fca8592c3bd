//! Per-frame systems, registered in frame order by [`frame_schedule`].

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{ExecutorKind, IntoSystemConfigs};
use folio_assets::AssetEvent;
use folio_input::MoveAction;
use folio_physics::{FIXED_DT, PhysicsWorld, spawn_avatar};
use folio_player::{CameraFollowMode, OrbitControls, apply_movement, update_target};
use folio_scene::{AvatarPlacement, Ray, detail_url, pick_planet};
use glam::Vec2;
use tracing::{debug, info, warn};

use crate::resources::{
    AvatarKind, AvatarState, AvatarVisual, FrameClock, FrameOutput, InputState, PendingAssets,
    RenderCamera, Scene, Tuning, Viewport, WalkAnimation,
};

/// Builds the single-threaded, strictly ordered frame schedule.
pub fn frame_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            advance_clock,
            apply_asset_events,
            toggle_follow_mode,
            drive_avatar,
            step_physics,
            sync_avatar_visual,
            animate_walk,
            decorative_effects,
            follow_avatar,
            orbit_input,
            update_orbit,
            request_render,
            pick_on_click,
        )
            .chain(),
    );
    schedule
}

pub fn advance_clock(mut clock: ResMut<FrameClock>, mut output: ResMut<FrameOutput>) {
    clock.tick += 1;
    clock.elapsed += FIXED_DT;
    *output = FrameOutput::default();
}

/// Applies whatever the background loaders finished since the last frame.
pub fn apply_asset_events(
    mut assets: ResMut<PendingAssets>,
    mut physics: ResMut<PhysicsWorld>,
    mut avatar: ResMut<AvatarState>,
    mut walk: ResMut<WalkAnimation>,
    scene: Res<Scene>,
) {
    let theme = &scene.0.theme;
    for event in assets.0.drain() {
        match event {
            AssetEvent::AvatarReady(skeleton) => {
                place_avatar(&mut physics, &mut avatar, theme.avatar, AvatarKind::Model);
                walk.0.set_skeleton(skeleton);
            }
            AssetEvent::AvatarFailed(reason) => {
                warn!("Avatar model unavailable ({reason}), using placeholder");
                place_avatar(
                    &mut physics,
                    &mut avatar,
                    theme.placeholder.body,
                    AvatarKind::Placeholder,
                );
            }
            AssetEvent::ClipReady(clip) => walk.0.set_clip(clip),
            AssetEvent::ClipFailed(reason) => {
                warn!("Walk animation unavailable: {reason}");
            }
        }
    }
    assets.0.reap_finished();
}

fn place_avatar(
    physics: &mut PhysicsWorld,
    avatar: &mut AvatarState,
    placement: AvatarPlacement,
    kind: AvatarKind,
) {
    if avatar.exists() {
        debug!("Avatar already placed, ignoring {kind:?}");
        return;
    }
    let body = spawn_avatar(physics, placement.radius, placement.position, placement.mass);
    info!("{kind:?} avatar spawned at {}", placement.position);
    avatar.body = Some(body);
    avatar.kind = Some(kind);
}

pub fn toggle_follow_mode(input: Res<InputState>, mut follow: ResMut<CameraFollowMode>) {
    if input
        .bindings
        .just_pressed(&input.keyboard, MoveAction::ToggleFollow)
    {
        follow.toggle();
    }
}

pub fn drive_avatar(
    input: Res<InputState>,
    tuning: Res<Tuning>,
    avatar: Res<AvatarState>,
    mut physics: ResMut<PhysicsWorld>,
    mut output: ResMut<FrameOutput>,
) {
    let held = input.bindings.held_directions(&input.keyboard);
    output.velocity = apply_movement(&mut physics, avatar.body.as_ref(), held, tuning.speed);
}

pub fn step_physics(mut physics: ResMut<PhysicsWorld>) {
    physics.step();
}

/// Copies the body transform onto the visual avatar.
pub fn sync_avatar_visual(physics: Res<PhysicsWorld>, mut avatar: ResMut<AvatarState>) {
    let Some(body) = avatar.body else {
        return;
    };
    avatar.visual = Some(AvatarVisual {
        position: body.position(&physics),
        orientation: body.orientation(&physics),
    });
}

pub fn animate_walk(
    physics: Res<PhysicsWorld>,
    avatar: Res<AvatarState>,
    mut walk: ResMut<WalkAnimation>,
    mut output: ResMut<FrameOutput>,
) {
    let velocity = avatar.body.map(|body| body.velocity(&physics));
    output.playback = walk.0.update(velocity);
}

/// Hook for decoration animation (twinkling stars, drifting fog). Nothing to do.
pub fn decorative_effects() {}

pub fn follow_avatar(
    avatar: Res<AvatarState>,
    tuning: Res<Tuning>,
    mut orbit: ResMut<OrbitControls>,
) {
    let position = avatar.visual.map(|visual| visual.position);
    update_target(&mut orbit, position, tuning.follow_height);
}

pub fn orbit_input(input: Res<InputState>, viewport: Res<Viewport>, mut orbit: ResMut<OrbitControls>) {
    let drag = input.pointer.drag_delta();
    if drag != Vec2::ZERO {
        orbit.rotate_by_drag(drag, viewport.0.y);
    }
    orbit.zoom_by_wheel(input.pointer.wheel());
}

pub fn update_orbit(mut orbit: ResMut<OrbitControls>) {
    orbit.update();
}

pub fn request_render(
    orbit: Res<OrbitControls>,
    mut camera: ResMut<RenderCamera>,
    mut output: ResMut<FrameOutput>,
) {
    camera.0.look_at(orbit.eye(), orbit.target());
    output.redraw_requested = true;
}

/// Turns a click into a planet detail-page request.
pub fn pick_on_click(
    input: Res<InputState>,
    viewport: Res<Viewport>,
    camera: Res<RenderCamera>,
    scene: Res<Scene>,
    mut output: ResMut<FrameOutput>,
) {
    let Some(cursor) = input.pointer.click() else {
        return;
    };
    if scene.0.planets.is_empty() {
        return;
    }
    let ndc = Ray::cursor_to_ndc(cursor, viewport.0);
    let Some(ray) = Ray::from_screen(ndc, camera.0.view_projection_matrix()) else {
        return;
    };
    if let Some(planet) = pick_planet(&ray, &scene.0.planets) {
        let url = detail_url(&planet.name);
        info!("Navigate to {url} ({})", planet.name);
        output.navigation = Some(url);
    }
}
