//! Builds the ECS world for a configured theme.

use bevy_ecs::prelude::*;
use folio_animation::WalkAnimator;
use folio_assets::{AssetLoader, AssetRequest};
use folio_config::Config;
use folio_input::KeyBindings;
use folio_physics::PhysicsWorld;
use folio_player::{CameraFollowMode, OrbitControls};
use folio_render::Camera;
use folio_scene::{SceneDescription, Theme, ThemeKind};
use glam::Vec2;
use tracing::info;

use crate::resources::{
    AvatarState, FrameClock, FrameOutput, InputState, PendingAssets, RenderCamera, Scene, Tuning,
    Viewport, WalkAnimation,
};

/// The configured theme preset with camera overrides from `config` applied.
pub fn resolve_theme(config: &Config) -> Theme {
    theme_with_overrides(ThemeKind::from(config.scene.theme), config)
}

/// The `kind` preset with the camera and walk overrides from `config` applied.
pub fn theme_with_overrides(kind: ThemeKind, config: &Config) -> Theme {
    let mut theme = Theme::preset(kind);
    if let Some(fov) = config.camera.fov_degrees {
        theme.camera.fov_y_degrees = fov;
    }
    if let Some(min) = config.camera.min_distance {
        theme.camera.min_distance = min;
    }
    if let Some(max) = config.camera.max_distance {
        theme.camera.max_distance = max;
    }
    if let Some(threshold) = config.animation.walk_threshold {
        theme.walk_threshold = threshold;
    }
    theme
}

/// Loads requested at startup: the avatar model and the walk clip.
pub fn asset_requests(config: &Config) -> Vec<AssetRequest> {
    vec![
        AssetRequest::Avatar(config.assets.avatar_path()),
        AssetRequest::WalkClip(config.assets.walk_clip_path()),
    ]
}

/// Inserts every resource the frame systems read. The floor is not in the
/// physics world yet; see [`setup_scene`].
pub fn build_world(config: &Config, loader: AssetLoader) -> World {
    let theme = resolve_theme(config);
    let tuning = Tuning::resolve(&theme, config);
    let viewport = Vec2::new(config.window.width as f32, config.window.height as f32);

    let mut orbit = OrbitControls::new(
        theme.camera.eye,
        theme.camera.target,
        theme.camera.min_distance,
        theme.camera.max_distance,
    );
    orbit.damping_factor = config.camera.damping_factor;
    orbit.rotate_speed = config.camera.rotate_speed;
    orbit.zoom_speed = config.camera.zoom_speed;

    let camera = Camera::perspective(
        theme.camera.eye,
        theme.camera.target,
        theme.camera.fov_y_degrees,
        viewport.x / viewport.y.max(1.0),
        theme.camera.near,
        theme.camera.far,
    );

    let walk = WalkAnimator::new(
        theme.walk_threshold,
        config.animation.mixer_delta,
        config.animation.retarget_prefix.clone(),
    );

    let mut world = World::new();
    world.insert_resource(PhysicsWorld::new());
    world.insert_resource(InputState::with_bindings(KeyBindings::from_overrides(
        &config.input.keybindings,
    )));
    world.insert_resource(AvatarState::default());
    world.insert_resource(WalkAnimation(walk));
    world.insert_resource(FrameClock::default());
    world.insert_resource(tuning);
    world.insert_resource(Viewport(viewport));
    world.insert_resource(orbit);
    world.insert_resource(CameraFollowMode::default());
    world.insert_resource(RenderCamera(camera));
    world.insert_resource(FrameOutput::default());
    world.insert_resource(PendingAssets(loader));
    world.insert_resource(Scene(SceneDescription::assemble(theme)));
    world
}

/// Adds the static floor to physics and reports the lighting rig.
pub fn setup_scene(world: &mut World) {
    let scene = world.resource::<Scene>().0.clone();
    let floor = scene.floor;
    world
        .resource_mut::<PhysicsWorld>()
        .spawn_ground(floor.half_extents(), floor.center());

    let lighting = &scene.lighting;
    info!(
        "Lighting: ambient {:.1}, directional {:.1} at {}, key light {:.1} at {}",
        lighting.ambient_intensity,
        lighting.directional.intensity,
        lighting.directional.position,
        lighting.key_light.intensity,
        lighting.key_light.position
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_config::ThemeName;

    #[test]
    fn test_build_world_inserts_resources() {
        let world = build_world(&Config::default(), AssetLoader::idle());
        assert!(world.contains_resource::<PhysicsWorld>());
        assert!(world.contains_resource::<InputState>());
        assert!(world.contains_resource::<AvatarState>());
        assert!(world.contains_resource::<WalkAnimation>());
        assert!(world.contains_resource::<OrbitControls>());
        assert!(world.contains_resource::<CameraFollowMode>());
        assert!(world.contains_resource::<RenderCamera>());
        assert!(world.contains_resource::<PendingAssets>());
        assert!(world.contains_resource::<Scene>());
    }

    #[test]
    fn test_config_overrides_theme() {
        let mut config = Config::default();
        config.scene.theme = ThemeName::Countryside;
        config.camera.max_distance = Some(250.0);
        config.animation.walk_threshold = Some(0.5);
        config.movement.speed = Some(12.0);

        let theme = resolve_theme(&config);
        assert_eq!(theme.kind, ThemeKind::Countryside);
        assert_eq!(theme.camera.max_distance, 250.0);
        assert_eq!(theme.walk_threshold, 0.5);

        let world = build_world(&config, AssetLoader::idle());
        assert_eq!(world.resource::<Tuning>().speed, 12.0);
        assert_eq!(world.resource::<WalkAnimation>().0.threshold(), 0.5);
    }

    #[test]
    fn test_speed_defaults_to_theme() {
        let mut config = Config::default();
        config.scene.theme = ThemeName::Countryside;
        let world = build_world(&config, AssetLoader::idle());
        assert_eq!(world.resource::<Tuning>().speed, 4.8);
    }

    #[test]
    fn test_asset_requests_follow_config() {
        let requests = asset_requests(&Config::default());
        assert_eq!(
            requests,
            vec![
                AssetRequest::Avatar("assets/avatar.glb".into()),
                AssetRequest::WalkClip("assets/walk.glb".into()),
            ]
        );
    }

    #[test]
    fn test_setup_scene_adds_floor() {
        let mut world = build_world(&Config::default(), AssetLoader::idle());
        setup_scene(&mut world);
        assert_eq!(world.resource::<PhysicsWorld>().rigid_body_set.len(), 1);
    }

    #[test]
    fn test_planets_only_in_space() {
        let world = build_world(&Config::default(), AssetLoader::idle());
        assert_eq!(world.resource::<Scene>().0.planets.len(), 4);

        let mut config = Config::default();
        config.scene.theme = ThemeName::City;
        let world = build_world(&config, AssetLoader::idle());
        assert!(world.resource::<Scene>().0.planets.is_empty());
    }
}
