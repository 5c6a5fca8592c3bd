//! Per-theme presets and the scene layout assembled from them.

use folio_config::ThemeName;
use glam::Vec3;
use tracing::info;

use crate::color::Color;
use crate::planets::{Planet, space_planets};

/// The three scene variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeKind {
    /// Dark neon city.
    City,
    /// Green field under a sky-blue background.
    Countryside,
    /// Planet system floating over a black floor.
    Space,
}

impl From<ThemeName> for ThemeKind {
    fn from(name: ThemeName) -> Self {
        match name {
            ThemeName::City => ThemeKind::City,
            ThemeName::Countryside => ThemeKind::Countryside,
            ThemeName::Space => ThemeKind::Space,
        }
    }
}

/// Static floor slab. `center_y` is the centre of a box `2 * half_height` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Floor {
    pub width: f32,
    pub depth: f32,
    pub center_y: f32,
    pub half_height: f32,
    pub color: Color,
}

impl Floor {
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width / 2.0, self.half_height, self.depth / 2.0)
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(0.0, self.center_y, 0.0)
    }

    /// Height of the walkable top face.
    pub fn top(&self) -> f32 {
        self.center_y + self.half_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    /// Distance at which the light falls off to zero.
    pub range: f32,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightingPreset {
    pub ambient_color: Color,
    pub ambient_intensity: f32,
    pub directional: DirectionalLight,
    /// The light hovering over the avatar's start area.
    pub key_light: PointLight,
}

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

/// Decorative set pieces. They carry no behaviour; drawing them is up to
/// whatever renders the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoration {
    NeonGrid,
    Buildings,
    NeonLights,
    FogParticles,
    SpawnCircle,
    Stairs,
    Starfield,
    GalaxyBackdrop,
    Nebula,
    OrbitRings,
    Planets,
}

/// Where and how big the avatar's physics sphere is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarPlacement {
    pub position: Vec3,
    pub radius: f32,
    pub mass: f32,
}

/// Primitive stand-in used when the avatar model fails to load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderAvatar {
    pub body: AvatarPlacement,
    /// Visual torso sphere radius and its height above the group origin.
    pub torso_radius: f32,
    pub torso_height: f32,
    /// Leg cylinder radius and length.
    pub leg_radius: f32,
    pub leg_length: f32,
    /// Legs sit at `(±leg_offset.x, leg_offset.y, 0)` relative to the group.
    pub leg_offset: glam::Vec2,
    pub torso_color: Color,
    pub leg_color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPreset {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

/// Everything that differs between themes.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub kind: ThemeKind,
    pub background: Color,
    /// Colour the frame is cleared to before anything is drawn.
    pub clear_color: Color,
    pub fog: Option<Fog>,
    pub floor: Floor,
    pub lighting: LightingPreset,
    pub decorations: Vec<Decoration>,
    pub avatar: AvatarPlacement,
    pub placeholder: PlaceholderAvatar,
    /// Avatar speed in world units per second.
    pub speed: f32,
    /// Speed above which the walk cycle plays.
    pub walk_threshold: f32,
    pub camera: CameraPreset,
}

const TORSO_COLOR: Color = Color::hex(0x4169E1);
const LEG_COLOR: Color = Color::hex(0x2E5A88);

impl Theme {
    pub fn preset(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::City => Self::city(),
            ThemeKind::Countryside => Self::countryside(),
            ThemeKind::Space => Self::space(),
        }
    }

    fn city() -> Self {
        let background = Color::hex(0x0a0a0a);
        Self {
            kind: ThemeKind::City,
            background,
            clear_color: background,
            fog: Some(Fog {
                color: background,
                near: 50.0,
                far: 200.0,
            }),
            floor: Floor {
                width: 500.0,
                depth: 500.0,
                center_y: 1.5,
                half_height: 1.0,
                color: Color::hex(0x1a1a2e),
            },
            lighting: LightingPreset {
                ambient_color: Color::WHITE,
                ambient_intensity: 0.4,
                directional: DirectionalLight {
                    color: Color::WHITE,
                    intensity: 0.6,
                    position: Vec3::new(50.0, 50.0, 50.0),
                },
                key_light: PointLight {
                    color: Color::WHITE,
                    intensity: 0.8,
                    range: 80.0,
                    position: Vec3::new(0.0, 30.0, 0.0),
                },
            },
            decorations: vec![
                Decoration::NeonGrid,
                Decoration::Buildings,
                Decoration::NeonLights,
                Decoration::FogParticles,
                Decoration::SpawnCircle,
            ],
            avatar: AvatarPlacement {
                position: Vec3::new(0.0, 3.6, -10.0),
                radius: 4.5,
                mass: 1.0,
            },
            placeholder: PlaceholderAvatar {
                body: AvatarPlacement {
                    position: Vec3::new(0.0, 3.6, -10.0),
                    radius: 4.5,
                    mass: 1.0,
                },
                torso_radius: 6.0,
                torso_height: 3.6,
                leg_radius: 1.5,
                leg_length: 9.0,
                leg_offset: glam::Vec2::new(2.5, -1.5),
                torso_color: TORSO_COLOR,
                leg_color: LEG_COLOR,
            },
            speed: 9.6,
            walk_threshold: 0.1,
            camera: near_ground_camera(),
        }
    }

    fn countryside() -> Self {
        let background = Color::hex(0x87CEEB);
        Self {
            kind: ThemeKind::Countryside,
            background,
            clear_color: background,
            fog: None,
            floor: Floor {
                width: 500.0,
                depth: 500.0,
                center_y: 2.0,
                half_height: 1.0,
                color: Color::hex(0x228B22),
            },
            lighting: LightingPreset {
                ambient_color: Color::hex(0x404040),
                ambient_intensity: 0.6,
                directional: DirectionalLight {
                    color: Color::WHITE,
                    intensity: 0.8,
                    position: Vec3::new(50.0, 50.0, 50.0),
                },
                key_light: PointLight {
                    color: Color::WHITE,
                    intensity: 0.5,
                    range: 80.0,
                    position: Vec3::new(0.0, 20.0, 0.0),
                },
            },
            decorations: vec![Decoration::Stairs],
            avatar: AvatarPlacement {
                position: Vec3::new(0.0, 4.0, -10.0),
                radius: 3.0,
                mass: 1.0,
            },
            placeholder: PlaceholderAvatar {
                body: AvatarPlacement {
                    position: Vec3::new(0.0, 4.0, -10.0),
                    radius: 3.0,
                    mass: 1.0,
                },
                torso_radius: 4.0,
                torso_height: 4.0,
                leg_radius: 1.0,
                leg_length: 6.0,
                leg_offset: glam::Vec2::new(1.5, -1.0),
                torso_color: TORSO_COLOR,
                leg_color: LEG_COLOR,
            },
            speed: 4.8,
            walk_threshold: 0.1,
            camera: near_ground_camera(),
        }
    }

    fn space() -> Self {
        Self {
            kind: ThemeKind::Space,
            background: Color::BLACK,
            clear_color: Color::hex(0x0a0a0a),
            fog: None,
            floor: Floor {
                width: 800.0,
                depth: 800.0,
                center_y: -10.0,
                half_height: 1.0,
                color: Color::BLACK,
            },
            lighting: LightingPreset {
                ambient_color: Color::WHITE,
                ambient_intensity: 0.4,
                directional: DirectionalLight {
                    color: Color::WHITE,
                    intensity: 0.6,
                    position: Vec3::new(50.0, 50.0, 50.0),
                },
                key_light: PointLight {
                    color: Color::WHITE,
                    intensity: 0.8,
                    range: 80.0,
                    position: Vec3::new(0.0, 30.0, 0.0),
                },
            },
            decorations: vec![
                Decoration::Starfield,
                Decoration::GalaxyBackdrop,
                Decoration::Nebula,
                Decoration::OrbitRings,
                Decoration::Planets,
            ],
            // Starts below the floor and keeps falling; kept as authored.
            avatar: AvatarPlacement {
                position: Vec3::new(0.0, -50.0, 180.0),
                radius: 22.5,
                mass: 1.0,
            },
            placeholder: PlaceholderAvatar {
                body: AvatarPlacement {
                    position: Vec3::new(0.0, -8.0, 45.0),
                    radius: 4.5,
                    mass: 1.0,
                },
                torso_radius: 30.0,
                torso_height: 18.0,
                leg_radius: 7.5,
                leg_length: 45.0,
                leg_offset: glam::Vec2::new(12.5, -7.5),
                torso_color: TORSO_COLOR,
                leg_color: LEG_COLOR,
            },
            speed: 9.6,
            walk_threshold: 1.0,
            camera: CameraPreset {
                eye: Vec3::new(2.73, 23.68, 298.93),
                target: Vec3::new(0.0, 10.0, 180.0),
                fov_y_degrees: 70.0,
                near: 0.1,
                far: 1000.0,
                min_distance: 20.0,
                max_distance: 200.0,
            },
        }
    }
}

fn near_ground_camera() -> CameraPreset {
    CameraPreset {
        eye: Vec3::new(0.0, 40.0, 20.0),
        target: Vec3::new(0.0, 4.0, -10.0),
        fov_y_degrees: 70.0,
        near: 0.1,
        far: 1000.0,
        min_distance: 5.0,
        max_distance: 100.0,
    }
}

/// Static layout of a theme: what the app builds before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    pub theme: Theme,
    pub floor: Floor,
    pub lighting: LightingPreset,
    pub decorations: Vec<Decoration>,
    /// Clickable planets. Empty outside the space theme.
    pub planets: Vec<Planet>,
}

impl SceneDescription {
    pub fn assemble(theme: Theme) -> Self {
        let planets = if theme.decorations.contains(&Decoration::Planets) {
            space_planets()
        } else {
            Vec::new()
        };
        info!(
            "Assembled {:?} scene: floor {}x{}, {} decorations, {} planets",
            theme.kind,
            theme.floor.width,
            theme.floor.depth,
            theme.decorations.len(),
            planets.len()
        );
        Self {
            floor: theme.floor,
            lighting: theme.lighting.clone(),
            decorations: theme.decorations.clone(),
            planets,
            theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speeds_and_thresholds_per_theme() {
        let city = Theme::preset(ThemeKind::City);
        let country = Theme::preset(ThemeKind::Countryside);
        let space = Theme::preset(ThemeKind::Space);
        assert_eq!((city.speed, city.walk_threshold), (9.6, 0.1));
        assert_eq!((country.speed, country.walk_threshold), (4.8, 0.1));
        assert_eq!((space.speed, space.walk_threshold), (9.6, 1.0));
    }

    #[test]
    fn test_floor_geometry() {
        let city = Theme::preset(ThemeKind::City).floor;
        assert_eq!(city.half_extents(), Vec3::new(250.0, 1.0, 250.0));
        assert_eq!(city.top(), 2.5);

        let space = Theme::preset(ThemeKind::Space).floor;
        assert_eq!(space.half_extents(), Vec3::new(400.0, 1.0, 400.0));
        assert_eq!(space.center(), Vec3::new(0.0, -10.0, 0.0));
    }

    #[test]
    fn test_palettes() {
        assert_eq!(Theme::preset(ThemeKind::Countryside).clear_color, Color::hex(0x87CEEB));
        assert_eq!(Theme::preset(ThemeKind::City).floor.color, Color::hex(0x1a1a2e));
        let space = Theme::preset(ThemeKind::Space);
        assert_eq!(space.background, Color::BLACK);
        assert_eq!(space.clear_color, Color::hex(0x0a0a0a));
    }

    #[test]
    fn test_only_city_has_fog() {
        assert!(Theme::preset(ThemeKind::City).fog.is_some());
        assert!(Theme::preset(ThemeKind::Countryside).fog.is_none());
        assert!(Theme::preset(ThemeKind::Space).fog.is_none());
    }

    #[test]
    fn test_camera_presets_within_orbit_limits() {
        for kind in [ThemeKind::City, ThemeKind::Countryside, ThemeKind::Space] {
            let cam = Theme::preset(kind).camera;
            let distance = (cam.eye - cam.target).length();
            assert!(
                distance >= cam.min_distance && distance <= cam.max_distance,
                "{kind:?} starts at {distance}"
            );
            assert!(cam.eye.y > cam.target.y);
        }
    }

    #[test]
    fn test_planets_only_in_space() {
        assert!(SceneDescription::assemble(Theme::preset(ThemeKind::City)).planets.is_empty());
        assert!(SceneDescription::assemble(Theme::preset(ThemeKind::Countryside)).planets.is_empty());
        assert_eq!(SceneDescription::assemble(Theme::preset(ThemeKind::Space)).planets.len(), 4);
    }

    #[test]
    fn test_theme_name_maps_to_kind() {
        assert_eq!(ThemeKind::from(ThemeName::Space), ThemeKind::Space);
        assert_eq!(ThemeKind::from(ThemeName::City), ThemeKind::City);
    }
}
