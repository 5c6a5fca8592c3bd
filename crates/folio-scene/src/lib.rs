//! Scene themes and what gets built from them.
//!
//! Each [`ThemeKind`] has a [`Theme`] preset with its floor, palette, lights,
//! avatar placement and camera. [`SceneDescription::assemble`] turns a preset
//! into the static layout the app builds physics and rendering from. The space
//! theme adds clickable [`Planet`]s.

pub mod color;
pub mod picking;
pub mod planets;
pub mod theme;

pub use color::Color;
pub use picking::{Ray, pick_planet};
pub use planets::{Planet, PlanetCategory, RING_RADII, detail_url, space_planets};
pub use theme::{
    AvatarPlacement, CameraPreset, Decoration, DirectionalLight, Floor, Fog, LightingPreset,
    PlaceholderAvatar, PointLight, SceneDescription, Theme, ThemeKind,
};
