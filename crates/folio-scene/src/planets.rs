//! The four informational planets of the space theme.

use std::f32::consts::FRAC_PI_4;
use glam::Vec3;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Orbit ring radii, innermost first.
pub const RING_RADII: [f32; 4] = [40.0, 60.0, 80.0, 100.0];

/// Height all planets float at.
const PLANET_HEIGHT: f32 = 100.0;

/// Z offset of the ring centre.
const RING_CENTER_Z: f32 = 80.0;

/// What a planet's detail page is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanetCategory {
    Projects,
    Experience,
    Skills,
    Contact,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    /// Display name, also the detail page key.
    pub name: String,
    pub category: PlanetCategory,
    /// Model file, relative to the asset root.
    pub model: String,
    pub ring: usize,
    /// Angle on the ring, radians.
    pub angle: f32,
    /// Uniform model scale.
    pub scale: f32,
    pub position: Vec3,
}

impl Planet {
    fn on_ring(name: &str, category: PlanetCategory, model: &str, ring: usize, angle: f32, scale: f32) -> Self {
        let radius = RING_RADII[ring];
        Self {
            name: name.to_string(),
            category,
            model: model.to_string(),
            ring,
            angle,
            scale,
            position: Vec3::new(
                angle.cos() * radius,
                PLANET_HEIGHT,
                angle.sin() * radius + RING_CENTER_Z,
            ),
        }
    }

    /// Radius of the sphere used for click picking. Models are unit-sized, so
    /// this is the model scale.
    pub fn pick_radius(&self) -> f32 {
        self.scale
    }
}

/// The planets in ring order.
pub fn space_planets() -> Vec<Planet> {
    vec![
        Planet::on_ring("Projelerim", PlanetCategory::Projects, "sun.glb", 0, -FRAC_PI_4, 20.0),
        Planet::on_ring("Deneyimlerim", PlanetCategory::Experience, "saturn2.glb", 1, FRAC_PI_4, 30.0),
        Planet::on_ring("Yeteneklerim", PlanetCategory::Skills, "neptune2.glb", 2, -3.0 * FRAC_PI_4, 20.0),
        Planet::on_ring("İletişim", PlanetCategory::Contact, "planet4.glb", 3, 3.0 * FRAC_PI_4, 3.0),
    ]
}

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Detail page for a planet, with the name percent-encoded as a query value.
pub fn detail_url(name: &str) -> String {
    format!(
        "/planet-transition.html?planet={}",
        utf8_percent_encode(name, QUERY_VALUE)
    )
}
