//! Screen-space ray casting against planet bounding spheres.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::planets::Planet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    /// Ray through `ndc` (x right, y up, both in `[-1, 1]`) for a camera with
    /// the given view-projection matrix. Depth runs 0 (near) to 1 (far).
    pub fn from_screen(ndc: Vec2, view_projection: Mat4) -> Option<Self> {
        let inverse = view_projection.inverse();
        let unproject = |z: f32| {
            let p = inverse * Vec4::new(ndc.x, ndc.y, z, 1.0);
            (p.w.abs() > f32::EPSILON).then(|| p.truncate() / p.w)
        };
        let near = unproject(0.0)?;
        let far = unproject(1.0)?;
        let direction = (far - near).try_normalize()?;
        Some(Self {
            origin: near,
            direction,
        })
    }

    /// Converts a cursor position in window pixels to NDC.
    pub fn cursor_to_ndc(cursor: Vec2, viewport: Vec2) -> Vec2 {
        Vec2::new(
            cursor.x / viewport.x * 2.0 - 1.0,
            1.0 - cursor.y / viewport.y * 2.0,
        )
    }

    /// Distance along the ray to the first hit with a sphere, if any.
    pub fn hit_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let t_near = -b - sqrt_d;
        let t_far = -b + sqrt_d;
        if t_near >= 0.0 {
            Some(t_near)
        } else if t_far >= 0.0 {
            Some(0.0)
        } else {
            None
        }
    }
}

/// Nearest planet the ray hits.
pub fn pick_planet<'a>(ray: &Ray, planets: &'a [Planet]) -> Option<&'a Planet> {
    planets
        .iter()
        .filter_map(|planet| ray.hit_sphere(planet.position, planet.pick_radius()).map(|t| (t, planet)))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, planet)| planet)
}
