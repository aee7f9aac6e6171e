//! Ray-triangle intersection system.
//!
//! Defines the [`Hittable`] trait for anything a ray can be tested against and
//! [`Hit`], the record of a successful test. A miss is `None`, never a
//! sentinel distance.

use glam::Vec3A;

use crate::ray::Ray;
use crate::triangle::Triangle;

/// Tolerance for near-zero determinants and near-zero hit distances.
///
/// Shared by triangle intersection, the tracer's hit check and shadow rays.
pub const EPSILON: f32 = 1e-4;

/// Ray-triangle intersection information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<'a> {
    /// Triangle that was hit.
    pub triangle: &'a Triangle,
    /// Point where the ray intersects the triangle.
    pub point: Vec3A,
    /// Distance along the ray, in units of the ray direction. Always `>= EPSILON`.
    pub distance: f32,
    /// Barycentric weight of `p2`.
    pub u: f32,
    /// Barycentric weight of `p3`.
    pub v: f32,
}

/// Trait for objects that can be intersected by rays.
///
/// Must be thread-safe (Sync + Send) so scenes can be shared across the
/// render threads without locking.
pub trait Hittable: Sync + Send {
    /// Nearest valid intersection of `ray` with this object, if any.
    fn hit<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>>;
}

/// Linear scan over a triangle list.
///
/// Keeps the closest hit; a later candidate only replaces the current best
/// when its distance is strictly smaller, so equal distances resolve to the
/// triangle that comes first.
impl Hittable for [Triangle] {
    fn hit<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>> {
        let mut closest: Option<Hit<'a>> = None;

        for triangle in self {
            if let Some(candidate) = triangle.hit(ray) {
                let closer = closest
                    .as_ref()
                    .map_or(true, |best| candidate.distance < best.distance);
                if closer {
                    closest = Some(candidate);
                }
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn facing_triangle(z: f32, color: Color) -> Triangle {
        Triangle::new(
            Vec3A::new(-1.0, -1.0, z),
            Vec3A::new(1.0, -1.0, z),
            Vec3A::new(0.0, 1.0, z),
            color,
            0.0,
        )
    }

    #[test]
    fn test_empty_list_misses() {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::NEG_Z);
        let triangles: Vec<Triangle> = Vec::new();
        assert!(triangles.hit(&ray).is_none());
        assert!(ray.nearest_hit(&triangles).is_none());
    }

    #[test]
    fn test_nearest_of_two_overlapping() {
        let far = facing_triangle(-5.0, Color::X);
        let near = facing_triangle(-2.0, Color::Y);
        let triangles = vec![far, near];

        let ray = Ray::new(Vec3A::ZERO, Vec3A::NEG_Z);
        let hit = ray.nearest_hit(&triangles).expect("ray should hit");

        assert!(std::ptr::eq(hit.triangle, &triangles[1]));
        assert!((hit.distance - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_equal_distance_keeps_first() {
        let first = facing_triangle(-3.0, Color::X);
        let second = facing_triangle(-3.0, Color::Z);
        let triangles = vec![first, second];

        let ray = Ray::new(Vec3A::ZERO, Vec3A::NEG_Z);
        let hit = ray.nearest_hit(&triangles).expect("ray should hit");

        assert!(std::ptr::eq(hit.triangle, &triangles[0]));
    }

    #[test]
    fn test_misses_are_skipped() {
        let behind = facing_triangle(4.0, Color::X);
        let ahead = facing_triangle(-4.0, Color::Y);
        let triangles = vec![behind, ahead];

        let ray = Ray::new(Vec3A::ZERO, Vec3A::NEG_Z);
        let hit = ray.nearest_hit(&triangles).expect("ray should hit");

        assert_eq!(hit.triangle.color, Color::Y);
    }
}
