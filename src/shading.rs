//! Recursive Whitted-style shading.
//!
//! A camera ray is traced to its nearest hit, lit by every unoccluded point
//! light, and extended by a mirror reflection ray until the recursion depth
//! runs out. Misses and exhausted recursion return [`BLACK`].

use crate::color::{blend, Color, BLACK};
use crate::hittable::{Hit, EPSILON};
use crate::light::Light;
use crate::ray::Ray;
use crate::triangle::Triangle;

/// Trace `ray` through a scene and return its unclamped color.
///
/// `depth` is 0 for camera rays. A call with `depth > max_depth` returns
/// [`BLACK`] without testing any triangle, so `max_depth == 0` shades the
/// first hit without any reflection.
pub fn trace(
    ray: &Ray,
    depth: u32,
    triangles: &[Triangle],
    max_depth: u32,
    lights: &[Light],
    ambient: Color,
) -> Color {
    Tracer::new(triangles, lights, ambient, max_depth).trace(ray, depth)
}

/// Read-only view of everything shading needs.
///
/// Holds only shared references, so one `Tracer` can be used from any number
/// of threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    triangles: &'a [Triangle],
    lights: &'a [Light],
    ambient: Color,
    max_depth: u32,
}

impl<'a> Tracer<'a> {
    /// Bundle a scene for tracing.
    pub fn new(triangles: &'a [Triangle], lights: &'a [Light], ambient: Color, max_depth: u32) -> Self {
        Self {
            triangles,
            lights,
            ambient,
            max_depth,
        }
    }

    /// Color seen along `ray` at recursion level `depth`.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Color {
        if depth > self.max_depth {
            return BLACK;
        }

        match ray.nearest_hit(self.triangles) {
            Some(hit) if hit.distance > EPSILON => self.lighting(ray, &hit, depth),
            _ => BLACK,
        }
    }

    /// Ambient, diffuse and reflected light at a hit point.
    fn lighting(&self, ray: &Ray, hit: &Hit<'_>, depth: u32) -> Color {
        let point = hit.point;
        let triangle = hit.triangle;
        let normal = triangle.normal;

        let mut color = blend(triangle.color, self.ambient, 1.0);

        for light in self.lights {
            let shadow_ray = Ray::new(point, light.position - point).normalized();
            if !self.occluded(&shadow_ray) {
                let ratio = shadow_ray.direction.dot(normal).max(0.0);
                color = blend(color, light.color, ratio);
            }
        }

        // R = 2N(N.L) - L with L pointing back along the incoming ray
        let outgoing = -ray.direction.normalize();
        let reflection = Ray::new(point, normal * (2.0 * normal.dot(outgoing)) - outgoing).normalized();
        let reflected = self.trace(&reflection, depth + 1);

        let ratio = reflection.direction.dot(outgoing).max(0.0).powf(triangle.shininess);
        blend(color, reflected, ratio)
    }

    /// Whether a shadow ray is blocked before reaching anything.
    ///
    /// Occluders closer than [`EPSILON`] do not count.
    fn occluded(&self, shadow_ray: &Ray) -> bool {
        shadow_ray
            .nearest_hit(self.triangles)
            .is_some_and(|hit| hit.distance >= EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3A;

    fn floor(color: Color, shininess: f32) -> Triangle {
        Triangle::new(
            Vec3A::new(-10.0, 0.0, 10.0),
            Vec3A::new(10.0, 0.0, 10.0),
            Vec3A::new(0.0, 0.0, -10.0),
            color,
            shininess,
        )
    }

    fn down_ray() -> Ray {
        Ray::new(Vec3A::new(0.0, 5.0, 0.0), Vec3A::NEG_Y)
    }

    #[test]
    fn test_depth_exhausted_is_black() {
        let triangles = [floor(Color::ONE, 0.0)];
        let lights = [Light::new(Vec3A::new(0.0, 10.0, 0.0), Color::ONE)];

        let color = trace(&down_ray(), 3, &triangles, 2, &lights, Color::splat(0.1));
        assert_eq!(color, BLACK);
    }

    #[test]
    fn test_miss_is_black() {
        let triangles = [floor(Color::ONE, 0.0)];
        let lights = [Light::new(Vec3A::new(0.0, 10.0, 0.0), Color::ONE)];
        let up = Ray::new(Vec3A::new(0.0, 5.0, 0.0), Vec3A::Y);

        let color = trace(&up, 0, &triangles, 4, &lights, Color::splat(0.5));
        assert_eq!(color, BLACK);
    }

    #[test]
    fn test_ambient_is_added_at_full_weight() {
        let triangles = [floor(Color::new(0.2, 0.1, 0.0), 0.0)];

        let color = trace(&down_ray(), 0, &triangles, 0, &[], Color::new(0.1, 0.1, 0.1));
        assert!(color.abs_diff_eq(Color::new(0.3, 0.2, 0.1), 1e-6));
    }

    #[test]
    fn test_light_below_surface_adds_nothing() {
        let triangles = [floor(Color::splat(0.2), 0.0)];
        // The floor normal points up; a light underneath faces its back.
        let lights = [Light::new(Vec3A::new(0.0, -3.0, 0.0), Color::ONE)];

        let color = trace(&down_ray(), 0, &triangles, 0, &lights, BLACK);
        assert!(color.abs_diff_eq(Color::splat(0.2), 1e-6));
    }

    #[test]
    fn test_occluded_light_contributes_nothing() {
        let blocker = Triangle::new(
            Vec3A::new(-1.0, 2.0, 1.0),
            Vec3A::new(1.0, 2.0, 1.0),
            Vec3A::new(0.0, 2.0, -1.0),
            Color::ZERO,
            0.0,
        );
        let triangles = [floor(Color::splat(0.2), 0.0), blocker];
        let lights = [Light::new(Vec3A::new(0.0, 10.0, 0.0), Color::ONE)];
        let tracer = Tracer::new(&triangles, &lights, BLACK, 0);

        // Camera ray from the side so it reaches the floor under the blocker.
        let ray = Ray::new(Vec3A::new(0.0, 1.0, 5.0), Vec3A::new(0.0, -1.0, -5.0)).normalized();
        let shadowed = tracer.trace(&ray, 0);
        assert!(shadowed.abs_diff_eq(Color::splat(0.2), 1e-6));

        let unblocked = trace(&ray, 0, &triangles[..1], 0, &lights, BLACK);
        assert!(unblocked.length() > shadowed.length());
    }

    #[test]
    fn test_shininess_zero_takes_full_reflection() {
        // Two parallel mirrors facing each other; the lower one sees the upper one.
        let lower = floor(Color::splat(0.1), 0.0);
        let upper = Triangle::new(
            Vec3A::new(-10.0, 10.0, 10.0),
            Vec3A::new(0.0, 10.0, -10.0),
            Vec3A::new(10.0, 10.0, 10.0),
            Color::new(0.0, 0.5, 0.0),
            0.0,
        );
        let triangles = [lower, upper];

        let color = trace(&down_ray(), 0, &triangles, 1, &[], BLACK);
        assert!(color.abs_diff_eq(Color::new(0.1, 0.6, 0.1), 1e-5));
    }
}
