//! Triangle primitive for ray tracing.
//!
//! Implements ray-triangle intersection with the Möller–Trumbore algorithm.

use glam::Vec3A;

use crate::color::Color;
use crate::hittable::{Hit, Hittable, EPSILON};
use crate::ray::Ray;

/// Flat-shaded triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub p1: Vec3A,
    /// Second vertex.
    pub p2: Vec3A,
    /// Third vertex.
    pub p3: Vec3A,
    /// Flat surface color.
    pub color: Color,
    /// Unit surface normal, used for lighting only.
    ///
    /// Intersection does not cull back faces, so both windings are hit.
    pub normal: Vec3A,
    /// Phong exponent weighting the mirror reflection (always non-negative).
    pub shininess: f32,
}

impl Triangle {
    /// Create a triangle whose normal follows the winding `p1 -> p2 -> p3`.
    ///
    /// A degenerate triangle gets a zero normal; it is never hit anyway.
    pub fn new(p1: Vec3A, p2: Vec3A, p3: Vec3A, color: Color, shininess: f32) -> Self {
        let normal = (p2 - p1).cross(p3 - p1).normalize_or_zero();
        Self::with_normal(p1, p2, p3, normal, color, shininess)
    }

    /// Create a triangle with an explicit normal.
    ///
    /// The normal is normalized and negative shininess is clamped to 0.0.
    pub fn with_normal(
        p1: Vec3A,
        p2: Vec3A,
        p3: Vec3A,
        normal: Vec3A,
        color: Color,
        shininess: f32,
    ) -> Self {
        Self {
            p1,
            p2,
            p3,
            color,
            normal: normal.normalize_or_zero(),
            shininess: shininess.max(0.0),
        }
    }

    /// Twice the area of the triangle.
    pub fn double_area(&self) -> f32 {
        (self.p2 - self.p1).cross(self.p3 - self.p1).length()
    }

    /// Center of mass of the three vertices.
    pub fn centroid(&self) -> Vec3A {
        (self.p1 + self.p2 + self.p3) / 3.0
    }
}

impl Hittable for Triangle {
    // Möller & Trumbore, "Fast, Minimum Storage Ray-Triangle Intersection" (1997).
    fn hit<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>> {
        let e1 = self.p2 - self.p1;
        let e2 = self.p3 - self.p1;

        // Parallel to the plane, or a degenerate triangle
        let p = ray.direction.cross(e2);
        let a = e1.dot(p);
        if a > -EPSILON && a < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.p1;
        let u = f * s.dot(p);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(e1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        // Behind the origin, or too close to it to be anything but self-intersection
        let distance = f * e2.dot(q);
        if distance < EPSILON {
            return None;
        }

        let point = self.p1 * (1.0 - u - v) + self.p2 * u + self.p3 * v;

        Some(Hit {
            triangle: self,
            point,
            distance,
            u,
            v,
        })
    }
}
