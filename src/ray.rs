//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction. A ray is the entry point for intersection queries against a
//! single triangle and against a whole triangle list.

use glam::Vec3A;

use crate::hittable::{Hit, Hittable};
use crate::triangle::Triangle;

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// The camera position for primary rays, a surface point for shadow and
    /// reflection rays.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    ///
    /// Not normalized on construction. Shading treats it as a unit vector, so
    /// rays handed to the tracer should go through [`Ray::normalized`] first.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Same ray with a unit-length direction.
    pub fn normalized(self) -> Self {
        Self {
            origin: self.origin,
            direction: self.direction.normalize(),
        }
    }

    /// Intersect this ray with a single triangle.
    ///
    /// See [`Triangle`]'s [`Hittable`] implementation for the algorithm.
    pub fn intersect<'a>(&self, triangle: &'a Triangle) -> Option<Hit<'a>> {
        triangle.hit(self)
    }

    /// Closest intersection of this ray with any triangle in `triangles`.
    pub fn nearest_hit<'a>(&self, triangles: &'a [Triangle]) -> Option<Hit<'a>> {
        triangles.hit(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_keeps_origin() {
        let ray = Ray::new(Vec3A::new(1.0, 2.0, 3.0), Vec3A::new(0.0, 0.0, -5.0)).normalized();
        assert_eq!(ray.origin, Vec3A::new(1.0, 2.0, 3.0));
        assert!(ray.direction.abs_diff_eq(Vec3A::NEG_Z, 1e-6));
    }
}
