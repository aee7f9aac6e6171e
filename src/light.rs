//! Point lights.

use glam::Vec3A;

use crate::color::Color;

/// Point light with a position and a color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Position of the light in world coordinates.
    pub position: Vec3A,
    /// Emitted color, added at full strength to a surface facing the light head on.
    pub color: Color,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vec3A, color: Color) -> Self {
        Self { position, color }
    }
}
