//! Scene description and TOML scene files.
//!
//! A scene file looks like this:
//!
//! ```toml
//! ambient = [0.05, 0.05, 0.05]
//! max_depth = 3
//!
//! [camera]
//! lookfrom = [0.0, 1.0, 4.0]
//! lookat = [0.0, 1.0, 0.0]
//! vfov = 60.0
//!
//! [[triangles]]
//! vertices = [[-1.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 0.0, -1.0]]
//! color = [0.2, 0.2, 0.2]
//! shininess = 8.0
//!
//! [[lights]]
//! position = [0.0, 4.0, 0.0]
//! color = [0.6, 0.6, 0.6]
//! ```
//!
//! `vup` defaults to `[0, 1, 0]`, `shininess` to 0 and `max_depth` to 3. A
//! triangle may carry an explicit `normal`; otherwise it is derived from the
//! vertex winding.

use std::path::Path;

use glam::Vec3A;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::camera::CameraSetup;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::light::Light;
use crate::ray::Ray;
use crate::shading::Tracer;
use crate::triangle::Triangle;

/// Reflection depth used when a scene file does not set one.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Deepest reflection level a scene may ask for.
///
/// Each level is one stack frame pair in the tracer, so the depth has to stay
/// well inside a worker thread's stack.
pub const MAX_DEPTH_LIMIT: u32 = 64;

/// Triangles smaller than this (twice the area) have no usable normal.
const MIN_DOUBLE_AREA: f32 = 1e-12;

/// Everything needed to render an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Triangle soup, scanned in order.
    pub triangles: Vec<Triangle>,
    /// Point lights.
    pub lights: Vec<Light>,
    /// Flat color added to every hit.
    pub ambient: Color,
    /// Deepest reflection level that is still traced.
    pub max_depth: u32,
    /// Camera placement.
    pub camera: CameraSetup,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            triangles: Vec::new(),
            lights: Vec::new(),
            ambient: Color::ZERO,
            max_depth: DEFAULT_MAX_DEPTH,
            camera: CameraSetup::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SceneFile {
    #[serde(default)]
    ambient: Color,
    #[serde(default = "default_max_depth")]
    max_depth: u32,
    #[serde(default)]
    camera: CameraSetup,
    #[serde(default)]
    triangles: Vec<TriangleEntry>,
    #[serde(default)]
    lights: Vec<LightEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TriangleEntry {
    vertices: [Vec3A; 3],
    color: Color,
    #[serde(default)]
    shininess: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    normal: Option<Vec3A>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LightEntry {
    position: Vec3A,
    color: Color,
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

impl Scene {
    /// Read and validate a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading scene from {}", path.display());

        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate a scene from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: SceneFile = toml::from_str(text)?;

        let triangles = file
            .triangles
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.to_triangle(index))
            .collect::<Result<Vec<_>>>()?;
        let lights = file
            .lights
            .iter()
            .map(|entry| Light::new(entry.position, entry.color))
            .collect();

        let scene = Self {
            triangles,
            lights,
            ambient: file.ambient,
            max_depth: file.max_depth,
            camera: file.camera,
        };
        scene.validate()?;

        debug!(
            "Parsed scene: {} triangles, {} lights, max depth {}",
            scene.triangles.len(),
            scene.lights.len(),
            scene.max_depth
        );
        Ok(scene)
    }

    /// Serialize the scene as TOML. Normals are always written out.
    pub fn to_toml_string(&self) -> Result<String> {
        let file = SceneFile {
            ambient: self.ambient,
            max_depth: self.max_depth,
            camera: self.camera,
            triangles: self
                .triangles
                .iter()
                .map(|t| TriangleEntry {
                    vertices: [t.p1, t.p2, t.p3],
                    color: t.color,
                    shininess: t.shininess,
                    normal: Some(t.normal),
                })
                .collect(),
            lights: self
                .lights
                .iter()
                .map(|l| LightEntry {
                    position: l.position,
                    color: l.color,
                })
                .collect(),
        };
        Ok(toml::to_string(&file)?)
    }

    /// Write the scene as a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Scene written to {}", path.display());
        Ok(())
    }

    /// Check that the scene can be rendered.
    ///
    /// Rejects non-finite data, zero-area triangles without a normal and
    /// cameras with no usable view direction. Empty scenes only warn.
    pub fn validate(&self) -> Result<()> {
        for (index, t) in self.triangles.iter().enumerate() {
            let finite = [t.p1, t.p2, t.p3, t.color, t.normal].iter().all(|v| v.is_finite())
                && t.shininess.is_finite();
            if !finite {
                return Err(Error::InvalidScene(format!("triangle {index} has non-finite values")));
            }
            if t.normal == Vec3A::ZERO {
                return Err(Error::InvalidScene(format!("triangle {index} has no normal")));
            }
            if t.double_area() < MIN_DOUBLE_AREA {
                warn!("Triangle {index} has zero area and will never be hit");
            }
        }

        for (index, l) in self.lights.iter().enumerate() {
            if !(l.position.is_finite() && l.color.is_finite()) {
                return Err(Error::InvalidScene(format!("light {index} has non-finite values")));
            }
        }

        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(Error::InvalidScene(format!(
                "max_depth {} exceeds the limit of {MAX_DEPTH_LIMIT}",
                self.max_depth
            )));
        }

        if !self.ambient.is_finite() {
            return Err(Error::InvalidScene("ambient color is not finite".to_string()));
        }

        let cam = &self.camera;
        let view = cam.lookat - cam.lookfrom;
        if !(cam.lookfrom.is_finite() && cam.lookat.is_finite() && cam.vup.is_finite()) {
            return Err(Error::InvalidScene("camera has non-finite values".to_string()));
        }
        if view.length_squared() == 0.0 {
            return Err(Error::InvalidScene("camera lookfrom and lookat coincide".to_string()));
        }
        if cam.vup.cross(view).length_squared() == 0.0 {
            return Err(Error::InvalidScene("camera vup is parallel to the view direction".to_string()));
        }
        if !(cam.vfov > 0.0 && cam.vfov < 180.0) {
            return Err(Error::InvalidScene(format!(
                "camera vfov must be between 0 and 180 degrees, got {}",
                cam.vfov
            )));
        }

        if self.triangles.is_empty() {
            warn!("Scene has no triangles, the image will be black");
        }
        if self.lights.is_empty() {
            warn!("Scene has no lights, only ambient and surface colors will show");
        }

        Ok(())
    }

    /// Shading view of this scene.
    pub fn tracer(&self) -> Tracer<'_> {
        Tracer::new(&self.triangles, &self.lights, self.ambient, self.max_depth)
    }

    /// Color seen along a camera ray.
    pub fn trace(&self, ray: &Ray) -> Color {
        self.tracer().trace(ray, 0)
    }

    /// Built-in scene: a room with a mirror-like floor, coloured side walls,
    /// a small pyramid and two lights.
    pub fn demo() -> Self {
        let mut triangles = Vec::new();

        let floor = Color::new(0.08, 0.08, 0.1);
        let back = Color::new(0.15, 0.15, 0.15);
        let left = Color::new(0.25, 0.04, 0.04);
        let right = Color::new(0.04, 0.2, 0.05);
        let ceiling = Color::new(0.12, 0.12, 0.12);

        let (x0, x1) = (-2.0, 2.0);
        let (y0, y1) = (0.0, 3.0);
        let (z0, z1) = (-3.0, 2.0);

        // Each wall is a quad a-b-c-d wound so its normal faces into the room
        let mut quad = |a: Vec3A, b: Vec3A, c: Vec3A, d: Vec3A, color: Color, shininess: f32| {
            triangles.push(Triangle::new(a, b, c, color, shininess));
            triangles.push(Triangle::new(a, c, d, color, shininess));
        };

        quad(
            Vec3A::new(x0, y0, z1),
            Vec3A::new(x1, y0, z1),
            Vec3A::new(x1, y0, z0),
            Vec3A::new(x0, y0, z0),
            floor,
            2.0,
        );
        quad(
            Vec3A::new(x0, y0, z0),
            Vec3A::new(x1, y0, z0),
            Vec3A::new(x1, y1, z0),
            Vec3A::new(x0, y1, z0),
            back,
            16.0,
        );
        quad(
            Vec3A::new(x0, y0, z1),
            Vec3A::new(x0, y0, z0),
            Vec3A::new(x0, y1, z0),
            Vec3A::new(x0, y1, z1),
            left,
            32.0,
        );
        quad(
            Vec3A::new(x1, y0, z0),
            Vec3A::new(x1, y0, z1),
            Vec3A::new(x1, y1, z1),
            Vec3A::new(x1, y1, z0),
            right,
            32.0,
        );
        quad(
            Vec3A::new(x0, y1, z0),
            Vec3A::new(x1, y1, z0),
            Vec3A::new(x1, y1, z1),
            Vec3A::new(x0, y1, z1),
            ceiling,
            64.0,
        );

        // Pyramid on the floor, faces wound outwards
        let apex = Vec3A::new(0.0, 1.2, -1.0);
        let base = [
            Vec3A::new(-0.6, 0.0, -0.4),
            Vec3A::new(0.6, 0.0, -0.4),
            Vec3A::new(0.6, 0.0, -1.6),
            Vec3A::new(-0.6, 0.0, -1.6),
        ];
        let gold = Color::new(0.3, 0.22, 0.05);
        for k in 0..base.len() {
            let a = base[k];
            let b = base[(k + 1) % base.len()];
            triangles.push(Triangle::new(a, b, apex, gold, 8.0));
        }

        let lights = vec![
            Light::new(Vec3A::new(-1.0, 2.7, 0.5), Color::new(0.45, 0.42, 0.38)),
            Light::new(Vec3A::new(1.2, 2.5, -2.0), Color::new(0.2, 0.22, 0.3)),
        ];

        Self {
            triangles,
            lights,
            ambient: Color::splat(0.03),
            max_depth: DEFAULT_MAX_DEPTH,
            camera: CameraSetup {
                lookfrom: Vec3A::new(0.0, 1.5, 1.9),
                lookat: Vec3A::new(0.0, 0.8, -1.0),
                vup: Vec3A::Y,
                vfov: 70.0,
            },
        }
    }
}

impl TriangleEntry {
    fn to_triangle(&self, index: usize) -> Result<Triangle> {
        let [p1, p2, p3] = self.vertices;
        let triangle = match self.normal {
            Some(normal) => Triangle::with_normal(p1, p2, p3, normal, self.color, self.shininess),
            None => {
                if (p2 - p1).cross(p3 - p1).length_squared() < MIN_DOUBLE_AREA * MIN_DOUBLE_AREA {
                    return Err(Error::InvalidScene(format!(
                        "triangle {index} is degenerate and has no explicit normal"
                    )));
                }
                Triangle::new(p1, p2, p3, self.color, self.shininess)
            }
        };

        if self.shininess < 0.0 {
            warn!("Triangle {index} has negative shininess {}, using 0", self.shininess);
        }
        Ok(triangle)
    }
}
