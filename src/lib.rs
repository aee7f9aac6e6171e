//! Whitted-style recursive ray tracer for triangle scenes.
//!
//! Camera rays are traced to their nearest triangle, lit by point lights with
//! hard shadows and extended by mirror reflections up to a fixed depth.
//! Outputs PNG and EXR formats.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod color;
pub mod error;
pub mod hittable;
pub mod light;
pub mod output;
pub mod ray;
pub mod scene;
pub mod shading;
pub mod triangle;

pub use color::{Color, BLACK};
pub use error::{Error, Result};
pub use hittable::{Hit, Hittable, EPSILON};
pub use light::Light;
pub use ray::Ray;
pub use scene::Scene;
pub use shading::{trace, Tracer};
pub use triangle::Triangle;
