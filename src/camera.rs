//! Camera for ray generation and scene rendering

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ray::Ray;
use crate::scene::Scene;

/// Camera placement as stored in a scene file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSetup {
    /// Point camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    pub lookat: Vec3A,
    /// Camera-relative "up" direction vector
    pub vup: Vec3A,
    /// Vertical field of view in degrees
    pub vfov: f32,
}

impl Default for CameraSetup {
    fn default() -> Self {
        Self {
            lookfrom: Vec3A::new(0.0, 0.0, 0.0),
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::new(0.0, 1.0, 0.0),
            vfov: 60.0,
        }
    }
}

/// Pinhole camera for ray generation and scene rendering.
///
/// Shoots exactly one ray through the centre of each pixel.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Rendered image height in pixel count
    pub image_height: u32,
    /// Vertical field of view in degrees (default: 60)
    pub vfov: f32,
    /// Point camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    pub lookat: Vec3A,
    /// Camera-relative "up" direction vector
    pub vup: Vec3A,

    /// World position of the centre of the top-left pixel (pixel 0,0)
    pixel00_loc: Vec3A,
    /// Offset vector from pixel to pixel horizontally (right direction)
    pixel_delta_u: Vec3A,
    /// Offset vector from pixel to pixel vertically (down direction)
    pixel_delta_v: Vec3A,
    /// Flag to track whether camera parameters have been calculated
    initialized: bool,
}

impl Camera {
    /// Reject image sizes with no pixels.
    pub fn check_image_size(image_width: u32, image_height: u32) -> Result<()> {
        if image_width == 0 || image_height == 0 {
            return Err(Error::InvalidImageSize {
                width: image_width,
                height: image_height,
            });
        }
        Ok(())
    }

    /// Creates a camera placed as described by `setup`.
    pub fn from_setup(setup: &CameraSetup, image_width: u32, image_height: u32) -> Self {
        Self {
            image_width,
            image_height,
            vfov: setup.vfov,
            lookfrom: setup.lookfrom,
            lookat: setup.lookat,
            vup: setup.vup,
            pixel00_loc: Vec3A::ZERO,
            pixel_delta_u: Vec3A::ZERO,
            pixel_delta_v: Vec3A::ZERO,
            initialized: false,
        }
    }

    /// Renders the scene.
    ///
    /// Traces one ray per pixel with recursion starting at depth 0. Pixels are
    /// processed in parallel; the scene is only ever read.
    ///
    /// Returns an HDR image buffer with linear, unclamped f32 RGB values.
    pub fn render(&mut self, scene: &Scene) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        self.initialize();

        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(self.image_width, self.image_height);
        let tracer = scene.tracer();

        info!("Generating image using {} CPU cores...", rayon::current_num_threads());
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(u64::from(self.image_width) * u64::from(self.image_height));
        pb.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        image.enumerate_pixels_mut().par_bridge().for_each(|(i, j, pixel)| {
            let r = self.get_ray(i, j);
            let color = tracer.trace(&r, 0);
            *pixel = Rgb([color.x, color.y, color.z]);
            pb.inc(1);
        });

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }

    /// Initialize camera parameters based on current settings.
    ///
    /// Sets up the camera coordinate system and a viewport one unit in front
    /// of the camera. Called by render().
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        if Self::check_image_size(self.image_width, self.image_height).is_err() {
            warn!(
                "Image size {}x{} has no pixels, rendering at least one pixel per axis",
                self.image_width, self.image_height
            );
            self.image_width = self.image_width.max(1);
            self.image_height = self.image_height.max(1);
        }

        // Determine viewport dimensions
        let theta = self.vfov.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan();
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Calculate the u,v,w unit basis vectors for the camera coordinate frame
        let w = (self.lookfrom - self.lookat).normalize(); // Points opposite view direction
        let u = self.vup.cross(w).normalize(); // Points to camera right
        let v = w.cross(u); // Points to camera up

        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left = self.lookfrom - w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        self.initialized = true;
    }

    /// Normalized ray through the centre of pixel (i, j).
    fn get_ray(&self, i: u32, j: u32) -> Ray {
        let pixel_center = self.pixel00_loc + (i as f32 * self.pixel_delta_u) + (j as f32 * self.pixel_delta_v);
        Ray::new(self.lookfrom, pixel_center - self.lookfrom).normalized()
    }
}
