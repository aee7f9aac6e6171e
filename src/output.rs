//! # Output Module
//!
//! Writes rendered HDR images to disk:
//! - PNG with clamping and sRGB gamma correction (8-bit)
//! - OpenEXR with the linear, unclamped values the tracer produced
//!
//! The tracer never clamps its colors, so this is the only place where
//! out-of-range values are brought into displayable range.

use std::path::Path;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::{debug, info};

use crate::error::{Error, Result};

/// HDR image produced by the camera.
pub type HdrImage = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Save `image` in the format implied by the extension of `output_path`.
///
/// `.png` and `.exr` are supported (case-insensitive).
pub fn save_image(image: &HdrImage, output_path: impl AsRef<Path>) -> Result<()> {
    let output_path = output_path.as_ref();

    debug!("Writing {}x{} image to {}", image.width(), image.height(), output_path.display());
    match OutputFormat::from_path(output_path)? {
        OutputFormat::Png => save_image_as_png(image, output_path),
        OutputFormat::Exr => save_image_as_exr(image, output_path),
    }
}

/// Image file formats the renderer can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 8-bit, tone mapped.
    Png,
    /// 32-bit float, linear.
    Exr,
}

impl OutputFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "png" => Ok(Self::Png),
            "exr" => Ok(Self::Exr),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// sRGB transfer function for a linear value in [0, 1].
///
/// Linear segment below 0.0031308, `1.055 * linear^(1/2.4) - 0.055` above.
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear <= 0.0 {
        0.0
    } else if linear <= 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Tone map one channel to 8 bits: clamp, gamma encode, scale.
pub fn to_srgb8(linear: f32) -> u8 {
    (linear_to_gamma(linear.clamp(0.0, 1.0)) * 255.0).round() as u8
}

/// Save an f32 RGB image as PNG.
///
/// Values above 1.0 clip to white and negative values to black before sRGB
/// gamma correction.
pub fn save_image_as_png(image: &HdrImage, output_path: impl AsRef<Path>) -> Result<()> {
    let output_path = output_path.as_ref();
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([to_srgb8(pixel[0]), to_srgb8(pixel[1]), to_srgb8(pixel[2])])
    });

    u8_image.save(output_path)?;
    info!("Image saved as {}", output_path.display());
    Ok(())
}

/// Save an f32 RGB image as EXR with full HDR precision.
///
/// Values are written linear, without tone mapping or gamma correction.
pub fn save_image_as_exr(image: &HdrImage, output_path: impl AsRef<Path>) -> Result<()> {
    let output_path = output_path.as_ref();
    write_rgb_file(
        output_path,
        image.width() as usize,
        image.height() as usize,
        |x, y| {
            let pixel = image.get_pixel(x as u32, y as u32);
            (pixel[0], pixel[1], pixel[2])
        },
    )?;

    info!("HDR image saved as EXR: {}", output_path.display());
    Ok(())
}
