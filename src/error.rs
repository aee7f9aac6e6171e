//! Error types for scene loading and image output.
//!
//! Tracing itself never fails; only the I/O around it does.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a scene or writing an image.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("failed to access {}: {}", .path.display(), .source)]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Scene file is not valid TOML or does not match the scene layout.
    #[error("failed to parse scene: {0}")]
    SceneParse(#[from] toml::de::Error),

    /// Scene could not be written back as TOML.
    #[error("failed to serialize scene: {0}")]
    SceneSerialize(#[from] toml::ser::Error),

    /// Scene parsed but cannot be rendered.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// Requested image has no pixels.
    #[error("invalid image size {width}x{height}, both sides must be at least 1 pixel")]
    InvalidImageSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// PNG encoding or writing failed.
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    /// EXR encoding or writing failed.
    #[error("failed to write EXR image: {0}")]
    Exr(#[from] exr::error::Error),

    /// Output path has an extension no writer handles.
    #[error("unsupported output format '{0}', expected .png or .exr")]
    UnsupportedFormat(String),
}

/// Result type for scene and output operations.
pub type Result<T> = std::result::Result<T, Error>;
