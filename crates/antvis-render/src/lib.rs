//! antvis Render Library
//!
//! Drawing surface backends for antvis buttons.
//! The default implementation records into a Vello scene, shaping labels with Parley.

mod images;

#[cfg(feature = "vello-renderer")]
mod vello_surface;

pub use images::ImageStore;

#[cfg(feature = "vello-renderer")]
pub use vello_surface::VelloSurface;

use thiserror::Error;

/// Render errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Pixel buffer of {len} bytes does not match {width}x{height} RGBA")]
    BadBuffer { len: usize, width: u32, height: u32 },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
