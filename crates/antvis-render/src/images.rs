//! Decoded image resources addressed by [`ImageSource`] handles.

use std::collections::HashMap;
use std::sync::Arc;

use antvis_core::ImageSource;
use peniko::{Blob, ImageAlphaType, ImageData, ImageFormat};

use crate::{RenderError, RenderResult};

/// Owns decoded RGBA images and hands out handles to them.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: HashMap<u32, ImageData>,
    next_id: u32,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a PNG/JPEG/WebP file and register it.
    pub fn decode(&mut self, bytes: &[u8]) -> RenderResult<ImageSource> {
        let rgba = ::image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        self.insert_rgba(width, height, rgba.into_vec())
    }

    /// Register raw RGBA8 pixels (row-major, unpremultiplied).
    pub fn insert_rgba(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> RenderResult<ImageSource> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::BadBuffer {
                len: pixels.len(),
                width,
                height,
            });
        }
        let id = self.next_id;
        self.next_id += 1;
        self.images.insert(
            id,
            ImageData {
                data: Blob::new(Arc::new(pixels)),
                format: ImageFormat::Rgba8,
                width,
                height,
                alpha_type: ImageAlphaType::Alpha,
            },
        );
        log::debug!("Registered image {} ({}x{})", id, width, height);
        Ok(ImageSource::new(id, width, height))
    }

    pub fn get(&self, source: &ImageSource) -> Option<&ImageData> {
        self.images.get(&source.id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
