//! CPU side image registry.

use std::sync::Arc;

use immui_ui_graphics::{Color, ImageId};

use crate::RenderError;

/// RGBA8 image, rows top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
}

impl Image {
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::InvalidImage {
                expected,
                found: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// Colour at normalized texture coordinates, nearest sample.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::TRANSPARENT;
        }
        let x = ((u.clamp(0.0, 1.0) * self.width as f32) as u32).min(self.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height as f32) as u32).min(self.height - 1);
        let index = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.pixels[index..index + 4];
        Color::from_rgba8(px[0], px[1], px[2], px[3])
    }
}

/// Images addressed by [`ImageId`]. Ids are handed out sequentially.
#[derive(Clone, Debug, Default)]
pub struct ImageStore {
    images: Vec<Image>,
}

impl ImageStore {
    pub fn insert(&mut self, image: Image) -> ImageId {
        self.images.push(image);
        ImageId(self.images.len() as u32 - 1)
    }

    pub fn get(&self, id: ImageId) -> Option<&Image> {
        self.images.get(id.0 as usize)
    }

    /// Replaces the pixels behind `id`, keeping the handle valid.
    pub fn replace(&mut self, id: ImageId, image: Image) -> bool {
        match self.images.get_mut(id.0 as usize) {
            Some(slot) => {
                *slot = image;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
