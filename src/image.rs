use core::fmt;
use std::{fmt::Debug, path::Path};

use anyhow::{Context, Result};
use glam::{I64Vec2, IVec2, UVec2, Vec2};
use image::{Rgba, RgbaImage};

/// Fully transparent pixel
pub const BLANK: [u8; 4] = [0, 0, 0, 0];

/// Image
/// An owned RGBA8 pixel buffer. Used as animation frame, sprite sheet and draw target.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    buffer: RgbaImage,
}

impl Image {
    /// Build a transparent image
    pub fn new(size: UVec2) -> Self {
        Self {
            buffer: RgbaImage::new(size.x, size.y),
        }
    }

    /// Build an image filled with one color
    pub fn filled(size: UVec2, color: [u8; 4]) -> Self {
        Self {
            buffer: RgbaImage::from_pixel(size.x, size.y, Rgba(color)),
        }
    }

    pub fn from_rgba(buffer: RgbaImage) -> Self {
        Self { buffer }
    }

    /// Decode an image file, format is guessed from the extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let im = image::open(path)
            .with_context(|| format!("load image {}", path.display()))?;
        Ok(Self::from_rgba(im.into_rgba8()))
    }

    /// Encode the image, format is guessed from the extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.buffer
            .save(path)
            .with_context(|| format!("save image {}", path.display()))
    }
}

impl Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        f.debug_struct("Image").field("size", &size).finish()
    }
}

impl Image {
    /// Return image size
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.buffer.width(), self.buffer.height())
    }

    /// Return image size in Vec2
    pub fn sizef(&self) -> Vec2 {
        let size = self.size();
        Vec2::new(size.x as f32, size.y as f32)
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Pixel at (x, y), None if outside of the image
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 {
            return None;
        }
        self.buffer
            .get_pixel_checked(x as u32, y as u32)
            .map(|p| p.0)
    }

    /// Set pixel at (x, y), writes outside of the image are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(p) = self.buffer.get_pixel_mut_checked(x as u32, y as u32) {
            *p = Rgba(color);
        }
    }

    pub fn fill(&mut self, color: [u8; 4]) {
        for p in self.buffer.pixels_mut() {
            *p = Rgba(color);
        }
    }

    /// Copy the region of `src` starting at `origin` into this image.
    /// The region has the size of this image, pixels outside of `src` become transparent.
    ///
    /// Returns false if the region was clipped by the bounds of `src`.
    pub fn copy_region_from(&mut self, src: &Image, origin: IVec2) -> bool {
        let size = self.size();
        // i64 so origins near i32::MAX can't overflow
        let start = origin.as_i64vec2();
        let end = start + size.as_i64vec2();
        let src_size = src.size().as_i64vec2();
        let inside = start.cmpge(I64Vec2::ZERO).all() && end.cmple(src_size).all();
        for y in 0..size.y {
            for x in 0..size.x {
                let color = origin
                    .x
                    .checked_add(x as i32)
                    .zip(origin.y.checked_add(y as i32))
                    .and_then(|(sx, sy)| src.pixel(sx, sy))
                    .unwrap_or(BLANK);
                self.buffer.put_pixel(x, y, Rgba(color));
            }
        }
        inside
    }
}
