use glam::{UVec2, Vec2};

use crate::{image::Image, transform::Transform2D, types::Rect};

/// Draw collaborator of animated sprites
pub trait Canvas {
    /// Draw `image` with its top-left corner at the origin of `transform`
    fn draw_image(&mut self, image: &Image, transform: &Transform2D);
}

/// Software render subsystem, rasterizes into an owned target image
pub struct Render {
    draw_calls: u32,
    target: Image,
}

impl Render {
    pub fn new(size: UVec2) -> Self {
        Self {
            draw_calls: 0,
            target: Image::new(size),
        }
    }

    pub fn draw_calls(&self) -> u32 {
        self.draw_calls
    }

    pub fn target(&self) -> &Image {
        &self.target
    }

    pub fn into_target(self) -> Image {
        self.target
    }

    /// Fill the target and reset the draw calls counter
    pub fn clear(&mut self, color: [u8; 4]) {
        self.target.fill(color);
        self.draw_calls = 0;
    }

    fn screen(&self) -> Rect {
        Rect {
            min: Vec2::ZERO,
            max: self.target.sizef(),
        }
    }
}

impl Canvas for Render {
    fn draw_image(&mut self, image: &Image, transform: &Transform2D) {
        let bounds = transform.bounds(image.sizef());
        let screen = self.screen();
        if !bounds.overlaps(&screen) {
            return;
        }
        self.draw_calls += 1;

        let inv = transform.inverse();
        let min = bounds.min.max(screen.min).floor();
        let max = bounds.max.min(screen.max).ceil();
        for y in min.y as i32..max.y as i32 {
            for x in min.x as i32..max.x as i32 {
                // sample at pixel center
                let src = inv
                    .forward(Vec2::new(x as f32 + 0.5, y as f32 + 0.5))
                    .floor();
                let Some(color) = image.pixel(src.x as i32, src.y as i32) else {
                    continue;
                };
                if color[3] == 0 {
                    continue;
                }
                self.target.set_pixel(x, y, color);
            }
        }
    }
}
