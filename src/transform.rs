use glam::{Affine2, Vec2};

use crate::types::Rect;

/// 2D affine transform.
/// Operations are applied to points in the order they are called:
/// `Transform2D::new().scale(s).translate(pos)` scales first, then moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    matrix: Affine2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            matrix: Affine2::IDENTITY,
        }
    }
}

impl Transform2D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(mut self, offset: Vec2) -> Self {
        self.matrix = Affine2::from_translation(offset) * self.matrix;
        self
    }

    pub fn scale(mut self, scale: Vec2) -> Self {
        self.matrix = Affine2::from_scale(scale) * self.matrix;
        self
    }

    pub fn matrix(&self) -> Affine2 {
        self.matrix
    }

    pub fn inverse(&self) -> Self {
        Self {
            matrix: self.matrix.inverse(),
        }
    }

    /// Map a point from image space to target space
    pub fn forward(&self, pos: Vec2) -> Vec2 {
        self.matrix.transform_point2(pos)
    }

    /// Map a point from target space back to image space
    pub fn backward(&self, pos: Vec2) -> Vec2 {
        self.inverse().forward(pos)
    }

    /// Bounds of a `size` rect placed at the origin after transforming
    pub fn bounds(&self, size: Vec2) -> Rect {
        let corners = [
            Vec2::ZERO,
            Vec2::new(size.x, 0.0),
            Vec2::new(0.0, size.y),
            size,
        ]
        .map(|p| self.forward(p));
        let min = corners.iter().fold(Vec2::INFINITY, |acc, p| acc.min(*p));
        let max = corners
            .iter()
            .fold(Vec2::NEG_INFINITY, |acc, p| acc.max(*p));
        Rect { min, max }
    }
}
