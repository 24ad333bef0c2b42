use glam::IVec2;

use crate::{image::Image, sprite::SpriteMode};

/// Default seconds per frame
pub const DEFAULT_FRAME_DURATION: f32 = 0.1;

/// Frames of one animation state
#[derive(Debug, Clone, PartialEq)]
pub enum Frames {
    /// One whole image per frame
    Multi(Vec<Image>),
    /// Region origins into a shared sprite sheet
    Single(Vec<IVec2>),
}

impl Frames {
    pub fn len(&self) -> usize {
        match self {
            Self::Multi(images) => images.len(),
            Self::Single(origins) => origins.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sprite mode these frames can be drawn in
    pub fn mode(&self) -> SpriteMode {
        match self {
            Self::Multi(_) => SpriteMode::Multi,
            Self::Single(_) => SpriteMode::Single,
        }
    }
}

/// Steps a frame index every `duration` seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTimer {
    timer: f32,
    duration: f32,
    index: usize,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self {
            timer: 0.0,
            duration: DEFAULT_FRAME_DURATION,
            index: 0,
        }
    }
}

impl FrameTimer {
    pub fn new(duration: f32) -> Self {
        let mut timer = Self::default();
        timer.set_duration(duration);
        timer
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Seconds accumulated since the last step
    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Non-positive durations fall back to the default
    pub fn set_duration(&mut self, duration: f32) {
        self.duration = if duration > 0.0 && duration.is_finite() {
            duration
        } else {
            DEFAULT_FRAME_DURATION
        };
    }

    /// Back to the first frame, the accumulated time is kept
    pub fn rewind(&mut self) {
        self.index = 0;
    }

    /// Accumulate `dt` and step at most one frame, wrapping at `len`.
    /// Returns the resulting index.
    pub fn advance(&mut self, dt: f32, len: usize) -> usize {
        self.timer += dt;
        if self.timer >= self.duration {
            self.index += 1;
            self.timer = 0.0;
            if self.index >= len {
                self.index = 0;
            }
            log::trace!("Frame {}/{}", self.index, len);
        }
        self.index
    }
}
