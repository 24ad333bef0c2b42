use std::{path::Path, sync::Arc};

use glam::{IVec2, UVec2, Vec2};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{
    animation::{FrameTimer, Frames},
    errors::Error,
    image::Image,
    render::Canvas,
    transform::Transform2D,
};

/// Axis to mirror the sprite on
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// Where frames come from
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpriteMode {
    /// One image per frame
    #[default]
    Multi,
    /// Regions of a shared sprite sheet
    Single,
}

/// Sprite playing named animation states
///
/// # Examples
///
/// ```
/// # use roast2d_animsprite::prelude::*;
/// # use std::sync::Arc;
/// let sheet = Arc::new(Image::new(UVec2::new(32, 16)));
/// let mut sprite = AnimatedSprite::new(SpriteMode::Single).with_sprite_sheet(sheet);
/// sprite.set_sprite_size(UVec2::splat(16));
/// sprite.add_state_regions("walk", vec![IVec2::new(0, 0), IVec2::new(16, 0)]).unwrap();
/// sprite.set_state("walk").unwrap();
///
/// let mut render = Render::new(UVec2::new(64, 64));
/// sprite.draw(1.0 / 60.0, Vec2::new(8.0, 8.0), &mut render).unwrap();
/// ```
#[derive(Debug)]
pub struct AnimatedSprite {
    /// Flip axis applied when drawing
    pub flip: FlipMode,
    /// Kind of states that can be selected and drawn
    pub mode: SpriteMode,
    /// Sheet the regions of single mode states are copied from
    pub sprite_sheet: Option<Arc<Image>>,
    states: HashMap<String, Frames>,
    state: Option<String>,
    frame: FrameTimer,
    sprite_size: UVec2,
    sprite_scale: f32,
    // single mode draw target, reused while the sprite size doesn't change
    scratch: Option<Image>,
}

impl Default for AnimatedSprite {
    fn default() -> Self {
        Self::new(SpriteMode::default())
    }
}

impl AnimatedSprite {
    pub fn new(mode: SpriteMode) -> Self {
        Self {
            flip: FlipMode::None,
            mode,
            sprite_sheet: None,
            states: HashMap::default(),
            state: None,
            frame: FrameTimer::default(),
            sprite_size: UVec2::ZERO,
            sprite_scale: 1.0,
            scratch: None,
        }
    }

    pub fn with_sprite_sheet(mut self, sheet: Arc<Image>) -> Self {
        self.sprite_sheet = Some(sheet);
        self
    }

    /// Load one image per path and append them to the frames of `name`
    pub fn add_state_paths<S, P, I>(&mut self, name: S, paths: I) -> anyhow::Result<()>
    where
        S: Into<String>,
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        let images = paths
            .into_iter()
            .map(Image::load)
            .collect::<anyhow::Result<Vec<_>>>()?;
        self.add_state_images(name, images)?;
        Ok(())
    }

    /// Append images to the frames of `name`
    pub fn add_state_images<S: Into<String>>(
        &mut self,
        name: S,
        images: Vec<Image>,
    ) -> Result<(), Error> {
        self.add_frames(name.into(), Frames::Multi(images))
    }

    /// Append sprite sheet regions to the frames of `name`
    pub fn add_state_regions<S: Into<String>>(
        &mut self,
        name: S,
        origins: Vec<IVec2>,
    ) -> Result<(), Error> {
        self.add_frames(name.into(), Frames::Single(origins))
    }

    fn add_frames(&mut self, name: String, frames: Frames) -> Result<(), Error> {
        if frames.is_empty() {
            log::warn!("State {name} added without frames");
        }
        match self.states.get_mut(&name) {
            None => {
                log::debug!("Add state {name} with {} frames", frames.len());
                self.states.insert(name, frames);
            }
            Some(existing) => match (existing, frames) {
                (Frames::Multi(existing), Frames::Multi(new)) => existing.extend(new),
                (Frames::Single(existing), Frames::Single(new)) => existing.extend(new),
                _ => return Err(Error::FrameKindMismatch(name)),
            },
        }
        Ok(())
    }

    /// Switch to state `name`.
    /// The animation restarts from the first frame unless `name` is already the current state.
    pub fn set_state(&mut self, name: &str) -> Result<(), Error> {
        match self.states.get(name) {
            Some(frames) if frames.mode() == self.mode => {}
            _ => return Err(Error::UnknownState(name.to_string())),
        }
        if self.state.as_deref() != Some(name) {
            log::debug!("State {:?} -> {name}", self.state);
            self.state = Some(name.to_string());
            self.frame.rewind();
        }
        Ok(())
    }

    /// Current state
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Registered state names, in no particular order
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    pub fn sprite_size(&self) -> UVec2 {
        self.sprite_size
    }

    pub fn set_sprite_size(&mut self, size: UVec2) {
        self.sprite_size = size;
    }

    pub fn sprite_scale(&self) -> f32 {
        self.sprite_scale
    }

    /// Non-positive scales fall back to 1.0
    pub fn set_sprite_scale(&mut self, scale: f32) {
        self.sprite_scale = if scale > 0.0 && scale.is_finite() {
            scale
        } else {
            1.0
        };
    }

    /// Seconds per frame
    pub fn frame_duration(&self) -> f32 {
        self.frame.duration()
    }

    pub fn set_frame_duration(&mut self, duration: f32) {
        self.frame.set_duration(duration);
    }

    /// Index of the current frame in the current state
    pub fn current_frame(&self) -> usize {
        self.frame.index()
    }

    /// Seconds accumulated towards the next frame
    pub fn frame_timer(&self) -> f32 {
        self.frame.timer()
    }

    /// Transform placing the sprite at `pos`, with scale and flip applied
    pub fn transform(&self, pos: Vec2) -> Transform2D {
        let scale = self.sprite_scale;
        let half = (self.sprite_size / 2).as_vec2() * scale;
        let t = Transform2D::new();
        let t = match self.flip {
            FlipMode::Horizontal => t
                .translate(Vec2::new(-half.x, 0.0))
                .scale(Vec2::new(-scale, scale)),
            FlipMode::Vertical => t
                .translate(Vec2::new(0.0, -half.y))
                .scale(Vec2::new(scale, -scale)),
            FlipMode::None => t.scale(Vec2::splat(scale)),
        };
        t.translate(pos)
    }

    fn current_frames(&self) -> Result<(&str, &Frames), Error> {
        let name = self.state.as_deref().ok_or(Error::NoState)?;
        let frames = self
            .states
            .get(name)
            .ok_or_else(|| Error::UnknownState(name.to_string()))?;
        if frames.mode() != self.mode {
            return Err(Error::ModeMismatch {
                state: name.to_string(),
                mode: self.mode,
            });
        }
        if frames.is_empty() {
            return Err(Error::EmptyState(name.to_string()));
        }
        Ok((name, frames))
    }

    /// Advance by `dt` and return the image of the current frame
    fn multi_frame(&mut self, dt: f32) -> Result<&Image, Error> {
        let (_, frames) = self.current_frames()?;
        let len = frames.len();
        let index = self.frame.advance(dt, len);
        match self.current_frames()? {
            (_, Frames::Multi(images)) => Ok(&images[index]),
            (name, Frames::Single(_)) => Err(Error::ModeMismatch {
                state: name.to_string(),
                mode: SpriteMode::Multi,
            }),
        }
    }

    /// Advance by `dt` and return the sheet region origin of the current frame
    fn single_frame(&mut self, dt: f32) -> Result<IVec2, Error> {
        let (_, frames) = self.current_frames()?;
        let len = frames.len();
        let index = self.frame.advance(dt, len);
        match self.current_frames()? {
            (_, Frames::Single(origins)) => Ok(origins[index]),
            (name, Frames::Multi(_)) => Err(Error::ModeMismatch {
                state: name.to_string(),
                mode: SpriteMode::Single,
            }),
        }
    }

    /// Advance the animation by `dt` seconds and draw the current frame at `pos`
    pub fn draw(&mut self, dt: f32, pos: Vec2, canvas: &mut impl Canvas) -> Result<(), Error> {
        let t = self.transform(pos);
        match self.mode {
            SpriteMode::Multi => {
                let image = self.multi_frame(dt)?;
                canvas.draw_image(image, &t);
            }
            SpriteMode::Single => {
                let sheet = self.sprite_sheet.clone().ok_or(Error::MissingSpriteSheet)?;
                let origin = self.single_frame(dt)?;
                let size = self.sprite_size;
                let scratch = self.scratch.get_or_insert_with(|| Image::new(size));
                if scratch.size() != size {
                    *scratch = Image::new(size);
                }
                if !scratch.copy_region_from(&sheet, origin) {
                    log::debug!("Region {origin} of state {:?} clipped", self.state);
                }
                canvas.draw_image(scratch, &t);
            }
        }
        Ok(())
    }
}
