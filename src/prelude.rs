pub use crate::animation::{FrameTimer, Frames, DEFAULT_FRAME_DURATION};
pub use crate::assets::AssetsManager;
pub use crate::config::{AnimationConfig, StateFrames};
pub use crate::errors::Error;
pub use crate::image::{Image, BLANK};
pub use crate::render::{Canvas, Render};
pub use crate::sprite::{AnimatedSprite, FlipMode, SpriteMode};
pub use crate::transform::Transform2D;
pub use crate::types::Rect;
pub use anyhow::{self, Result};
pub use glam::{self, IVec2, UVec2, Vec2};
