use thiserror::Error;

use crate::sprite::SpriteMode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("state {0} does not exist")]
    UnknownState(String),
    #[error("no state")]
    NoState,
    #[error("state {0} has no frames")]
    EmptyState(String),
    #[error("no sprite sheet")]
    MissingSpriteSheet,
    #[error("state {state} can't be drawn in {mode:?} mode")]
    ModeMismatch { state: String, mode: SpriteMode },
    #[error("state {0} already holds frames of another kind")]
    FrameKindMismatch(String),
}
