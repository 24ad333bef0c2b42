use std::{collections::BTreeMap, path::Path, str::FromStr, sync::Arc};

use anyhow::{bail, Context, Result};
use glam::{IVec2, UVec2};
use serde::*;
use serde_json::Value;

use crate::{
    animation::DEFAULT_FRAME_DURATION,
    assets::AssetsManager,
    sprite::{AnimatedSprite, FlipMode, SpriteMode},
};

/// Frames of one state: image paths in multi mode, sheet region origins in single mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateFrames {
    Regions(Vec<[i32; 2]>),
    Paths(Vec<String>),
}

impl StateFrames {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Regions(origins) => origins.is_empty(),
            Self::Paths(paths) => paths.is_empty(),
        }
    }
}

fn default_scale() -> f32 {
    1.0
}

fn default_frame_duration() -> f32 {
    DEFAULT_FRAME_DURATION
}

/// Animated sprite description
///
/// ```json
/// {
///   "mode": "single",
///   "spriteSize": [16, 16],
///   "spriteSheet": "hero.png",
///   "initialState": "idle",
///   "states": { "idle": [[0, 0], [16, 0]] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    #[serde(default)]
    pub mode: SpriteMode,
    #[serde(default)]
    pub sprite_size: [u32; 2],
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_frame_duration")]
    pub frame_duration: f32,
    #[serde(default)]
    pub flip: FlipMode,
    // Sheet image path, relative to the asset root
    #[serde(default)]
    pub sprite_sheet: Option<String>,
    #[serde(default)]
    pub initial_state: Option<String>,
    pub states: BTreeMap<String, StateFrames>,
}

impl FromStr for AnimationConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("parse animation config")
    }
}

impl AnimationConfig {
    pub fn from_json(value: Value) -> Result<Self> {
        serde_json::from_value(value).context("parse animation config")
    }

    /// Read a config file from the assets
    pub fn load<P: AsRef<Path>>(assets: &AssetsManager, path: P) -> Result<Self> {
        let bytes = assets.read(path)?;
        serde_json::from_slice(&bytes).context("parse animation config")
    }

    /// Build the sprite, images are loaded through `assets`
    pub fn build(&self, assets: &AssetsManager) -> Result<AnimatedSprite> {
        let mut sprite = AnimatedSprite::new(self.mode);
        sprite.flip = self.flip;
        sprite.set_sprite_size(UVec2::from_array(self.sprite_size));
        sprite.set_sprite_scale(self.scale);
        sprite.set_frame_duration(self.frame_duration);
        if let Some(sheet) = &self.sprite_sheet {
            sprite.sprite_sheet = Some(Arc::new(assets.load_image(sheet)?));
        }

        for (name, frames) in &self.states {
            match frames {
                StateFrames::Paths(paths) if self.mode == SpriteMode::Multi => {
                    let images = paths
                        .iter()
                        .map(|path| assets.load_image(path))
                        .collect::<Result<Vec<_>>>()
                        .with_context(|| format!("state {name}"))?;
                    sprite.add_state_images(name.as_str(), images)?;
                }
                StateFrames::Regions(origins) if self.mode == SpriteMode::Single => {
                    let origins = origins.iter().copied().map(IVec2::from_array).collect();
                    sprite.add_state_regions(name.as_str(), origins)?;
                }
                frames if frames.is_empty() => match self.mode {
                    SpriteMode::Multi => sprite.add_state_images(name.as_str(), Vec::new())?,
                    SpriteMode::Single => sprite.add_state_regions(name.as_str(), Vec::new())?,
                },
                _ => bail!("state {name} frames don't match {:?} mode", self.mode),
            }
        }

        if let Some(state) = &self.initial_state {
            sprite.set_state(state)?;
        }
        Ok(sprite)
    }
}

#[cfg(test)]
mod tests {
    use glam::{UVec2, Vec2};
    use serde_json::json;

    use super::{AnimationConfig, StateFrames};
    use crate::{
        animation::DEFAULT_FRAME_DURATION,
        assets::AssetsManager,
        image::Image,
        render::Render,
        sprite::{FlipMode, SpriteMode},
    };

    #[test]
    fn test_defaults() {
        let json = r#"{ "states": { "idle": ["idle.png"] } }"#;
        let config: AnimationConfig = json.parse().unwrap();
        assert_eq!(config.mode, SpriteMode::Multi);
        assert_eq!(config.flip, FlipMode::None);
        assert_eq!(config.scale, 1.0);
        assert_eq!(config.frame_duration, DEFAULT_FRAME_DURATION);
        assert_eq!(
            config.states["idle"],
            StateFrames::Paths(vec!["idle.png".to_string()])
        );
        assert!("{}".parse::<AnimationConfig>().is_err());
    }

    #[test]
    fn test_build_single() {
        let dir = tempfile::tempdir().unwrap();
        Image::filled(UVec2::new(8, 4), [9, 9, 9, 255])
            .save(dir.path().join("hero.png"))
            .unwrap();
        let assets = AssetsManager::with_root(dir.path());

        let config = AnimationConfig::from_json(json!({
            "mode": "single",
            "spriteSize": [4, 4],
            "scale": 2.0,
            "frameDuration": 0.25,
            "flip": "horizontal",
            "spriteSheet": "hero.png",
            "initialState": "walk",
            "states": {
                "walk": [[0, 0], [4, 0]],
                "idle": []
            }
        }))
        .unwrap();
        let mut sprite = config.build(&assets).unwrap();
        assert_eq!(sprite.state(), Some("walk"));
        assert!(sprite.has_state("idle"));
        assert_eq!(sprite.sprite_size(), UVec2::splat(4));
        assert_eq!(sprite.sprite_scale(), 2.0);
        assert_eq!(sprite.frame_duration(), 0.25);
        assert_eq!(sprite.flip, FlipMode::Horizontal);

        let mut render = Render::new(UVec2::splat(32));
        sprite.draw(0.25, Vec2::new(16.0, 8.0), &mut render).unwrap();
        assert_eq!(sprite.current_frame(), 1);
        assert_eq!(render.draw_calls(), 1);
    }

    #[test]
    fn test_build_multi() {
        let dir = tempfile::tempdir().unwrap();
        Image::filled(UVec2::splat(2), [1, 2, 3, 255])
            .save(dir.path().join("a.png"))
            .unwrap();
        let assets = AssetsManager::with_root(dir.path());

        let config = AnimationConfig::from_json(json!({
            "initialState": "idle",
            "states": { "idle": ["a.png", "a.png"] }
        }))
        .unwrap();
        let sprite = config.build(&assets).unwrap();
        assert_eq!(sprite.state(), Some("idle"));

        let missing = AnimationConfig::from_json(json!({
            "states": { "idle": ["b.png"] }
        }))
        .unwrap();
        assert!(missing.build(&assets).is_err());
    }

    #[test]
    fn test_build_errors() {
        let assets = AssetsManager::with_root(".");
        let mismatch = AnimationConfig::from_json(json!({
            "mode": "multi",
            "states": { "walk": [[0, 0]] }
        }))
        .unwrap();
        assert!(mismatch.build(&assets).is_err());

        let unknown = AnimationConfig::from_json(json!({
            "mode": "single",
            "initialState": "run",
            "states": { "walk": [[0, 0]] }
        }))
        .unwrap();
        assert!(unknown.build(&assets).is_err());
    }
}
