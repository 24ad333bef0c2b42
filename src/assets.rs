use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::image::Image;

/// Environment variable overriding the asset root
pub const ASSET_ROOT_ENV: &str = "ROAST2D_ASSET_ROOT";

/// Copy from bevy https://github.com/bevyengine/bevy/blob/99ab0285e459753838d0e0716fda9be7b4976a4c/crates/bevy_asset/src/io/file/mod.rs#L18
pub(crate) fn get_base_path() -> PathBuf {
    if let Ok(manifest_dir) = env::var(ASSET_ROOT_ENV) {
        PathBuf::from(manifest_dir)
    } else if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        PathBuf::from(manifest_dir)
    } else {
        env::current_exe()
            .ok()
            .and_then(|path| path.parent().map(ToOwned::to_owned))
            .unwrap_or_default()
    }
}

/// Resolves asset paths against a root directory and loads them
pub struct AssetsManager {
    root_path: PathBuf,
}

impl AssetsManager {
    /// Assets under `path`, relative to the base path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let root_path = get_base_path().join(path);
        Self { root_path }
    }

    /// Assets under an explicit root directory
    pub fn with_root<P: AsRef<Path>>(root_path: P) -> Self {
        Self {
            root_path: root_path.as_ref().to_owned(),
        }
    }

    pub fn root_path(&self) -> &PathBuf {
        &self.root_path
    }

    pub fn get_full_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.root_path.join(path)
    }

    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<Vec<u8>> {
        let full_path = self.get_full_path(path);
        fs::read(&full_path)
            .with_context(|| format!("read {}", full_path.display()))
    }

    /// Load an image, format comes from the extension or is sniffed from the content
    pub fn load_image<P: AsRef<Path>>(&self, path: P) -> Result<Image> {
        let path = path.as_ref();
        let bytes = self.read(path)?;
        let im = match image::ImageFormat::from_path(path) {
            Ok(f) => image::load_from_memory_with_format(&bytes, f),
            _ => image::load_from_memory(&bytes),
        }
        .with_context(|| format!("decode image {}", path.display()))?;
        log::debug!(
            "Loaded image {} {}x{}",
            path.display(),
            im.width(),
            im.height()
        );
        Ok(Image::from_rgba(im.into_rgba8()))
    }
}

#[cfg(test)]
mod tests {
    use glam::UVec2;

    use super::{AssetsManager, ASSET_ROOT_ENV};
    use crate::image::Image;

    #[test]
    fn test_load_image() {
        let dir = tempfile::tempdir().unwrap();
        let im = Image::filled(UVec2::new(3, 2), [1, 2, 3, 255]);
        im.save(dir.path().join("frame.png")).unwrap();
        // no extension, decoded by content
        let png = dir.path().join("frame.png");
        std::fs::copy(&png, dir.path().join("frame")).unwrap();

        let assets = AssetsManager::with_root(dir.path());
        assert_eq!(assets.load_image("frame.png").unwrap(), im);
        assert_eq!(assets.load_image("frame").unwrap(), im);
        assert!(assets.load_image("missing.png").is_err());
    }

    #[test]
    fn test_asset_root_from_env() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(ASSET_ROOT_ENV, dir.path());
        let assets = AssetsManager::new("sprites");
        std::env::remove_var(ASSET_ROOT_ENV);
        assert_eq!(assets.root_path(), &dir.path().join("sprites"));
        assert_eq!(
            assets.get_full_path("hero.png"),
            dir.path().join("sprites").join("hero.png")
        );

        let im = Image::filled(UVec2::splat(2), [4, 5, 6, 255]);
        std::fs::create_dir(assets.root_path()).unwrap();
        im.save(assets.get_full_path("hero.png")).unwrap();
        assert_eq!(assets.load_image("hero.png").unwrap(), im);
    }
}
