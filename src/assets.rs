//! Sprite images
//!
//! Each sprite is decoded from a PNG on disk and scaled to the size of the
//! entity it draws. A missing or undecodable image is fatal at startup.

use std::io;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::FilterType;

use crate::consts::{OBSTACLE_SIZE, PLAYER_SIZE, POWERUP_SIZE};
use crate::settings::Settings;

pub const PLAYER_IMAGE: &str = "player.png";
pub const OBSTACLE_IMAGE: &str = "obstacle.png";
pub const POWERUP_IMAGE: &str = "powerup.png";

/// Asset loading errors
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Load an image and scale it to exactly `width` x `height`
pub fn load_and_scale_image(path: &Path, width: u32, height: u32) -> Result<RgbaImage, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "Loaded {} ({}x{}) -> {}x{}",
        path.display(),
        image.width(),
        image.height(),
        width,
        height
    );
    Ok(image.resize_exact(width, height, FilterType::Triangle).to_rgba8())
}

/// All sprite images, scaled to their on-screen sizes
#[derive(Debug, Clone)]
pub struct Sprites {
    pub player: RgbaImage,
    pub obstacle: RgbaImage,
    pub powerup: RgbaImage,
}

impl Sprites {
    /// Load every sprite from the configured asset directory
    pub fn load(settings: &Settings) -> Result<Self, AssetError> {
        let load = |name: &str, size: f32| {
            let side = size as u32;
            load_and_scale_image(&settings.asset_path(name), side, side)
        };
        let sprites = Self {
            player: load(PLAYER_IMAGE, PLAYER_SIZE)?,
            obstacle: load(OBSTACLE_IMAGE, OBSTACLE_SIZE)?,
            powerup: load(POWERUP_IMAGE, POWERUP_SIZE)?,
        };
        log::info!("Loaded sprites from {}", settings.asset_dir.display());
        Ok(sprites)
    }
}
