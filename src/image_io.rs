//! Loading and saving carriers as image files.
//!
//! Any format the `image` crate can decode is accepted on input; output is
//! always lossless PNG, since lossy formats destroy the hidden bits.

use crate::carrier::Image;
use crate::error::{Error, Result};
use image::{ImageFormat, RgbaImage};
use std::path::Path;

/// Decode an image file into an RGBA carrier.
pub fn load(path: &Path) -> Result<Image> {
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("loaded {} ({}x{})", path.display(), width, height);
    Image::from_rgba(width, height, rgba.into_raw())
}

/// Write a carrier as PNG.
pub fn save(path: &Path, image: &Image) -> Result<()> {
    let buffer = RgbaImage::from_raw(image.width(), image.height(), image.as_raw().to_vec())
        .ok_or_else(|| Error::Image("pixel buffer does not match dimensions".to_string()))?;
    buffer.save_with_format(path, ImageFormat::Png)?;
    log::debug!("saved {}", path.display());
    Ok(())
}

/// Whether a path looks like an image file we can read.
pub fn is_image_path(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}
