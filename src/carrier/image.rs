//! In-memory RGBA pixel buffer.

use crate::carrier::capacity::capacity;
use crate::config::BYTES_PER_PIXEL;
use crate::error::{Error, Result};

/// A carrier image: `width * height` pixels of interleaved R, G, B, A bytes,
/// row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    /// Wrap an RGBA buffer, checking that its length is `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| {
                Error::InvalidInput(format!("{}x{} image is too large", width, height))
            })?;

        if pixels.len() != expected {
            return Err(Error::InvalidInput(format!(
                "{}x{} image needs {} channel bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// An image with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(count * BYTES_PER_PIXEL)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels, `width * height`.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGBA bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Embeddable payload bytes at the given LSB depth.
    pub fn capacity(&self, lsb_depth: u8) -> usize {
        capacity(self.width, self.height, lsb_depth)
    }
}
