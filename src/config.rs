//! Configuration constants and types for the embedding pipeline.

use serde::{Deserialize, Serialize};

/// End-of-payload marker: the 16-bit pattern `1111111111111110`.
pub const SENTINEL: u16 = 0xFFFE;

/// Length of the sentinel in bits.
pub const SENTINEL_BITS: usize = 16;

/// Byte prepended to a payload that went through the LZW compressor.
pub const COMPRESSION_MARKER: u8 = 0x00;

/// Largest accepted message, in bytes.
pub const MAX_MESSAGE_SIZE: usize = 1_000_000;

/// Interleaved channel bytes per pixel (R, G, B, A).
pub const BYTES_PER_PIXEL: usize = 4;

/// Color channels that carry payload bits (R, G, B). Alpha is never touched.
pub const DATA_CHANNELS: usize = 3;

/// Default number of low bits used per channel.
pub const DEFAULT_LSB_DEPTH: u8 = 1;

/// Minimum supported LSB depth.
pub const MIN_LSB_DEPTH: u8 = 1;

/// Maximum supported LSB depth (the whole channel byte).
pub const MAX_LSB_DEPTH: u8 = 8;

/// Progress is reported every this many processed bits.
pub const PROGRESS_INTERVAL_BITS: usize = 10_000;

/// Unread progress ticks a background task buffers before it waits.
pub const PROGRESS_BACKLOG: usize = 4;

/// PBKDF2 parameters for password-based encryption.
pub mod pbkdf2_params {
    /// HMAC-SHA-256 iterations.
    pub const ITERATIONS: u32 = 100_000;

    /// Salt length in bytes.
    pub const SALT_LENGTH: usize = 16;

    /// AES-GCM IV length in bytes (96 bits).
    pub const IV_LENGTH: usize = 12;

    /// Derived key length in bytes (256 bits).
    pub const KEY_LENGTH: usize = 32;

    /// Authentication tag length in bytes (128 bits).
    pub const TAG_LENGTH: usize = 16;
}

/// Dictionary compressor parameters.
pub mod lzw_params {
    /// Single-byte entries the dictionary is seeded with.
    pub const SEED_ENTRIES: usize = 256;

    /// Dictionary ceiling. Codes always fit in 16 bits.
    pub const MAX_ENTRIES: usize = 1 << 16;

    /// Width of a serialized code in bytes (big-endian).
    pub const CODE_BYTES: usize = 2;
}

fn validate_lsb_depth(lsb_depth: u8) -> Result<(), String> {
    if !(MIN_LSB_DEPTH..=MAX_LSB_DEPTH).contains(&lsb_depth) {
        return Err(format!(
            "LSB depth must be between {} and {}, got {}",
            MIN_LSB_DEPTH, MAX_LSB_DEPTH, lsb_depth
        ));
    }
    Ok(())
}

/// Options for hiding a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// Low bits written per color channel.
    pub lsb_depth: u8,

    /// Run the payload through the LZW compressor first.
    pub compression: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            lsb_depth: DEFAULT_LSB_DEPTH,
            compression: true,
        }
    }
}

impl EncodeOptions {
    /// Create encode options with custom settings.
    pub fn new(lsb_depth: u8, compression: bool) -> Self {
        Self {
            lsb_depth,
            compression,
        }
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<(), String> {
        validate_lsb_depth(self.lsb_depth)
    }
}

/// Options for recovering a message.
///
/// `lsb_depth` must match the depth the carrier was encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Low bits read per color channel.
    pub lsb_depth: u8,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            lsb_depth: DEFAULT_LSB_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Create decode options with a custom depth.
    pub fn new(lsb_depth: u8) -> Self {
        Self { lsb_depth }
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<(), String> {
        validate_lsb_depth(self.lsb_depth)
    }
}

impl From<&EncodeOptions> for DecodeOptions {
    fn from(options: &EncodeOptions) -> Self {
        Self {
            lsb_depth: options.lsb_depth,
        }
    }
}
