//! Capacity arithmetic and usage reports.

use crate::config::{DATA_CHANNELS, SENTINEL_BITS};

/// Number of bits the carrier can hold at the given depth.
pub fn capacity_bits(width: u32, height: u32, lsb_depth: u8) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(DATA_CHANNELS)
        .saturating_mul(lsb_depth as usize)
}

/// Maximum embeddable bytes: `floor(width * height * 3 * depth / 8)`.
///
/// ```
/// assert_eq!(lsb_stego::capacity(10, 10, 1), 37);
/// ```
pub fn capacity(width: u32, height: u32, lsb_depth: u8) -> usize {
    capacity_bits(width, height, lsb_depth) / 8
}

/// Bytes of capacity a payload consumes, sentinel included.
pub fn required_bytes(payload_len: usize) -> usize {
    payload_len + SENTINEL_BITS / 8
}

/// Summary of how much of a carrier a message would use.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityReport {
    /// Embeddable bytes.
    pub capacity: usize,
    /// Bytes the message takes.
    pub used: usize,
    /// Bytes left over (zero when the message does not fit).
    pub remaining: usize,
    /// `used / capacity` as a percentage.
    pub efficiency: f64,
    /// Number of pixels in the carrier.
    pub pixels: usize,
    /// Number of writable bits.
    pub lsb_bits: usize,
}

impl CapacityReport {
    /// Report for a `width` x `height` carrier holding `message_len`
    /// embedded bytes (sentinel included) at `lsb_depth`.
    pub fn new(width: u32, height: u32, message_len: usize, lsb_depth: u8) -> Self {
        let capacity = capacity(width, height, lsb_depth);
        let efficiency = if capacity == 0 {
            0.0
        } else {
            message_len as f64 / capacity as f64 * 100.0
        };

        Self {
            capacity,
            used: message_len,
            remaining: capacity.saturating_sub(message_len),
            efficiency,
            pixels: width as usize * height as usize,
            lsb_bits: capacity_bits(width, height, lsb_depth),
        }
    }

    /// Whether the message fits.
    pub fn fits(&self) -> bool {
        self.used <= self.capacity
    }
}

/// Human-readable byte count, e.g. `1.5 KB`.
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
