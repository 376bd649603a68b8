//! MSB-first conversion between bytes and bit sequences.

use crate::config::{SENTINEL, SENTINEL_BITS};

/// Expand bytes into bits, most significant bit first.
///
/// ```
/// use lsb_stego::encoding::bytes_to_bits;
///
/// let bits = bytes_to_bits(b"A");
/// assert_eq!(bits, [false, true, false, false, false, false, false, true]);
/// ```
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    bits
}

/// Pack bits back into bytes, MSB first.
///
/// A trailing group shorter than 8 bits is dropped, not padded.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
        .collect()
}

/// The sentinel pattern as bits.
pub fn sentinel_bits() -> Vec<bool> {
    (0..SENTINEL_BITS)
        .rev()
        .map(|shift| (SENTINEL >> shift) & 1 == 1)
        .collect()
}

/// Append the end-of-payload sentinel to a bitstream.
pub fn push_sentinel(bits: &mut Vec<bool>) {
    bits.extend(sentinel_bits());
}
