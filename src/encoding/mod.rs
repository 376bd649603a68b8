//! Payload encoding: bit serialization and LZW dictionary compression.
//!
//! Compressed payloads are a sequence of 16-bit big-endian codes. The
//! dictionary is seeded with the 256 single-byte strings and stops growing
//! at 65,536 entries on both sides, so the code width never changes.

mod bits;
mod decoder;
mod encoder;

pub use bits::{bits_to_bytes, bytes_to_bits, push_sentinel, sentinel_bits};
pub use decoder::{decompress, decompress_bytes};
pub use encoder::{compress, compress_bytes};
