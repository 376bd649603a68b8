//! LSB image steganography for text messages.
//!
//! Hides a text payload in the least-significant bits of an image's R, G
//! and B channels, optionally compressing it with LZW and sealing it with
//! a password.
//!
//! # Features
//!
//! - **LSB embedding**: 1 to 8 low bits per channel, alpha left untouched
//! - **LZW compression**: 16-bit codes, marked by a leading `0x00` byte
//! - **AES-256-GCM encryption**: PBKDF2-HMAC-SHA256 key derivation, JSON envelope
//! - **Background tasks**: progress ticks and cancellation for large carriers
//!
//! # Architecture
//!
//! ```text
//! Message → Compress (LZW) → Encrypt (AES-256-GCM) → Bits + sentinel → Embed (LSB)
//! ```
//!
//! # Example
//!
//! ```rust
//! use lsb_stego::{decode, encode, DecodeOptions, EncodeOptions, Image};
//!
//! let carrier = Image::filled(64, 64, [120, 80, 40, 255]);
//!
//! let stego = encode(&carrier, "meet at dawn", Some("hunter2"), &EncodeOptions::default()).unwrap();
//! let message = decode(&stego, Some("hunter2"), &DecodeOptions::default()).unwrap();
//!
//! assert_eq!(message, "meet at dawn");
//! ```

pub mod carrier;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod image_io;
pub mod pipeline;
pub mod task;

pub use carrier::{capacity, CancelToken, CapacityReport, Image, Progress, ProgressObserver};
pub use config::{DecodeOptions, EncodeOptions};
pub use error::{Error, Result};
pub use pipeline::{batch_decode, batch_encode, decode, decode_with, encode, encode_with};
pub use task::{spawn_decode, spawn_encode, StegoTask};
