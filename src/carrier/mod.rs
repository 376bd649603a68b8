//! Carrier images and the LSB embedder/extractor.
//!
//! Bits are written in row-major pixel order, R then G then B within a
//! pixel; alpha is never read or written. With an LSB depth of `n`, each
//! channel carries `n` consecutive stream bits in positions `n-1` down to 0.

mod capacity;
mod embed;
mod extract;
mod image;
mod progress;

pub use capacity::{capacity, capacity_bits, format_bytes, required_bytes, CapacityReport};
pub use embed::embed;
pub use extract::extract;
pub use image::Image;
pub use progress::{CancelToken, NoProgress, Progress, ProgressObserver};

pub(crate) use progress::{report_once, Ticker};
