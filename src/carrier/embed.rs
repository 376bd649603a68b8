//! Write a bitstream into a carrier's color channels.

use crate::carrier::capacity::capacity_bits;
use crate::carrier::image::Image;
use crate::carrier::progress::{CancelToken, ProgressObserver, Ticker};
use crate::config::{EncodeOptions, BYTES_PER_PIXEL, DATA_CHANNELS};
use crate::error::{Error, Result};

/// Embed `bits` into `image`, `lsb_depth` bits per R/G/B channel.
///
/// The capacity check happens before any pixel is touched, so an
/// oversize stream leaves the image unmodified. Cancellation can stop the
/// loop part-way through; callers that need all-or-nothing semantics
/// should embed into a copy.
pub fn embed(
    image: &mut Image,
    bits: &[bool],
    lsb_depth: u8,
    observer: &mut dyn ProgressObserver,
    cancel: &CancelToken,
) -> Result<()> {
    EncodeOptions::new(lsb_depth, false)
        .validate()
        .map_err(Error::InvalidInput)?;

    let max_bits = capacity_bits(image.width(), image.height(), lsb_depth);
    if bits.len() > max_bits {
        return Err(Error::CapacityExceeded {
            needed: (bits.len() + 7) / 8,
            max: max_bits / 8,
        });
    }

    log::debug!(
        "embedding {} bits into {}x{} carrier at depth {}",
        bits.len(),
        image.width(),
        image.height(),
        lsb_depth
    );

    let mut ticker = Ticker::new(observer, bits.len());
    let mut next = 0usize;

    for pixel in image.as_raw_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
        if next >= bits.len() {
            break;
        }
        cancel.check()?;

        for channel in &mut pixel[..DATA_CHANNELS] {
            for position in (0..lsb_depth).rev() {
                let Some(&bit) = bits.get(next) else {
                    break;
                };
                *channel = (*channel & !(1u8 << position)) | (u8::from(bit) << position);
                next += 1;
                ticker.tick(next);
            }
        }
    }

    ticker.finish(next);
    Ok(())
}
