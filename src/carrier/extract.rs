//! Read a sentinel-terminated bitstream back out of a carrier.

use crate::carrier::capacity::capacity_bits;
use crate::carrier::image::Image;
use crate::carrier::progress::{CancelToken, ProgressObserver, Ticker};
use crate::config::{DecodeOptions, BYTES_PER_PIXEL, DATA_CHANNELS, SENTINEL, SENTINEL_BITS};
use crate::error::{Error, Result};

/// Collect channel bits until the sentinel appears, returning the bits
/// before it.
///
/// The sentinel is tested after every single bit, since the payload need
/// not end on a byte boundary relative to the scan.
pub fn extract(
    image: &Image,
    lsb_depth: u8,
    observer: &mut dyn ProgressObserver,
    cancel: &CancelToken,
) -> Result<Vec<bool>> {
    DecodeOptions::new(lsb_depth)
        .validate()
        .map_err(Error::InvalidInput)?;

    let total = capacity_bits(image.width(), image.height(), lsb_depth);
    let mut ticker = Ticker::new(observer, total);
    let mut bits = Vec::new();
    let mut window: u16 = 0;

    for pixel in image.as_raw().chunks_exact(BYTES_PER_PIXEL) {
        cancel.check()?;

        for &channel in &pixel[..DATA_CHANNELS] {
            for position in (0..lsb_depth).rev() {
                let bit = (channel >> position) & 1 == 1;
                bits.push(bit);
                window = (window << 1) | u16::from(bit);
                ticker.tick(bits.len());

                if bits.len() >= SENTINEL_BITS && window == SENTINEL {
                    ticker.finish(bits.len());
                    bits.truncate(bits.len() - SENTINEL_BITS);
                    log::debug!("sentinel found after {} payload bits", bits.len());
                    return Ok(bits);
                }
            }
        }
    }

    log::debug!("scanned {} bits without finding the sentinel", bits.len());
    Err(Error::NoMessageFound)
}
