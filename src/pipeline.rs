//! Encode/decode orchestration.
//!
//! ```text
//! encode: message → [0x00 ‖ LZW] → [envelope] → bits ‖ sentinel → embed
//! decode: extract → bytes → [envelope] → [strip 0x00, LZW⁻¹] → message
//! ```
//!
//! A password is the only signal to open an envelope; a leading `0x00` is
//! the only signal to decompress.

use crate::carrier::{
    embed, extract, report_once, required_bytes, CancelToken, Image, NoProgress, Progress,
    ProgressObserver,
};
use crate::config::{DecodeOptions, EncodeOptions, COMPRESSION_MARKER, MAX_MESSAGE_SIZE};
use crate::crypto::{effective_password, open_payload, seal_payload};
use crate::encoding::{
    bits_to_bytes, bytes_to_bits, compress_bytes, decompress_bytes, push_sentinel,
};
use crate::error::{Error, Result};

/// Build the byte payload that gets embedded for `message`.
///
/// Useful for sizing: the carrier needs `required_bytes(payload.len())`
/// bytes of capacity. Encrypted payloads differ on every call.
pub fn build_payload(
    message: &str,
    password: Option<&str>,
    options: &EncodeOptions,
) -> Result<Vec<u8>> {
    if message.is_empty() {
        return Err(Error::InvalidInput("message is empty".to_string()));
    }
    if message.len() > MAX_MESSAGE_SIZE {
        return Err(Error::InvalidInput(format!(
            "message is {} bytes, limit is {}",
            message.len(),
            MAX_MESSAGE_SIZE
        )));
    }

    let mut payload = message.as_bytes().to_vec();

    if options.compression {
        let compressed = compress_bytes(&payload);
        log::debug!("compressed {} -> {} bytes", payload.len(), compressed.len());
        payload = Vec::with_capacity(compressed.len() + 1);
        payload.push(COMPRESSION_MARKER);
        payload.extend_from_slice(&compressed);
    } else if payload[0] == COMPRESSION_MARKER {
        // Would be read back as a compressed stream.
        return Err(Error::InvalidInput(
            "uncompressed message cannot start with a NUL character".to_string(),
        ));
    }

    if let Some(password) = effective_password(password) {
        payload = seal_payload(&payload, password)?;
        log::debug!("sealed payload is {} bytes", payload.len());
    }

    Ok(payload)
}

/// Hide `message` in a copy of `image`.
///
/// The input image is never modified.
///
/// # Example
///
/// ```
/// use lsb_stego::{decode, encode, DecodeOptions, EncodeOptions, Image};
///
/// let carrier = Image::filled(10, 10, [200, 100, 50, 255]);
/// let options = EncodeOptions::new(1, false);
///
/// let stego = encode(&carrier, "hi", None, &options).unwrap();
/// assert_eq!(decode(&stego, None, &DecodeOptions::default()).unwrap(), "hi");
/// ```
pub fn encode(
    image: &Image,
    message: &str,
    password: Option<&str>,
    options: &EncodeOptions,
) -> Result<Image> {
    encode_with(
        image,
        message,
        password,
        options,
        &mut NoProgress,
        &CancelToken::new(),
    )
}

/// [`encode`] with progress reporting and cancellation.
pub fn encode_with(
    image: &Image,
    message: &str,
    password: Option<&str>,
    options: &EncodeOptions,
    observer: &mut dyn ProgressObserver,
    cancel: &CancelToken,
) -> Result<Image> {
    options.validate().map_err(Error::InvalidInput)?;

    let payload = build_payload(message, password, options)?;

    let needed = required_bytes(payload.len());
    let max = image.capacity(options.lsb_depth);
    if needed > max {
        return Err(Error::CapacityExceeded { needed, max });
    }

    let mut bits = bytes_to_bits(&payload);
    push_sentinel(&mut bits);

    let mut output = image.clone();
    embed(&mut output, &bits, options.lsb_depth, observer, cancel)?;

    log::debug!(
        "hid {} byte message as {} payload bytes ({} of {} capacity)",
        message.len(),
        payload.len(),
        needed,
        max
    );
    Ok(output)
}

/// Recover the message hidden in `image`.
pub fn decode(image: &Image, password: Option<&str>, options: &DecodeOptions) -> Result<String> {
    decode_with(image, password, options, &mut NoProgress, &CancelToken::new())
}

/// [`decode`] with progress reporting and cancellation.
pub fn decode_with(
    image: &Image,
    password: Option<&str>,
    options: &DecodeOptions,
    observer: &mut dyn ProgressObserver,
    cancel: &CancelToken,
) -> Result<String> {
    options.validate().map_err(Error::InvalidInput)?;

    let bits = extract(image, options.lsb_depth, observer, cancel)?;
    let mut payload = bits_to_bytes(&bits);
    if payload.is_empty() {
        return Err(Error::NoMessageFound);
    }

    if let Some(password) = effective_password(password) {
        payload = open_payload(&payload, password)?;
    }

    if payload.first() == Some(&COMPRESSION_MARKER) {
        payload = decompress_bytes(&payload[1..])?;
    }

    String::from_utf8(payload).map_err(|_| Error::InvalidUtf8)
}

/// Outcome of one item in a batch.
#[derive(Debug)]
pub struct BatchEntry<T> {
    /// Position in the input.
    pub index: usize,
    pub outcome: Result<T>,
}

impl<T> BatchEntry<T> {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Hide each message in its own copy of `image`.
///
/// Failures are recorded per entry and do not stop the batch. The
/// observer receives one tick per finished message.
pub fn batch_encode(
    image: &Image,
    messages: &[&str],
    password: Option<&str>,
    options: &EncodeOptions,
    observer: &mut dyn ProgressObserver,
) -> Vec<BatchEntry<Image>> {
    let total = messages.len();
    messages
        .iter()
        .enumerate()
        .map(|(index, message)| {
            let outcome = encode(image, message, password, options);
            if let Err(e) = &outcome {
                log::warn!("batch encode #{} failed: {}", index, e);
            }
            report_once(
                observer,
                Progress {
                    processed: index + 1,
                    total,
                },
            );
            BatchEntry { index, outcome }
        })
        .collect()
}

/// Recover the message from each carrier.
///
/// Failures are recorded per entry and do not stop the batch. The
/// observer receives one tick per finished carrier.
pub fn batch_decode(
    images: &[Image],
    password: Option<&str>,
    options: &DecodeOptions,
    observer: &mut dyn ProgressObserver,
) -> Vec<BatchEntry<String>> {
    let total = images.len();
    images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            let outcome = decode(image, password, options);
            if let Err(e) = &outcome {
                log::warn!("batch decode #{} failed: {}", index, e);
            }
            report_once(
                observer,
                Progress {
                    processed: index + 1,
                    total,
                },
            );
            BatchEntry { index, outcome }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::capacity;

    fn carrier(width: u32, height: u32) -> Image {
        let pixels = (0..width * height * 4).map(|i| (i * 37 % 251) as u8).collect();
        Image::from_rgba(width, height, pixels).unwrap()
    }

    #[test]
    fn test_hi_in_ten_by_ten() {
        let image = carrier(10, 10);
        let options = EncodeOptions::new(1, false);

        let stego = encode(&image, "hi", None, &options).unwrap();
        assert_eq!(decode(&stego, None, &DecodeOptions::default()).unwrap(), "hi");
        assert_eq!(capacity(10, 10, 1), 37);
    }

    #[test]
    fn test_compressed_payload_has_marker() {
        let payload = build_payload("hello", None, &EncodeOptions::default()).unwrap();
        assert_eq!(payload[0], COMPRESSION_MARKER);
        assert_eq!(payload.len(), 1 + 5 * 2);
    }

    #[test]
    fn test_plain_payload_is_message() {
        let payload = build_payload("hello", Some(" "), &EncodeOptions::new(1, false)).unwrap();
        assert_eq!(payload, b"hello");
    }

    #[test]
    fn test_rejects_empty_message() {
        let result = encode(&carrier(4, 4), "", None, &EncodeOptions::default());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_leading_nul_without_compression() {
        let result = build_payload("\0abc", None, &EncodeOptions::new(1, false));
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let stego = encode(&carrier(20, 20), "\0abc", None, &EncodeOptions::default()).unwrap();
        assert_eq!(
            decode(&stego, None, &DecodeOptions::default()).unwrap(),
            "\0abc"
        );
    }

    #[test]
    fn test_rejects_oversize_message() {
        let message = "a".repeat(MAX_MESSAGE_SIZE + 1);
        let result = build_payload(&message, None, &EncodeOptions::default());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_capacity_exceeded_reports_max() {
        let image = carrier(10, 10);
        let message = "x".repeat(36);

        match encode(&image, &message, None, &EncodeOptions::new(1, false)) {
            Err(Error::CapacityExceeded { needed, max }) => {
                assert_eq!(needed, 38);
                assert_eq!(max, 37);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_unicode_roundtrip() {
        let image = carrier(40, 40);
        let message = "héllo wörld ✓";
        for compression in [false, true] {
            let options = EncodeOptions::new(1, compression);
            let stego = encode(&image, message, None, &options).unwrap();
            assert_eq!(
                decode(&stego, None, &DecodeOptions::default()).unwrap(),
                message
            );
        }
    }

    #[test]
    fn test_encode_with_closure_observer() {
        let image = carrier(100, 100);
        let message = "q".repeat(2000);
        let mut last = None;

        let stego = encode_with(
            &image,
            &message,
            None,
            &EncodeOptions::new(1, false),
            &mut |p: Progress| -> Result<()> {
                last = Some(p);
                Ok(())
            },
            &CancelToken::new(),
        )
        .unwrap();

        let last = last.unwrap();
        assert!(last.is_complete());
        assert_eq!(last.processed, (2000 + 2) * 8);
        assert_eq!(
            decode(&stego, None, &DecodeOptions::default()).unwrap(),
            message
        );
    }

    #[test]
    fn test_batch_encode_mixed() {
        let image = carrier(10, 10);
        let long = "y".repeat(100);
        let messages = ["one", "", long.as_str(), "two"];
        let mut ticks: Vec<Progress> = Vec::new();

        let results = batch_encode(
            &image,
            &messages,
            None,
            &EncodeOptions::new(1, false),
            &mut ticks,
        );

        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        assert!(matches!(results[1].outcome, Err(Error::InvalidInput(_))));
        assert!(matches!(
            results[2].outcome,
            Err(Error::CapacityExceeded { .. })
        ));
        assert!(results[3].is_ok());
        assert_eq!(ticks.len(), 4);
        assert!(ticks[3].is_complete());
    }

    #[test]
    fn test_batch_decode_mixed() {
        let options = EncodeOptions::new(1, true);
        let good = encode(&carrier(12, 12), "batch", None, &options).unwrap();
        let blank = Image::filled(12, 12, [0; 4]);

        let results = batch_decode(
            &[good, blank],
            None,
            &DecodeOptions::default(),
            &mut NoProgress,
        );

        assert_eq!(results[0].outcome.as_deref().unwrap(), "batch");
        assert!(matches!(results[1].outcome, Err(Error::NoMessageFound)));
        assert_eq!(results[1].index, 1);
    }
}
