//! Integration tests for end-to-end encode/decode.

use lsb_stego::carrier::{capacity, required_bytes, CancelToken};
use lsb_stego::image_io;
use lsb_stego::pipeline::build_payload;
use lsb_stego::{
    decode, encode, encode_with, DecodeOptions, EncodeOptions, Error, Image, Progress,
};
use tempfile::TempDir;

/// Helper to create a carrier with varied pixel values.
fn test_carrier(width: u32, height: u32) -> Image {
    let pixels: Vec<u8> = (0..width as usize * height as usize * 4)
        .map(|i| ((i * 131 + 17) % 256) as u8)
        .collect();
    Image::from_rgba(width, height, pixels).expect("Failed to build carrier")
}

#[test]
fn test_hi_in_ten_by_ten() {
    let image = test_carrier(10, 10);
    let options = EncodeOptions::new(1, false);

    assert_eq!(capacity(10, 10, 1), 37);

    let stego = encode(&image, "hi", None, &options).expect("Failed to encode");
    let message = decode(&stego, None, &DecodeOptions::default()).expect("Failed to decode");

    assert_eq!(message, "hi");
}

#[test]
fn test_roundtrip_matrix() {
    let image = test_carrier(48, 48);
    let message = "The quick brown fox jumps over the lazy dog. The quick brown fox!";

    for password in [None, Some("pw")] {
        for compression in [false, true] {
            for depth in [1u8, 2, 4, 8] {
                let options = EncodeOptions::new(depth, compression);
                let stego = encode(&image, message, password, &options).unwrap_or_else(|e| {
                    panic!("encode {:?}/{}/{} failed: {}", password, compression, depth, e)
                });

                let decoded = decode(&stego, password, &DecodeOptions::new(depth))
                    .unwrap_or_else(|e| {
                        panic!("decode {:?}/{}/{} failed: {}", password, compression, depth, e)
                    });
                assert_eq!(decoded, message);
            }
        }
    }
}

#[test]
fn test_exact_capacity_boundary() {
    let image = test_carrier(10, 10);
    let options = EncodeOptions::new(1, false);
    let max = capacity(10, 10, 1);

    // Payload plus the 2-byte sentinel exactly fills the carrier.
    let fits = "a".repeat(max - 2);
    assert_eq!(required_bytes(fits.len()), max);
    let stego = encode(&image, &fits, None, &options).expect("Exact fit should succeed");
    assert_eq!(decode(&stego, None, &DecodeOptions::default()).unwrap(), fits);

    let over = "a".repeat(max - 1);
    match encode(&image, &over, None, &options) {
        Err(Error::CapacityExceeded { needed, max: reported }) => {
            assert_eq!(needed, max + 1);
            assert_eq!(reported, 37);
        }
        other => panic!("Expected CapacityExceeded, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_capacity_scales_with_depth() {
    let image = test_carrier(10, 10);
    let message = "b".repeat(60);

    assert!(matches!(
        encode(&image, &message, None, &EncodeOptions::new(1, false)),
        Err(Error::CapacityExceeded { .. })
    ));

    let stego = encode(&image, &message, None, &EncodeOptions::new(2, false))
        .expect("Depth 2 doubles capacity");
    assert_eq!(decode(&stego, None, &DecodeOptions::new(2)).unwrap(), message);
}

#[test]
fn test_alpha_preserved() {
    let image = test_carrier(32, 32);
    let stego = encode(&image, &"alpha ".repeat(40), Some("pw"), &EncodeOptions::new(3, true))
        .expect("Failed to encode");

    for (before, after) in image.as_raw().chunks(4).zip(stego.as_raw().chunks(4)) {
        assert_eq!(before[3], after[3]);
    }
}

#[test]
fn test_only_low_bits_change() {
    let image = test_carrier(32, 32);
    let stego = encode(&image, "only the low bit", None, &EncodeOptions::new(1, true)).unwrap();

    let changed = image
        .as_raw()
        .iter()
        .zip(stego.as_raw())
        .filter(|(a, b)| a != b)
        .inspect(|(a, b)| assert_eq!(*a ^ *b, 1))
        .count();
    assert!(changed > 0);
}

#[test]
fn test_input_image_untouched() {
    let image = test_carrier(16, 16);
    let snapshot = image.clone();

    let _ = encode(&image, "leave the original alone", None, &EncodeOptions::default()).unwrap();
    assert_eq!(image, snapshot);
}

#[test]
fn test_compression_shrinks_repetitive_text() {
    let message = "abcabcabc".repeat(100);
    let raw = build_payload(&message, None, &EncodeOptions::new(1, false)).unwrap();
    let packed = build_payload(&message, None, &EncodeOptions::new(1, true)).unwrap();

    assert!(packed.len() < raw.len() / 2);
}

#[test]
fn test_decode_without_password_returns_envelope() {
    let image = test_carrier(64, 64);
    let stego = encode(&image, "sealed", Some("pw"), &EncodeOptions::new(1, false)).unwrap();

    let raw = decode(&stego, None, &DecodeOptions::default()).unwrap();
    assert!(raw.starts_with(r#"{"encrypted":true,"data":""#));
}

#[test]
fn test_progress_reported() {
    let image = test_carrier(200, 200);
    let message = "progress ".repeat(400);
    let mut ticks: Vec<Progress> = Vec::new();

    encode_with(
        &image,
        &message,
        None,
        &EncodeOptions::new(1, false),
        &mut ticks,
        &CancelToken::new(),
    )
    .unwrap();

    assert!(ticks.len() >= 3);
    assert!(ticks.windows(2).all(|w| w[0].processed < w[1].processed));
    assert!(ticks.last().unwrap().is_complete());
}

#[test]
fn test_png_file_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let cover = temp_dir.path().join("cover.png");
    let stego_path = temp_dir.path().join("stego.png");

    image_io::save(&cover, &test_carrier(40, 30)).expect("Failed to write cover");

    let carrier = image_io::load(&cover).expect("Failed to read cover");
    let stego = encode(&carrier, "saved to disk", Some("pw"), &EncodeOptions::default()).unwrap();
    image_io::save(&stego_path, &stego).expect("Failed to write stego");

    let reloaded = image_io::load(&stego_path).expect("Failed to read stego");
    assert_eq!(
        decode(&reloaded, Some("pw"), &DecodeOptions::default()).unwrap(),
        "saved to disk"
    );
}

#[test]
fn test_empty_message_rejected() {
    let result = encode(&test_carrier(8, 8), "", None, &EncodeOptions::default());
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn test_invalid_depth_rejected() {
    let image = test_carrier(8, 8);
    assert!(matches!(
        encode(&image, "x", None, &EncodeOptions::new(9, false)),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        decode(&image, None, &DecodeOptions::new(0)),
        Err(Error::InvalidInput(_))
    ));
}
