//! LZW compressor.

use crate::config::lzw_params;
use std::collections::HashMap;

/// Compress bytes into dictionary codes.
///
/// Dictionary entries are keyed by `(prefix code, next byte)`; the
/// dictionary lives only for the duration of the call.
///
/// # Example
///
/// ```
/// use lsb_stego::encoding::{compress, decompress};
///
/// let codes = compress(b"TOBEORNOTTOBEORTOBEORNOT");
/// assert!(codes.len() < 24);
/// assert_eq!(decompress(&codes).unwrap(), b"TOBEORNOTTOBEORTOBEORNOT");
/// ```
pub fn compress(data: &[u8]) -> Vec<u16> {
    let mut codes = Vec::new();
    let mut bytes = data.iter();

    let Some(&first) = bytes.next() else {
        return codes;
    };

    let mut dictionary: HashMap<(u16, u8), u16> = HashMap::new();
    let mut next_code = lzw_params::SEED_ENTRIES;
    let mut w = u16::from(first);

    for &c in bytes {
        match dictionary.get(&(w, c)) {
            Some(&code) => w = code,
            None => {
                codes.push(w);
                if next_code < lzw_params::MAX_ENTRIES {
                    dictionary.insert((w, c), next_code as u16);
                    next_code += 1;
                }
                w = u16::from(c);
            }
        }
    }

    codes.push(w);
    codes
}

/// Compress bytes and serialize the codes as 16-bit big-endian values.
pub fn compress_bytes(data: &[u8]) -> Vec<u8> {
    compress(data)
        .into_iter()
        .flat_map(u16::to_be_bytes)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_empty() {
        assert!(compress(b"").is_empty());
        assert!(compress_bytes(b"").is_empty());
    }

    #[test]
    fn test_compress_single_byte() {
        assert_eq!(compress(b"x"), vec![u16::from(b'x')]);
    }

    #[test]
    fn test_compress_known_sequence() {
        // "ABABABA": A, B, AB(256), ABA(258)
        assert_eq!(compress(b"ABABABA"), vec![65, 66, 256, 258]);
    }

    #[test]
    fn test_repetitive_input_shrinks() {
        let data = vec![b'a'; 10_000];
        let packed = compress_bytes(&data);
        assert!(packed.len() < data.len() / 10);
    }

    #[test]
    fn test_code_width() {
        let packed = compress_bytes(b"hello");
        assert_eq!(packed.len(), 5 * lzw_params::CODE_BYTES);
        assert_eq!(&packed[..2], &[0x00, b'h']);
    }
}
