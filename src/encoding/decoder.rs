//! LZW decompressor.

use crate::config::lzw_params;
use crate::error::{Error, Result};

/// Rebuild the original bytes from dictionary codes.
///
/// Mirrors the compressor's dictionary growth, including the ceiling. A
/// code equal to the next unassigned entry is the `w + w[0]` case.
pub fn decompress(codes: &[u16]) -> Result<Vec<u8>> {
    let mut codes = codes.iter();

    let Some(&first) = codes.next() else {
        return Ok(Vec::new());
    };

    if usize::from(first) >= lzw_params::SEED_ENTRIES {
        return Err(Error::Compression(format!(
            "stream starts with non-literal code {}",
            first
        )));
    }

    let mut dictionary: Vec<Vec<u8>> = (0..=u8::MAX).map(|b| vec![b]).collect();
    let mut w = vec![first as u8];
    let mut output = w.clone();

    for &code in codes {
        let code = usize::from(code);
        let entry = if code < dictionary.len() {
            dictionary[code].clone()
        } else if code == dictionary.len() && dictionary.len() < lzw_params::MAX_ENTRIES {
            let mut entry = w.clone();
            entry.push(w[0]);
            entry
        } else {
            return Err(Error::Compression(format!(
                "code {} out of range (dictionary has {} entries)",
                code,
                dictionary.len()
            )));
        };

        output.extend_from_slice(&entry);

        if dictionary.len() < lzw_params::MAX_ENTRIES {
            let mut added = std::mem::take(&mut w);
            added.push(entry[0]);
            dictionary.push(added);
        }
        w = entry;
    }

    Ok(output)
}

/// Decompress a stream of 16-bit big-endian codes.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() % lzw_params::CODE_BYTES != 0 {
        return Err(Error::Compression(format!(
            "stream length {} is not a multiple of the code width",
            data.len()
        )));
    }

    let codes: Vec<u16> = data
        .chunks_exact(lzw_params::CODE_BYTES)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();

    decompress(&codes)
}
