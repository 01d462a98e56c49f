//! Conversion of plugin-declared text to UTF-8.
//!
//! AviUtl plugins store their table strings in code page 932 (Shift_JIS as
//! extended by Microsoft). String-table resources are UTF-16. Both decoders
//! stop at the first NUL and refuse malformed input instead of substituting
//! U+FFFD, so corrupted metadata is reported rather than silently rewritten.

use encoding_rs::{DecoderResult, Encoding, SHIFT_JIS};
use thiserror::Error;

/// Code page the host application uses for in-module strings.
pub const LEGACY_ENCODING: &Encoding = SHIFT_JIS;

/// A byte or code-unit sequence that is not valid in its declared encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {encoding} sequence at offset {offset}")]
pub struct EncodingError {
    /// Name of the source encoding.
    pub encoding: &'static str,
    /// Offset of the first bad unit within the (NUL-capped) input.
    pub offset: usize,
}

/// Decode a legacy code page 932 buffer into UTF-8.
pub fn decode_legacy(bytes: &[u8]) -> Result<String, EncodingError> {
    let bytes = until_nul(bytes, 0);

    let mut decoder = LEGACY_ENCODING.new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(bytes.len())
        .unwrap_or(bytes.len() * 3);
    let mut out = String::with_capacity(capacity);
    let mut consumed = 0;

    loop {
        let (result, read) =
            decoder.decode_to_string_without_replacement(&bytes[consumed..], &mut out, true);
        consumed += read;

        match result {
            DecoderResult::InputEmpty => return Ok(out),
            DecoderResult::OutputFull => out.reserve(bytes.len() - consumed + 16),
            DecoderResult::Malformed(bad, pushed_back) => {
                let offset = consumed.saturating_sub(bad as usize + pushed_back as usize);
                return Err(EncodingError { encoding: LEGACY_ENCODING.name(), offset });
            }
        }
    }
}

/// Length of the longest prefix of `bytes` that does not end inside a
/// double-byte code page 932 character.
pub fn legacy_char_boundary(bytes: &[u8]) -> usize {
    let mut i = 0;
    while i < bytes.len() {
        let width = if matches!(bytes[i], 0x81..=0x9F | 0xE0..=0xFC) { 2 } else { 1 };
        if i + width > bytes.len() {
            break;
        }
        i += width;
    }
    i
}

/// Decode a UTF-16 buffer (as returned by `LoadStringW`) into UTF-8.
pub fn decode_wide(units: &[u16]) -> Result<String, EncodingError> {
    let units = until_nul(units, 0);
    let mut out = String::with_capacity(units.len());
    let mut offset = 0;

    for decoded in char::decode_utf16(units.iter().copied()) {
        let c = decoded.map_err(|_| EncodingError { encoding: "UTF-16", offset })?;
        offset += c.len_utf16();
        out.push(c);
    }

    Ok(out)
}

fn until_nul<T: PartialEq + Copy>(buf: &[T], nul: T) -> &[T] {
    match buf.iter().position(|&u| u == nul) {
        Some(end) => &buf[..end],
        None => buf,
    }
}
