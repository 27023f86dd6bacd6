//! Base64 helpers for encoding cookie values.
//!
//! [`encode`]/[`decode`] work on the UTF-8 bytes of the value and are what the cookie API uses
//! when encoding is requested. [`encode_utf16`]/[`decode_utf16`] expand the value to one byte
//! per UTF-16 code unit first, which is the form produced by pages that run `btoa` over a
//! "binary string".

use base64::{
    Engine as _,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

use crate::error::{Error, Result};

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode a value as padded standard base64 over its UTF-8 bytes.
pub fn encode(value: &str) -> String {
    STANDARD_LENIENT.encode(value.as_bytes())
}

/// Decode a base64 value produced by [`encode`]. Padding is optional.
pub fn decode(value: &str) -> Result<String> {
    let bytes = STANDARD_LENIENT.decode(value.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

/// Encode a value as base64 over its UTF-16 code units in little-endian order.
pub fn encode_utf16(value: &str) -> String {
    let bytes: Vec<u8> = value.encode_utf16().flat_map(u16::to_le_bytes).collect();
    STANDARD_LENIENT.encode(bytes)
}

/// Decode a base64 value produced by [`encode_utf16`].
pub fn decode_utf16(value: &str) -> Result<String> {
    let bytes = STANDARD_LENIENT.decode(value.as_bytes())?;
    if bytes.len() % 2 != 0 {
        return Err(Error::OddUtf16Length(bytes.len()));
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    Ok(String::from_utf16(&units)?)
}
