//! Base64 decoding of inline image data.
//!
//! Image text is accepted with or without `=` padding and may be broken
//! over several lines; ASCII whitespace is skipped. The decoded length is a
//! pure function of the number of significant characters.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::{RasterError, RasterResult};

const IMAGE_TEXT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Number of bytes `significant` base64 characters decode to.
///
/// `n / 4 * 3` plus 0, 0, 1 or 2 bytes for a trailing group of 0..=3
/// characters.
#[must_use]
pub const fn decoded_len(significant: usize) -> usize {
    const TAIL: [usize; 4] = [0, 0, 1, 2];
    significant / 4 * 3 + TAIL[significant % 4]
}

/// Strips whitespace and trailing padding.
///
/// A lone character after the last full group carries no whole byte and is
/// dropped once it is known to be in the alphabet.
fn significant(text: &str) -> RasterResult<String> {
    let trimmed = text.trim_end_matches(|c: char| c == '=' || c.is_ascii_whitespace());
    let mut out: String = trimmed.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if out.len() % 4 == 1 {
        if let Some(last) = out.pop() {
            if !(last.is_ascii_alphanumeric() || last == '+' || last == '/') {
                return Err(RasterError::InvalidBase64(base64::DecodeError::InvalidByte(
                    out.len(),
                    u8::try_from(last).unwrap_or(u8::MAX),
                )));
            }
        }
    }
    Ok(out)
}

/// Decodes base64 `text` into raw bytes.
///
/// # Errors
///
/// Returns [`RasterError::InvalidBase64`] for any character outside the
/// alphabet (padding and whitespace excepted).
pub fn decode_base64(text: &str) -> RasterResult<Vec<u8>> {
    let text = significant(text)?;
    IMAGE_TEXT.decode(text).map_err(RasterError::InvalidBase64)
}
