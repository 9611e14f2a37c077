//! Error types for raster operations.

use std::fmt;

/// Result type for raster operations.
pub type RasterResult<T> = Result<T, RasterError>;

/// Errors that can occur while decoding or packing image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Image text is not valid base64. Offsets count from the start of the
    /// whitespace-stripped text.
    InvalidBase64(base64::DecodeError),

    /// Decoded pixel count does not match the declared image size.
    SizeMismatch {
        /// `width * height` as declared on the image.
        expected: usize,
        /// Number of bytes the base64 text decodes to.
        actual: usize,
    },

    /// A pixel value does not fit the packer's bit width.
    ValueOutOfRange {
        /// The value that was out of range.
        value: u8,
        /// Number of bits per pixel.
        bits: usize,
    },

    /// A row was given more pixels than the declared width.
    RowOverflow {
        /// Declared row width in pixels.
        width: usize,
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBase64(err) => write!(f, "invalid base64 image data: {err}"),
            Self::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "image data length mismatch: expected {expected} pixels, decoded {actual}"
                )
            }
            Self::ValueOutOfRange { value, bits } => {
                write!(f, "pixel value {value} cannot be represented in {bits} bits")
            }
            Self::RowOverflow { width } => {
                write!(f, "row already holds {width} pixels")
            }
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBase64(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_base64() {
        let err = RasterError::InvalidBase64(base64::DecodeError::InvalidByte(12, b'*'));
        let msg = err.to_string();
        assert!(msg.contains("base64"));
        assert!(msg.contains("12"), "should mention the offset");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn error_display_size_mismatch() {
        let err = RasterError::SizeMismatch {
            expected: 8,
            actual: 6,
        };
        let msg = err.to_string();
        assert!(msg.contains('8'));
        assert!(msg.contains('6'));
        assert!(msg.contains("mismatch"));
    }

    #[test]
    fn error_display_value_out_of_range() {
        let err = RasterError::ValueOutOfRange { value: 16, bits: 4 };
        let msg = err.to_string();
        assert!(msg.contains("16"));
        assert!(msg.contains("4 bits"));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<RasterError>();
    }
}
