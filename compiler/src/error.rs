//! Error and diagnostic types for pool compilation.

use std::fmt;

use raster::RasterError;
use wire::{EncodeError, ObjectKind, Unsupported};

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that stop a compilation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Malformed XML or a read failure in the input.
    Xml { position: u64, message: String },

    /// More objects are open at once than the limits allow.
    DepthExceeded { limit: usize },

    /// Captured image text exceeds the configured limit.
    ImageDataTooLarge { limit: usize },

    /// A finished record could not be serialized.
    Encode(EncodeError),

    /// A diagnostic was raised while running in strict mode.
    Rejected(Diagnostic),
}

/// A reportable condition tied to the element that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub element: String,
    pub issue: Issue,
}

/// Conditions that degrade the output but do not stop a best-effort run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// An enumerated attribute holds neither a known name nor a number.
    UnknownValue { attribute: String, value: String },

    /// A numeric attribute does not fit its field.
    ValueOutOfRange { attribute: String, value: i64 },

    /// A `role` attribute names neither a role nor an event.
    UnknownRole { value: String },

    /// The open object cannot take what the element adds.
    Unsupported {
        parent: ObjectKind,
        what: Unsupported,
    },

    /// The element needs an open object and there is none.
    NoOpenObject,

    /// An object was opened before `objectpool`; the identity transform is
    /// used.
    TransformNotSet,

    /// A geometry attribute of `objectpool` is zero or missing.
    ZeroGeometry { attribute: &'static str },

    /// A character outside Latin-1 was replaced by `?`.
    UnmappableCharacter { attribute: String, character: char },

    /// Decoded image data does not match the declared image size.
    PictureSizeMismatch { expected: usize, actual: usize },

    /// Image data could not be decoded or packed.
    InvalidImageData(RasterError),

    /// The element is not part of the pool vocabulary.
    UnknownElement,
}

impl Diagnostic {
    #[must_use]
    pub fn new(element: impl Into<String>, issue: Issue) -> Self {
        Self {
            element: element.into(),
            issue,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml { position, message } => {
                write!(f, "xml error at byte {position}: {message}")
            }
            Self::DepthExceeded { limit } => {
                write!(f, "object nesting exceeds limit of {limit}")
            }
            Self::ImageDataTooLarge { limit } => {
                write!(f, "image data exceeds limit of {limit} bytes")
            }
            Self::Encode(e) => write!(f, "encode error: {e}"),
            Self::Rejected(d) => write!(f, "rejected: {d}"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>: {}", self.element, self.issue)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownValue { attribute, value } => {
                write!(f, "unknown value {value:?} for attribute {attribute}")
            }
            Self::ValueOutOfRange { attribute, value } => {
                write!(f, "value {value} out of range for attribute {attribute}")
            }
            Self::UnknownRole { value } => write!(f, "unknown role {value:?}"),
            Self::Unsupported { parent, what } => {
                write!(f, "{parent} cannot contain {what}")
            }
            Self::NoOpenObject => write!(f, "no open object"),
            Self::TransformNotSet => {
                write!(f, "object opened before objectpool, geometry not scaled")
            }
            Self::ZeroGeometry { attribute } => {
                write!(f, "objectpool {attribute} is zero, using target size")
            }
            Self::UnmappableCharacter {
                attribute,
                character,
            } => {
                write!(
                    f,
                    "character {character:?} in {attribute} is not latin-1, replaced by '?'"
                )
            }
            Self::PictureSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "image data length mismatch: expected {expected} pixels, got {actual}"
                )
            }
            Self::InvalidImageData(e) => write!(f, "invalid image data: {e}"),
            Self::UnknownElement => write!(f, "unknown element"),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EncodeError> for CompileError {
    fn from(err: EncodeError) -> Self {
        Self::Encode(err)
    }
}
