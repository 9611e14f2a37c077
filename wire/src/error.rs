//! Error types for record encoding and mutation.

use std::fmt;

use crate::kind::ObjectKind;
use crate::role::Role;

/// Result type for record encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Variable section of a record, used to name overflowing counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Objects,
    Macros,
    LanguageCodes,
    Points,
    ListItems,
    Value,
    RawData,
    Commands,
}

/// Errors that can occur while serializing a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A counter does not fit its wire field.
    CountOverflow {
        kind: ObjectKind,
        section: Section,
        count: usize,
        max: usize,
    },
    /// A command's string payload does not fit its length field.
    CommandTooLong { function: u8, length: usize },
}

/// A mutation a record kind does not support.
///
/// The record is left unchanged when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsupported {
    Children,
    Macros,
    Points,
    Commands,
    LanguageCodes,
    ImageData,
    Role(Role),
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Objects => "objects",
            Self::Macros => "macros",
            Self::LanguageCodes => "language codes",
            Self::Points => "points",
            Self::ListItems => "list items",
            Self::Value => "value",
            Self::RawData => "raw data",
            Self::Commands => "commands",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountOverflow {
                kind,
                section,
                count,
                max,
            } => {
                write!(f, "{kind} {section} count overflow: {count} > {max}")
            }
            Self::CommandTooLong { function, length } => {
                write!(f, "command {function} payload too long: {length} bytes")
            }
        }
    }
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Children => write!(f, "contained objects"),
            Self::Macros => write!(f, "macros"),
            Self::Points => write!(f, "points"),
            Self::Commands => write!(f, "commands"),
            Self::LanguageCodes => write!(f, "language codes"),
            Self::ImageData => write!(f, "image data"),
            Self::Role(role) => write!(f, "role {role}"),
        }
    }
}

impl std::error::Error for EncodeError {}
