//! Error types for parsing and for the typed access façade.
//!
//! Kept as plain enums/structs with hand-written `Display` impls, matching
//! the rest of this crate's lineage rather than pulling in an error-derive
//! dependency for two small types.
use std::fmt::Display;

use crate::tag::Tag;

/// What went wrong while parsing, and roughly where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset into the source at which the failure was detected.
    pub at: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A structural read would have crossed the end of the source. Only
    /// raised when bounds checking is enabled.
    UnexpectedEof,
    /// A tag id outside 0..=12 appeared where a tag id was expected: the
    /// root, a compound entry, or a list's element kind.
    InvalidTag(u8),
}

impl ParseError {
    pub(crate) fn eof(at: usize) -> Self {
        ParseError {
            kind: ParseErrorKind::UnexpectedEof,
            at,
        }
    }

    pub(crate) fn invalid_tag(tag: u8, at: usize) -> Self {
        ParseError {
            kind: ParseErrorKind::InvalidTag(tag),
            at,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ParseErrorKind::UnexpectedEof => {
                write!(f, "unexpected end of input at byte {}", self.at)
            }
            ParseErrorKind::InvalidTag(tag) => {
                write!(f, "invalid nbt tag id {} at byte {}", tag, self.at)
            }
        }
    }
}

impl std::error::Error for ParseError {}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Raised by the typed façade when the dynamic tag kind at an access site
/// does not match what the caller asked for. Independent of [`ParseError`]:
/// it is only ever raised after a document has already been parsed
/// successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeError {
    pub is: Tag,
    pub expected: Tag,
}

impl Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "expected tag {:?}, found {:?}", self.expected, self.is)
    }
}

impl std::error::Error for TypeError {}
