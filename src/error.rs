use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::error::SyntaxError::*;

pub type Result<T> = std::result::Result<T, XmlError>;

/// Row and column (both 1-based) of the input position that caused a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPos {
    pub row: usize,
    pub col: usize,
}

impl Display for ErrorPos {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// A piece of the input captured for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRange {
    pub pos: ErrorPos,
    pub text: String,
}

/// Why a document is not well-formed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("end tag `{}` at {} does not match start tag `{}` at {}", .end_tag.text, .end_tag.pos, .start_tag.text, .start_tag.pos)]
    NonMatchingTags { start_tag: ErrorRange, end_tag: ErrorRange },

    #[error("unexpected `{}` at {}", .range.text, .range.pos)]
    UnexpectedXmlToken { range: ErrorRange },

    #[error("illegal token `{}` at {}{}", .range.text, .range.pos, expected_suffix(.expected))]
    IllegalToken { range: ErrorRange, expected: Option<String> },

    #[error("unknown reference `{}` at {}", .range.text, .range.pos)]
    UnknownReference { range: ErrorRange },

    #[error("duplicate attribute `{}` at {}", .range.text, .range.pos)]
    DuplicateAttribute { range: ErrorRange },

    #[error("unexpected end of file")]
    UnexpectedEndOfFile,

    #[error("document has no root element")]
    MissingRootElement,
}

fn expected_suffix(expected: &Option<String>) -> String {
    match expected {
        Some(expected) => format!(", expected `{}`", expected),
        None => String::new(),
    }
}

impl SyntaxError {
    /// The piece of input the error points at. Empty when the input simply ran out.
    pub fn target(&self) -> &str {
        match self {
            NonMatchingTags { end_tag, .. } => &end_tag.text,
            UnexpectedXmlToken { range } |
            IllegalToken { range, .. } |
            UnknownReference { range } |
            DuplicateAttribute { range } => &range.text,
            UnexpectedEndOfFile | MissingRootElement => "",
        }
    }

    /// Position of the error, if it points into the input.
    pub fn pos(&self) -> Option<ErrorPos> {
        match self {
            NonMatchingTags { end_tag, .. } => Some(end_tag.pos),
            UnexpectedXmlToken { range } |
            IllegalToken { range, .. } |
            UnknownReference { range } |
            DuplicateAttribute { range } => Some(range.pos),
            UnexpectedEndOfFile | MissingRootElement => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed document: {0}")]
    MalformedDocument(#[from] SyntaxError),

    /// Children were added to a node that cannot have any.
    #[error("comment nodes cannot have children")]
    InvalidParent,

    /// Text or attributes were set on a node that cannot carry them.
    #[error("operation is not supported on comment nodes")]
    InvalidTarget,

    #[error("`{name}` is not a valid XML name")]
    InvalidName { name: String },

    #[error("{c:?} is not allowed in XML content")]
    InvalidCharacter { c: char },

    /// Comment text that contains `--` or ends in `-`.
    #[error("`{text}` cannot be written as a comment")]
    InvalidComment { text: String },

    #[error("index {index} is out of range for {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl XmlError {
    /// The syntax error behind a `MalformedDocument`, if that is what this is.
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match self {
            XmlError::MalformedDocument(err) => Some(err),
            _ => None,
        }
    }
}
