//! Error types for span annotation.

use std::fmt;

/// Result type alias for annotation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for annotation operations.
///
/// Every variant is a contract violation on caller input. Nothing is clamped
/// or dropped silently; the caller decides how to recover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A span with `start > end`.
    InvalidRange { start: usize, end: usize },
    /// A segment whose bounds exceed the source text length (in characters).
    RangeOutOfBounds { start: usize, end: usize, len: usize },
    /// Segments handed to the partitioner, or merged highlights handed to the
    /// compositor, are unsorted or overlap.
    OverlappingSegments {
        previous_end: usize,
        next_start: usize,
    },
    /// Style attribute rejected by a strict style policy.
    UnsupportedStyleAttribute(String),
    /// Invalid color format (malformed hex string or unknown name).
    InvalidColor(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(f, "invalid range {start}..{end}: start > end")
            }
            Self::RangeOutOfBounds { start, end, len } => {
                write!(f, "range {start}..{end} out of bounds for text of length {len}")
            }
            Self::OverlappingSegments {
                previous_end,
                next_start,
            } => write!(
                f,
                "range starting at {next_start} overlaps previous range ending at {previous_end}"
            ),
            Self::UnsupportedStyleAttribute(name) => {
                write!(f, "unsupported style attribute: {name}")
            }
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
        }
    }
}

impl std::error::Error for Error {}
