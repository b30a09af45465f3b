//! Input span types: highlights and emphases.
//!
//! Offsets are character offsets (Unicode scalar values) into the annotated
//! string, half-open `[start, end)`.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::style::EmphasisStyle;
use std::fmt;
use std::ops::Range;

/// Caller-supplied identity of a highlight or emphasis.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpanId(String);

impl SpanId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SpanId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SpanId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn check_range(start: usize, end: usize) -> Result<()> {
    if start > end {
        return Err(Error::InvalidRange { start, end });
    }
    Ok(())
}

/// One interactive highlighted range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Highlight {
    pub id: SpanId,
    pub start: usize,
    pub end: usize,
    /// Background color; `None` falls back to the configured default.
    pub color: Option<Rgba>,
}

impl Highlight {
    #[must_use]
    pub fn new(id: impl Into<SpanId>, start: usize, end: usize) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            color: None,
        }
    }

    /// Set the highlight color (builder pattern).
    #[must_use]
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Fails with [`Error::InvalidRange`] if `start > end`.
    pub fn validate(&self) -> Result<()> {
        check_range(self.start, self.end)
    }
}

/// One typographic override range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Emphasis {
    pub id: Option<SpanId>,
    pub start: usize,
    pub end: usize,
    pub style: EmphasisStyle,
}

impl Emphasis {
    #[must_use]
    pub fn new(start: usize, end: usize, style: EmphasisStyle) -> Self {
        Self {
            id: None,
            start,
            end,
            style,
        }
    }

    /// Attach an identity (builder pattern).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<SpanId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fails with [`Error::InvalidRange`] if `start > end`.
    pub fn validate(&self) -> Result<()> {
        check_range(self.start, self.end)
    }
}
