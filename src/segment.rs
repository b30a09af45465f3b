//! Styled segments and the text runs cut from them.

use crate::color::Rgba;
use crate::span::SpanId;
use crate::style::EmphasisStyle;
use std::ops::Range;

/// A disjoint character range with the combined highlight/emphasis styling
/// that applies to it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StyledSegment {
    pub start: usize,
    pub end: usize,
    pub is_highlight: bool,
    /// Set exactly when `is_highlight` is.
    pub highlight_color: Option<Rgba>,
    /// Set exactly when `is_highlight` is.
    pub highlight_id: Option<SpanId>,
    pub emphasis_style: EmphasisStyle,
}

impl StyledSegment {
    /// Create a segment carrying only an emphasis style.
    #[must_use]
    pub fn emphasis(start: usize, end: usize, style: EmphasisStyle) -> Self {
        Self {
            start,
            end,
            is_highlight: false,
            highlight_color: None,
            highlight_id: None,
            emphasis_style: style,
        }
    }

    /// Create a highlighted segment with no emphasis.
    #[must_use]
    pub fn highlight(start: usize, end: usize, id: SpanId, color: Rgba) -> Self {
        Self {
            start,
            end,
            is_highlight: true,
            highlight_color: Some(color),
            highlight_id: Some(id),
            emphasis_style: EmphasisStyle::default(),
        }
    }

    /// Replace the emphasis style (builder pattern).
    #[must_use]
    pub fn with_emphasis(mut self, style: EmphasisStyle) -> Self {
        self.emphasis_style = style;
        self
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check if this segment overlaps with another.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if this segment contains a position.
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        self.range().contains(&pos)
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// The final renderable unit: a non-empty slice of the source text plus the
/// styling to draw it with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    /// Character range of `text` within the source string.
    pub range: Range<usize>,
    pub is_highlight: bool,
    pub highlight_color: Option<Rgba>,
    pub highlight_id: Option<SpanId>,
    pub style: EmphasisStyle,
}

impl<'a> TextRun<'a> {
    /// Create an unstyled run.
    #[must_use]
    pub fn plain(text: &'a str, range: Range<usize>) -> Self {
        Self {
            text,
            range,
            is_highlight: false,
            highlight_color: None,
            highlight_id: None,
            style: EmphasisStyle::default(),
        }
    }

    /// Create a run styled like `segment`.
    #[must_use]
    pub fn styled(text: &'a str, segment: &StyledSegment) -> Self {
        Self {
            text,
            range: segment.range(),
            is_highlight: segment.is_highlight,
            highlight_color: segment.highlight_color,
            highlight_id: segment.highlight_id.clone(),
            style: segment.emphasis_style.clone(),
        }
    }

    /// Check if the run carries no highlight and no emphasis.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        !self.is_highlight && self.style.is_empty()
    }
}
