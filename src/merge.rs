//! Highlight interval merging.
//!
//! Collapses overlapping highlights into the minimal set of non-overlapping
//! groups. Within a group the identity and color of the last interval merged
//! in (along `(start, end)` order, input order for equal ranges) win.

use crate::color::Rgba;
use crate::config::{AnnotateOptions, TouchPolicy};
use crate::error::Result;
use crate::span::{Highlight, SpanId};
use std::ops::Range;

/// A group of one or more overlapping highlights.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MergedHighlight {
    pub start: usize,
    pub end: usize,
    pub id: SpanId,
    pub color: Rgba,
}

impl MergedHighlight {
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check if this group covers a character position.
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Symmetric half-open overlap test against `start..end`.
    ///
    /// True when an endpoint of either range lies inside the other. For a
    /// non-empty range this reduces to the usual `a.start < b.end &&
    /// b.start < a.end`; an empty range at an endpoint of `self` counts as
    /// overlapping.
    #[must_use]
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        (start <= self.start && self.start < end)
            || (start < self.end && self.end <= end)
            || (self.start <= start && start < self.end)
            || (self.start < end && end <= self.end)
    }
}

/// Merge highlights with the default options.
///
/// Touching highlights (`a.end == b.start`) stay separate; highlights without
/// a color get yellow.
///
/// # Examples
///
/// ```
/// use spanweave::{Highlight, merge_highlights};
///
/// let merged = merge_highlights(&[Highlight::new("a", 0, 5), Highlight::new("b", 3, 8)]).unwrap();
/// assert_eq!(merged.len(), 1);
/// assert_eq!((merged[0].start, merged[0].end, merged[0].id.as_str()), (0, 8, "b"));
/// ```
pub fn merge_highlights(highlights: &[Highlight]) -> Result<Vec<MergedHighlight>> {
    merge_highlights_with(highlights, &AnnotateOptions::default())
}

/// Merge highlights using `options.touch_policy` and
/// `options.default_highlight_color`.
///
/// Fails with [`Error::InvalidRange`](crate::Error::InvalidRange) on the first
/// highlight with `start > end`, before any merging happens.
pub fn merge_highlights_with(
    highlights: &[Highlight],
    options: &AnnotateOptions,
) -> Result<Vec<MergedHighlight>> {
    for highlight in highlights {
        highlight.validate()?;
    }

    let mut sorted: Vec<&Highlight> = highlights.iter().collect();
    // Stable: equal ranges keep input order, so the later one wins.
    sorted.sort_by_key(|h| (h.start, h.end));

    let color_of = |h: &Highlight| h.color.unwrap_or(options.default_highlight_color);
    let mut merged: Vec<MergedHighlight> = Vec::with_capacity(sorted.len());
    for next in sorted {
        match merged.last_mut() {
            Some(last) if joins(last.end, next.start, options.touch_policy) => {
                last.end = last.end.max(next.end);
                last.id = next.id.clone();
                last.color = color_of(next);
            }
            _ => merged.push(MergedHighlight {
                start: next.start,
                end: next.end,
                id: next.id.clone(),
                color: color_of(next),
            }),
        }
    }
    Ok(merged)
}

fn joins(last_end: usize, next_start: usize, policy: TouchPolicy) -> bool {
    match policy {
        TouchPolicy::Separate => next_start < last_end,
        TouchPolicy::Merge => next_start <= last_end,
    }
}
