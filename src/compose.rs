//! Compositing emphasis spans over merged highlights.
//!
//! The output is a sorted list of disjoint [`StyledSegment`]s covering exactly
//! the characters touched by at least one highlight or emphasis. Gaps between
//! them are left for the partitioner to fill.
//!
//! Every highlight and emphasis endpoint is a boundary. Each elementary range
//! between two adjacent boundaries takes the merged highlight covering its
//! start (there is at most one) and the *last* emphasis, in input order,
//! covering its start. Emphasis order is therefore a priority order with the
//! highest priority last: where two emphases collide, the later one's style
//! replaces the earlier one's for the shared range. Adjacent elementary ranges
//! that come from the same highlight and the same emphasis are joined back
//! together, so a span that nothing else cuts through comes out whole.
//!
//! Zero-width highlights and emphases cover no characters and produce no
//! segments.

use crate::config::AnnotateOptions;
use crate::error::{Error, Result};
use crate::merge::{MergedHighlight, merge_highlights_with};
use crate::segment::StyledSegment;
use crate::span::{Emphasis, Highlight, check_range};
use crate::style::{EmphasisStyle, StylePolicy};

/// Merge `highlights` and composite `emphases` over them, with default options.
///
/// # Examples
///
/// ```
/// use spanweave::{Emphasis, EmphasisStyle, Highlight, compose};
///
/// let segments = compose(
///     &[Highlight::new("h", 2, 6)],
///     &[Emphasis::new(4, 8, EmphasisStyle::bold())],
/// )
/// .unwrap();
/// let ranges: Vec<_> = segments.iter().map(|s| (s.start, s.end, s.is_highlight)).collect();
/// assert_eq!(ranges, [(2, 4, true), (4, 6, true), (6, 8, false)]);
/// ```
pub fn compose(highlights: &[Highlight], emphases: &[Emphasis]) -> Result<Vec<StyledSegment>> {
    compose_with(highlights, emphases, &AnnotateOptions::default())
}

/// Merge `highlights` under `options` and composite `emphases` over them.
pub fn compose_with(
    highlights: &[Highlight],
    emphases: &[Emphasis],
    options: &AnnotateOptions,
) -> Result<Vec<StyledSegment>> {
    let merged = merge_highlights_with(highlights, options)?;
    compose_merged(&merged, emphases, options.style_policy)
}

/// Composite `emphases` over already merged highlights.
///
/// `merged` must be sorted and pairwise non-overlapping, as produced by
/// [`merge_highlights_with`]. Anything else fails with
/// [`Error::InvalidRange`] or [`Error::OverlappingSegments`].
pub fn compose_merged(
    merged: &[MergedHighlight],
    emphases: &[Emphasis],
    policy: StylePolicy,
) -> Result<Vec<StyledSegment>> {
    let mut previous_end = 0;
    for highlight in merged {
        check_range(highlight.start, highlight.end)?;
        if highlight.start < previous_end {
            return Err(Error::OverlappingSegments {
                previous_end,
                next_start: highlight.start,
            });
        }
        previous_end = highlight.end;
    }
    for emphasis in emphases {
        emphasis.validate()?;
        emphasis.style.validate(policy)?;
    }

    let mut boundaries: Vec<usize> = Vec::with_capacity(2 * (merged.len() + emphases.len()));
    for highlight in merged.iter().filter(|h| h.start < h.end) {
        boundaries.extend([highlight.start, highlight.end]);
    }
    for emphasis in emphases.iter().filter(|e| !e.is_empty()) {
        boundaries.extend([emphasis.start, emphasis.end]);
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut segments: Vec<StyledSegment> = Vec::new();
    // Source (highlight index, emphasis index) of the last pushed segment.
    let mut last_source: Option<(Option<usize>, Option<usize>)> = None;
    let mut cursor = 0;

    for pair in boundaries.windows(2) {
        let (b0, b1) = (pair[0], pair[1]);

        // Merged highlights are disjoint and sorted, so their ends never
        // decrease and the cursor only moves forward.
        while cursor < merged.len() && merged[cursor].end <= b0 {
            cursor += 1;
        }
        let highlight = merged
            .get(cursor)
            .filter(|h| h.contains(b0))
            .map(|_| cursor);
        let emphasis = emphases
            .iter()
            .rposition(|e| e.start <= b0 && b0 < e.end);

        if highlight.is_none() && emphasis.is_none() {
            continue;
        }

        let source = (highlight, emphasis);
        if let Some(last) = segments.last_mut() {
            if last.end == b0 && last_source == Some(source) {
                last.end = b1;
                continue;
            }
        }

        let mut segment = match highlight {
            Some(idx) => {
                let h = &merged[idx];
                StyledSegment::highlight(b0, b1, h.id.clone(), h.color)
            }
            None => StyledSegment::emphasis(b0, b1, EmphasisStyle::default()),
        };
        if let Some(idx) = emphasis {
            segment.emphasis_style = emphases[idx].style.clone();
        }
        segments.push(segment);
        last_source = Some(source);
    }

    Ok(segments)
}
