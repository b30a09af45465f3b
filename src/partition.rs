//! Slicing the source string into text runs.
//!
//! Offsets in segments are character offsets; runs borrow byte slices of the
//! source. Concatenating the returned runs in order always reproduces the
//! source exactly.

use crate::error::{Error, Result};
use crate::merge::MergedHighlight;
use crate::segment::{StyledSegment, TextRun};
use crate::span::check_range;

/// Character-to-byte offset table for one string.
struct CharOffsets<'a> {
    text: &'a str,
    /// Byte offset of every character, plus `text.len()`. Empty for ASCII.
    table: Vec<usize>,
}

impl<'a> CharOffsets<'a> {
    fn new(text: &'a str) -> Self {
        let table = if text.is_ascii() {
            Vec::new()
        } else {
            text.char_indices()
                .map(|(byte, _)| byte)
                .chain(std::iter::once(text.len()))
                .collect()
        };
        Self { text, table }
    }

    fn char_len(&self) -> usize {
        if self.table.is_empty() {
            self.text.len()
        } else {
            self.table.len() - 1
        }
    }

    fn byte(&self, pos: usize) -> usize {
        if self.table.is_empty() { pos } else { self.table[pos] }
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.byte(start)..self.byte(end)]
    }
}

/// Partition `text` into ordered runs using sorted, disjoint `segments`.
///
/// Gaps before, between, and after segments become plain runs. Empty runs
/// are dropped, so `""` yields no runs at all.
///
/// Fails with [`Error::RangeOutOfBounds`] if a segment reaches past the end
/// of `text`, [`Error::InvalidRange`] on an inverted segment, and
/// [`Error::OverlappingSegments`] if segments are unsorted or overlap.
///
/// # Examples
///
/// ```
/// use spanweave::{EmphasisStyle, StyledSegment, partition};
///
/// let segments = [StyledSegment::emphasis(6, 11, EmphasisStyle::bold())];
/// let runs = partition("hello world", &segments).unwrap();
/// let texts: Vec<_> = runs.iter().map(|r| r.text).collect();
/// assert_eq!(texts, ["hello ", "world"]);
/// ```
pub fn partition<'a>(text: &'a str, segments: &[StyledSegment]) -> Result<Vec<TextRun<'a>>> {
    let offsets = CharOffsets::new(text);
    let len = offsets.char_len();

    let mut previous_end = 0;
    for segment in segments {
        check_range(segment.start, segment.end)?;
        if segment.end > len {
            return Err(Error::RangeOutOfBounds {
                start: segment.start,
                end: segment.end,
                len,
            });
        }
        if segment.start < previous_end {
            return Err(Error::OverlappingSegments {
                previous_end,
                next_start: segment.start,
            });
        }
        previous_end = segment.end;
    }

    let mut runs = Vec::with_capacity(2 * segments.len() + 1);
    let push_plain = |runs: &mut Vec<TextRun<'a>>, start: usize, end: usize| {
        if start < end {
            runs.push(TextRun::plain(offsets.slice(start, end), start..end));
        }
    };

    let mut cursor = 0;
    for segment in segments {
        push_plain(&mut runs, cursor, segment.start);
        if !segment.is_empty() {
            runs.push(TextRun::styled(
                offsets.slice(segment.start, segment.end),
                segment,
            ));
        }
        cursor = segment.end;
    }
    push_plain(&mut runs, cursor, len);

    Ok(runs)
}

/// Partition `text` against merged highlights alone, with no emphasis.
pub fn partition_highlights<'a>(
    text: &'a str,
    merged: &[MergedHighlight],
) -> Result<Vec<TextRun<'a>>> {
    let segments: Vec<StyledSegment> = merged
        .iter()
        .map(|h| StyledSegment::highlight(h.start, h.end, h.id.clone(), h.color))
        .collect();
    partition(text, &segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::merge::merge_highlights;
    use crate::span::{Highlight, SpanId};
    use crate::style::EmphasisStyle;

    fn texts<'a>(runs: &[TextRun<'a>]) -> Vec<&'a str> {
        runs.iter().map(|r| r.text).collect()
    }

    #[test]
    fn no_segments_is_one_plain_run() {
        let runs = partition("plain text", &[]).unwrap();
        assert_eq!(runs, [TextRun::plain("plain text", 0..10)]);
    }

    #[test]
    fn empty_text_has_no_runs() {
        assert!(partition("", &[]).unwrap().is_empty());
    }

    #[test]
    fn full_cover_suppresses_empty_runs() {
        let segments = [StyledSegment::emphasis(0, 2, EmphasisStyle::bold())];
        let runs = partition("ab", &segments).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "ab");
        assert_eq!(runs[0].style, EmphasisStyle::bold());
    }

    #[test]
    fn gaps_are_filled() {
        let segments = [
            StyledSegment::highlight(2, 4, SpanId::from("a"), Rgba::YELLOW),
            StyledSegment::emphasis(6, 7, EmphasisStyle::italic()),
        ];
        let runs = partition("0123456789", &segments).unwrap();
        assert_eq!(texts(&runs), ["01", "23", "45", "6", "789"]);
        assert_eq!(
            runs.iter().map(|r| r.is_highlight).collect::<Vec<_>>(),
            [false, true, false, false, false]
        );
        assert_eq!(runs[1].highlight_id, Some(SpanId::from("a")));
        assert_eq!(runs[3].style, EmphasisStyle::italic());
        assert_eq!(runs[4].range, 7..10);
    }

    #[test]
    fn adjacent_segments_have_no_gap_run() {
        let segments = [
            StyledSegment::highlight(0, 2, SpanId::from("a"), Rgba::YELLOW),
            StyledSegment::highlight(2, 4, SpanId::from("b"), Rgba::YELLOW),
        ];
        let runs = partition("abcd", &segments).unwrap();
        assert_eq!(texts(&runs), ["ab", "cd"]);
    }

    #[test]
    fn offsets_are_characters() {
        let text = "héllo wörld";
        let segments = [StyledSegment::emphasis(1, 2, EmphasisStyle::bold())];
        let runs = partition(text, &segments).unwrap();
        assert_eq!(texts(&runs), ["h", "é", "llo wörld"]);
        assert_eq!(runs.iter().map(|r| r.text).collect::<String>(), text);

        let err = partition(text, &[StyledSegment::emphasis(0, 12, EmphasisStyle::bold())])
            .unwrap_err();
        assert_eq!(
            err,
            Error::RangeOutOfBounds {
                start: 0,
                end: 12,
                len: 11
            }
        );
    }

    #[test]
    fn out_of_bounds_segment() {
        let err = partition("abc", &[StyledSegment::emphasis(1, 4, EmphasisStyle::bold())])
            .unwrap_err();
        assert!(matches!(err, Error::RangeOutOfBounds { len: 3, .. }));
    }

    #[test]
    fn overlapping_segments_are_rejected() {
        let segments = [
            StyledSegment::emphasis(0, 5, EmphasisStyle::bold()),
            StyledSegment::emphasis(3, 6, EmphasisStyle::italic()),
        ];
        let err = partition("abcdefgh", &segments).unwrap_err();
        assert_eq!(
            err,
            Error::OverlappingSegments {
                previous_end: 5,
                next_start: 3
            }
        );
    }

    #[test]
    fn inverted_segment_is_rejected() {
        let mut segment = StyledSegment::emphasis(0, 1, EmphasisStyle::bold());
        segment.start = 2;
        let err = partition("abc", &[segment]).unwrap_err();
        assert_eq!(err, Error::InvalidRange { start: 2, end: 1 });
    }

    #[test]
    fn highlight_only_partition() {
        let merged = merge_highlights(&[
            Highlight::new("a", 0, 3),
            Highlight::new("b", 2, 5),
            Highlight::new("c", 8, 11),
        ])
        .unwrap();
        let runs = partition_highlights("the quick brown", &merged).unwrap();
        assert_eq!(texts(&runs), ["the q", "uic", "k b", "rown"]);
        assert_eq!(
            runs.iter()
                .map(|r| r.highlight_id.as_ref().map(SpanId::as_str))
                .collect::<Vec<_>>(),
            [Some("b"), None, Some("c"), None]
        );
    }
}
