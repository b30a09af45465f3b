//! Routing a pressed text range back to a highlight identity.
//!
//! Hosts report the character range under a tap, which may be off by one at
//! either end depending on how the platform snaps the touch to glyphs. A
//! highlight matches when its range, widened by `slop` characters on both
//! sides, contains the pressed range.

use crate::error::Result;
use crate::merge::MergedHighlight;
use crate::span::{SpanId, check_range};

/// Find the first merged highlight whose widened range contains
/// `start..end`.
///
/// `merged` is expected in merge order, so the leftmost match wins.
///
/// # Examples
///
/// ```
/// use spanweave::{Highlight, merge_highlights, resolve_press};
///
/// let merged = merge_highlights(&[Highlight::new("note", 4, 9)]).unwrap();
/// let hit = resolve_press(&merged, 3, 10, 1).unwrap();
/// assert_eq!(hit.map(|id| id.as_str()), Some("note"));
/// assert_eq!(resolve_press(&merged, 0, 2, 1).unwrap(), None);
/// ```
pub fn resolve_press(
    merged: &[MergedHighlight],
    start: usize,
    end: usize,
    slop: usize,
) -> Result<Option<&SpanId>> {
    check_range(start, end)?;
    Ok(merged
        .iter()
        .find(|h| start >= h.start.saturating_sub(slop) && end <= h.end.saturating_add(slop))
        .map(|h| &h.id))
}
