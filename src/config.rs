//! Pipeline configuration.

use crate::color::Rgba;
use crate::style::StylePolicy;

/// Whether two highlights that touch (`a.end == b.start`) are merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TouchPolicy {
    /// Touching highlights stay separate groups; only a strict overlap
    /// (`b.start < a.end`) merges.
    #[default]
    Separate,
    /// Touching highlights fuse into one group.
    Merge,
}

/// Options for the annotation pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotateOptions {
    /// Merge rule for touching highlights.
    pub touch_policy: TouchPolicy,
    /// Color given to merged highlights whose winning interval has none.
    pub default_highlight_color: Rgba,
    /// Treatment of style attributes outside the recognized set.
    pub style_policy: StylePolicy,
    /// Characters of tolerance on each side when resolving a press.
    pub press_slop: usize,
    /// Maximum memoized results per function. Zero disables caching.
    pub cache_capacity: usize,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            touch_policy: TouchPolicy::Separate,
            default_highlight_color: Rgba::YELLOW,
            style_policy: StylePolicy::Passthrough,
            press_slop: 1,
            cache_capacity: 64,
        }
    }
}

impl AnnotateOptions {
    #[must_use]
    pub fn with_touch_policy(mut self, policy: TouchPolicy) -> Self {
        self.touch_policy = policy;
        self
    }

    #[must_use]
    pub fn with_default_highlight_color(mut self, color: Rgba) -> Self {
        self.default_highlight_color = color;
        self
    }

    #[must_use]
    pub fn with_style_policy(mut self, policy: StylePolicy) -> Self {
        self.style_policy = policy;
        self
    }

    #[must_use]
    pub fn with_press_slop(mut self, slop: usize) -> Self {
        self.press_slop = slop;
        self
    }

    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}
