//! The full annotation pipeline.

use crate::cache::{CacheStats, ResultCache};
use crate::config::AnnotateOptions;
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log_with};
use crate::merge::MergedHighlight;
use crate::partition::partition;
use crate::press::resolve_press;
use crate::segment::{StyledSegment, TextRun};
use crate::span::{Emphasis, Highlight, SpanId, check_range};
use std::sync::Arc;

/// Merges, composites, and partitions text against highlight and emphasis
/// spans, memoizing the first two stages by input value.
///
/// An `Annotator` is `Send + Sync`; share one across render threads.
///
/// # Examples
///
/// ```
/// use spanweave::{Annotator, Emphasis, EmphasisStyle, Highlight};
///
/// let annotator = Annotator::new();
/// let runs = annotator
///     .annotate(
///         "Call me Ishmael.",
///         &[Highlight::new("name", 8, 15)],
///         &[Emphasis::new(0, 4, EmphasisStyle::italic())],
///     )
///     .unwrap();
///
/// let texts: Vec<_> = runs.iter().map(|r| r.text).collect();
/// assert_eq!(texts, ["Call", " me ", "Ishmael", "."]);
/// assert_eq!(runs[2].highlight_id.as_ref().map(|id| id.as_str()), Some("name"));
/// ```
#[derive(Debug)]
pub struct Annotator {
    options: AnnotateOptions,
    cache: ResultCache,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotator {
    /// Create an annotator with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(AnnotateOptions::default())
    }

    /// Create an annotator with custom options.
    #[must_use]
    pub fn with_options(options: AnnotateOptions) -> Self {
        let cache = ResultCache::new(options.cache_capacity);
        Self { options, cache }
    }

    #[must_use]
    pub fn options(&self) -> &AnnotateOptions {
        &self.options
    }

    /// Cache counters.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop all memoized results.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Merge overlapping highlights.
    pub fn merge(&self, highlights: &[Highlight]) -> Result<Arc<[MergedHighlight]>> {
        self.cache
            .merge(highlights, &self.options)
            .inspect_err(log_rejection)
    }

    /// Composite emphases over merged highlights into disjoint segments.
    pub fn compose(
        &self,
        highlights: &[Highlight],
        emphases: &[Emphasis],
    ) -> Result<Arc<[StyledSegment]>> {
        self.cache
            .compose(highlights, emphases, &self.options)
            .inspect_err(log_rejection)
    }

    /// Run the full pipeline and return the text runs to render.
    ///
    /// With no highlights and no emphases the whole string comes back as a
    /// single plain run.
    pub fn annotate<'a>(
        &self,
        text: &'a str,
        highlights: &[Highlight],
        emphases: &[Emphasis],
    ) -> Result<Vec<TextRun<'a>>> {
        let segments = self.compose(highlights, emphases)?;
        let runs = partition(text, &segments).inspect_err(log_rejection)?;
        emit_log_with(LogLevel::Debug, || {
            format!(
                "annotated {} highlights, {} emphases into {} segments, {} runs",
                highlights.len(),
                emphases.len(),
                segments.len(),
                runs.len()
            )
        });
        Ok(runs)
    }

    /// Map a pressed character range to the identity of the highlight under
    /// it, using the configured slop.
    pub fn resolve_press(
        &self,
        highlights: &[Highlight],
        start: usize,
        end: usize,
    ) -> Result<Option<SpanId>> {
        check_range(start, end).inspect_err(log_rejection)?;
        if highlights.is_empty() {
            return Ok(None);
        }
        let merged = self.merge(highlights)?;
        let hit = resolve_press(&merged, start, end, self.options.press_slop)?.cloned();
        emit_log_with(LogLevel::Debug, || match &hit {
            Some(id) => format!("press {start}..{end} resolved to highlight {id}"),
            None => format!("press {start}..{end} hit no highlight"),
        });
        Ok(hit)
    }
}

fn log_rejection(err: &Error) {
    emit_log_with(LogLevel::Warn, || format!("rejected span input: {err}"));
}
