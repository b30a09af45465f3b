//! `spanweave` - styled text runs from overlapping highlight and emphasis spans
//!
//! Takes a plain string plus two independent, possibly overlapping sets of
//! spans, interactive [`Highlight`]s (identity + color) and typographic
//! [`Emphasis`]es, and produces the minimal ordered partition of the string
//! into [`TextRun`]s, each carrying the merged styling that applies to it.
//!
//! The pipeline has three pure stages:
//!
//! 1. [`merge_highlights`] collapses overlapping highlights into disjoint
//!    groups (touching highlights stay separate by default).
//! 2. [`compose`] composites emphases over the merged highlights into
//!    disjoint [`StyledSegment`]s. Later emphases win where they collide.
//! 3. [`partition`] slices the string into runs, filling unstyled gaps.
//!
//! [`Annotator`] runs all three and memoizes the first two by input value.
//!
//! # Examples
//!
//! ```
//! use spanweave::{Annotator, Emphasis, EmphasisStyle, Highlight};
//!
//! let runs = Annotator::new()
//!     .annotate(
//!         "0123456789",
//!         &[Highlight::new("h", 2, 6)],
//!         &[Emphasis::new(4, 8, EmphasisStyle::bold())],
//!     )
//!     .unwrap();
//!
//! let rebuilt: String = runs.iter().map(|r| r.text).collect();
//! assert_eq!(rebuilt, "0123456789");
//! assert_eq!(runs.len(), 5);
//! ```

// Crate-level lint configuration
#![allow(clippy::module_name_repetitions)] // Allow StyledSegment in segment etc
#![allow(clippy::missing_errors_doc)] // Error variants are documented on `Error`
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::must_use_candidate)] // Not every accessor needs #[must_use]
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening

pub mod annotate;
pub mod cache;
pub mod color;
pub mod compose;
pub mod config;
pub mod error;
pub mod event;
pub mod merge;
pub mod partition;
pub mod press;
pub mod segment;
pub mod span;
pub mod style;

// Re-export core types at crate root
pub use annotate::Annotator;
pub use cache::{CacheStats, ResultCache};
pub use color::Rgba;
pub use config::{AnnotateOptions, TouchPolicy};
pub use error::{Error, Result};
pub use event::{LogLevel, clear_log_callback, emit_log, set_log_callback};
pub use segment::{StyledSegment, TextRun};
pub use span::{Emphasis, Highlight, SpanId};
pub use style::{EmphasisStyle, StylePolicy, TextAttributes};

// Re-export pipeline stages
pub use compose::{compose, compose_merged, compose_with};
pub use merge::{MergedHighlight, merge_highlights, merge_highlights_with};
pub use partition::{partition, partition_highlights};
pub use press::resolve_press;
