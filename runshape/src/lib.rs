// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run-based text shaping and line breaking.
//!
//! Text is split into runs sharing a font, bidi level, script, language and
//! feature set. Each run is shaped by a [`ShapingEngine`], runs are broken
//! into lines no wider than a target width, and each line is reordered for
//! display and delivered to a [`RunHandler`] as a fixed sequence of calls.
//!
//! The properties come from [`iter`] implementations. [`Shaper::shape`]
//! builds a default set from the text: bidi levels from the Unicode
//! bidirectional algorithm, scripts from the Unicode script property, and a
//! font iterator that substitutes fonts through a [`FontSubstitution`] when
//! one is configured. [`Shaper::shape_with_iterators`] accepts any
//! combination of iterators instead.
//!
//! ## Features
//!
//! - `harfrust` (enabled by default): [`HarfrustEngine`], OpenType shaping
//!   with `harfrust`.

extern crate alloc;

mod bidi;
mod error;
mod fallback;
mod feature;
mod font;
mod handler;
mod line_break;
#[cfg(feature = "harfrust")]
mod lru_cache;
mod resolve;
mod segment;
mod shape;
mod shaper;
mod tag;
mod util;

pub mod iter;

#[cfg(test)]
mod tests;

pub use bidi::reorder_visual;
pub use error::{ErrorKind, IteratorKind, ShapeError};
pub use fallback::{FallbackRequest, FontList, FontSubstitution, MatchStatus};
pub use feature::Feature;
pub use font::{FontFile, FontHandle, FontMetrics, FontStyle, ShapingFace, Slant, Typeface};
pub use handler::{Buffer, GlyphLine, GlyphRun, GlyphRunCollector, RunHandler, RunInfo};
pub use segment::{IcuLineBreaker, LineBreaker, NoBreaks};
pub use shape::{Direction, EngineGlyph, Point, PrimitiveEngine, ShapeRequest, ShapingEngine};
pub use shaper::Shaper;
pub use tag::{ParseTagError, Tag};

#[cfg(feature = "harfrust")]
pub use shape::HarfrustEngine;

pub use icu_segmenter::options::LineBreakWordOption;
pub use linebender_resource_handle::Blob;
