// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interface through which shaped lines are delivered.
//!
//! Every line is reported as one cycle of calls on a [`RunHandler`]:
//!
//! 1. [`RunHandler::begin_line`]
//! 2. [`RunHandler::run_info`] for each run, in visual order
//! 3. [`RunHandler::commit_run_info`]
//! 4. [`RunHandler::run_buffer`] then [`RunHandler::commit_run_buffer`] for
//!    each run, in the same order
//! 5. [`RunHandler::commit_line`]
//!
//! The handler therefore sees every run of a line before it has to provide
//! storage for any glyph, which is what a baseline computed from all fonts on
//! the line needs.

use alloc::vec::Vec;
use core::mem;
use core::ops::Range;

use crate::Tag;
use crate::font::FontHandle;
use crate::shape::Point;

/// Description of one run of a line.
#[derive(Clone, Debug)]
pub struct RunInfo<'a> {
    /// The typeface the run was shaped with.
    pub font: &'a FontHandle,
    /// Bidi embedding level; odd levels are right-to-left.
    pub level: u8,
    /// ISO 15924 script tag.
    pub script: Tag,
    /// BCP 47 language tag.
    pub language: &'a str,
    /// Total advance of the run.
    pub advance: Point,
    /// Number of glyphs the run's buffer must hold.
    pub glyph_count: usize,
    /// The byte range of the source text the run covers.
    pub utf8_range: Range<usize>,
}

/// Storage for the glyphs of one run, owned by the handler.
///
/// Every slice must hold at least [`RunInfo::glyph_count`] entries.
#[derive(Debug)]
pub struct Buffer<'a> {
    /// Receives glyph identifiers in visual order.
    pub glyphs: &'a mut [u16],
    /// Receives glyph positions. When `offsets` is provided these are pen
    /// positions; otherwise the glyph offsets are folded in.
    pub positions: &'a mut [Point],
    /// Receives per-glyph offsets from the pen position, if wanted.
    pub offsets: Option<&'a mut [Point]>,
    /// Receives the source byte offset of each glyph's cluster, if wanted.
    pub clusters: Option<&'a mut [usize]>,
    /// Added to every position written.
    pub point: Point,
}

/// Receives shaped output one line at a time.
pub trait RunHandler {
    /// A new line starts.
    fn begin_line(&mut self);

    /// Describes one run of the current line.
    fn run_info(&mut self, info: &RunInfo<'_>);

    /// All runs of the current line have been described.
    fn commit_run_info(&mut self);

    /// Returns storage for the glyphs of the run described by `info`.
    fn run_buffer(&mut self, info: &RunInfo<'_>) -> Buffer<'_>;

    /// The buffer returned for `info` has been filled.
    fn commit_run_buffer(&mut self, info: &RunInfo<'_>);

    /// The current line is complete.
    fn commit_line(&mut self);
}

impl<H: RunHandler + ?Sized> RunHandler for &mut H {
    fn begin_line(&mut self) {
        (**self).begin_line();
    }

    fn run_info(&mut self, info: &RunInfo<'_>) {
        (**self).run_info(info);
    }

    fn commit_run_info(&mut self) {
        (**self).commit_run_info();
    }

    fn run_buffer(&mut self, info: &RunInfo<'_>) -> Buffer<'_> {
        (**self).run_buffer(info)
    }

    fn commit_run_buffer(&mut self, info: &RunInfo<'_>) {
        (**self).commit_run_buffer(info);
    }

    fn commit_line(&mut self) {
        (**self).commit_line();
    }
}

/// A run collected by [`GlyphRunCollector`].
#[derive(Clone, Debug)]
pub struct GlyphRun {
    /// The typeface the run was shaped with.
    pub font: FontHandle,
    /// Bidi embedding level.
    pub level: u8,
    /// ISO 15924 script tag.
    pub script: Tag,
    /// Glyph identifiers in visual order.
    pub glyphs: Vec<u16>,
    /// Absolute glyph positions, offsets included.
    pub positions: Vec<Point>,
    /// Source byte offset of each glyph's cluster.
    pub clusters: Vec<usize>,
    /// The byte range of the source text the run covers.
    pub utf8_range: Range<usize>,
    /// Total advance of the run.
    pub advance: Point,
}

/// A line collected by [`GlyphRunCollector`].
#[derive(Clone, Debug, Default)]
pub struct GlyphLine {
    /// Runs in visual order.
    pub runs: Vec<GlyphRun>,
    /// Vertical position of the baseline.
    pub baseline: f32,
    /// Largest ascent of any font on the line (negative).
    pub ascent: f32,
    /// Largest descent of any font on the line.
    pub descent: f32,
    /// Largest leading of any font on the line.
    pub leading: f32,
    /// Sum of the run advances.
    pub width: f32,
}

impl GlyphLine {
    /// Height of the line box.
    pub fn height(&self) -> f32 {
        self.descent + self.leading - self.ascent
    }
}

/// A [`RunHandler`] that stacks lines vertically and collects positioned
/// glyphs.
///
/// Each line's baseline sits below the top of the line by the largest ascent
/// among its runs, and the next line starts below the largest descent plus
/// leading.
#[derive(Clone, Debug, Default)]
pub struct GlyphRunCollector {
    origin: Point,
    pen: Point,
    line: GlyphLine,
    lines: Vec<GlyphLine>,
}

impl GlyphRunCollector {
    /// Creates a collector whose first line starts at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collector whose first line starts at `origin`.
    pub fn with_origin(origin: Point) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    /// The completed lines.
    pub fn lines(&self) -> &[GlyphLine] {
        &self.lines
    }

    /// Consumes the collector, returning the completed lines.
    pub fn into_lines(self) -> Vec<GlyphLine> {
        self.lines
    }

    /// Top-left corner of the next line that would be collected.
    pub fn end_point(&self) -> Point {
        self.origin
    }
}

impl RunHandler for GlyphRunCollector {
    fn begin_line(&mut self) {
        self.pen = self.origin;
        self.line = GlyphLine::default();
    }

    fn run_info(&mut self, info: &RunInfo<'_>) {
        let metrics = info.font.metrics();
        self.line.ascent = self.line.ascent.min(metrics.ascent);
        self.line.descent = self.line.descent.max(metrics.descent);
        self.line.leading = self.line.leading.max(metrics.leading);
    }

    fn commit_run_info(&mut self) {
        self.pen.y -= self.line.ascent;
        self.line.baseline = self.pen.y;
    }

    fn run_buffer(&mut self, info: &RunInfo<'_>) -> Buffer<'_> {
        let point = self.pen;
        let index = self.line.runs.len();
        self.line.runs.push(GlyphRun {
            font: info.font.clone(),
            level: info.level,
            script: info.script,
            glyphs: alloc::vec![0; info.glyph_count],
            positions: alloc::vec![Point::ZERO; info.glyph_count],
            clusters: alloc::vec![0; info.glyph_count],
            utf8_range: info.utf8_range.clone(),
            advance: info.advance,
        });
        let run = &mut self.line.runs[index];
        Buffer {
            glyphs: &mut run.glyphs,
            positions: &mut run.positions,
            offsets: None,
            clusters: Some(&mut run.clusters),
            point,
        }
    }

    fn commit_run_buffer(&mut self, info: &RunInfo<'_>) {
        self.pen = self.pen + info.advance;
        self.line.width += info.advance.x;
    }

    fn commit_line(&mut self) {
        let line = mem::take(&mut self.line);
        self.origin.y += line.height();
        log::trace!(
            "collected line of {} runs, baseline {}",
            line.runs.len(),
            line.baseline
        );
        self.lines.push(line);
    }
}
