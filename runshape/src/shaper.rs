// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry points and line emission.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::bidi::reorder_visual;
use crate::error::ShapeError;
use crate::fallback::FontSubstitution;
use crate::feature::Feature;
use crate::font::FontHandle;
use crate::handler::{Buffer, RunHandler, RunInfo};
use crate::iter::{
    BidiRunIterator, FallbackFontIterator, FontRunIterator, LanguageRunIterator,
    ScriptRunIterator, TrivialFontIterator, TrivialLanguageIterator, UnicodeBidiIterator,
    UnicodeScriptIterator,
};
use crate::line_break::wrap_runs;
use crate::resolve::RunSegmenter;
use crate::segment::{IcuLineBreaker, LineBreaker};
use crate::shape::{ShapeScratch, ShapedRun, ShapingEngine, shape_run};
use crate::util::is_unbounded;

/// Shapes paragraphs of text and reports the result line by line.
///
/// A shaper owns a [`ShapingEngine`] and the collaborators used by
/// [`Shaper::shape`]; it can be reused for any number of calls. No shaped
/// state is carried from one call to the next.
#[derive(Debug)]
pub struct Shaper<E> {
    engine: E,
    substitution: Option<Arc<dyn FontSubstitution>>,
    line_breaker: Box<dyn LineBreaker>,
    language: String,
    scratch: ShapeScratch,
    breaks: Vec<usize>,
}

impl<E: ShapingEngine + Default> Default for Shaper<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}

impl<E: ShapingEngine> Shaper<E> {
    /// Creates a shaper that shapes with `engine`.
    ///
    /// There is no font substitution by default, lines are broken according
    /// to UAX #14 and the language is `und`.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            substitution: None,
            line_breaker: Box::new(IcuLineBreaker::new()),
            language: String::from("und"),
            scratch: ShapeScratch::default(),
            breaks: Vec::new(),
        }
    }

    /// Substitutes fonts from `substitution` for code points the primary font
    /// of [`Shaper::shape`] does not support.
    pub fn with_font_substitution(mut self, substitution: Arc<dyn FontSubstitution>) -> Self {
        self.substitution = Some(substitution);
        self
    }

    /// Finds break opportunities with `line_breaker`.
    pub fn with_line_breaker(mut self, line_breaker: Box<dyn LineBreaker>) -> Self {
        self.line_breaker = line_breaker;
        self
    }

    /// Sets the BCP 47 language used by [`Shaper::shape`].
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Returns the shaping engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the shaping engine mutably.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Shapes `text` set in `font` and delivers the result to `handler`.
    ///
    /// Bidi levels and scripts are resolved from the text itself, with the
    /// paragraph direction given by `left_to_right`. Lines are wrapped to
    /// `width`; a width that is not a positive finite number puts everything
    /// on one line.
    pub fn shape(
        &mut self,
        text: &str,
        font: &FontHandle,
        left_to_right: bool,
        width: f32,
        handler: &mut dyn RunHandler,
        features: &[Feature],
    ) -> Result<(), ShapeError> {
        let len = text.len();
        let mut bidi = UnicodeBidiIterator::new(text, if left_to_right { 0 } else { 1 });
        let mut script = UnicodeScriptIterator::new(text);
        let mut language = TrivialLanguageIterator::new(self.language.clone(), len);
        match self.substitution.clone() {
            Some(substitution) => {
                let mut fonts = FallbackFontIterator::new(text, font.clone(), &*substitution)
                    .with_languages([self.language.as_str()]);
                self.shape_with_iterators(
                    text,
                    &mut fonts,
                    &mut bidi,
                    &mut script,
                    &mut language,
                    features,
                    width,
                    handler,
                )
            }
            None => {
                let mut fonts = TrivialFontIterator::new(font.clone(), len);
                self.shape_with_iterators(
                    text,
                    &mut fonts,
                    &mut bidi,
                    &mut script,
                    &mut language,
                    features,
                    width,
                    handler,
                )
            }
        }
    }

    /// Shapes `text` with caller supplied property iterators.
    ///
    /// Runs are cut wherever any iterator or any feature range changes. If an
    /// iterator fails to advance, the lines shaped so far are delivered as
    /// complete cycles and the error is returned.
    pub fn shape_with_iterators(
        &mut self,
        text: &str,
        fonts: &mut dyn FontRunIterator,
        bidi: &mut dyn BidiRunIterator,
        scripts: &mut dyn ScriptRunIterator,
        languages: &mut dyn LanguageRunIterator,
        features: &[Feature],
        width: f32,
        handler: &mut dyn RunHandler,
    ) -> Result<(), ShapeError> {
        let mut segmenter =
            RunSegmenter::new(text, fonts, bidi, scripts, languages, features);
        let mut lines = LineAccumulator::new(handler);
        let result = if is_unbounded(width) {
            self.shape_unwrapped(text, &mut segmenter, &mut lines)
        } else {
            self.breaks.clear();
            self.line_breaker.line_breaks(text, &mut self.breaks);
            wrap_runs(
                &mut self.engine,
                &mut self.scratch,
                text,
                &self.breaks,
                width,
                &mut segmenter,
                &mut lines,
            )
        };
        lines.finish();
        if let Err(err) = &result {
            log::debug!("delivered {} lines before: {err}", lines.count());
        }
        result
    }

    fn shape_unwrapped(
        &mut self,
        text: &str,
        segmenter: &mut RunSegmenter<'_>,
        lines: &mut LineAccumulator<'_>,
    ) -> Result<(), ShapeError> {
        while let Some(run) = segmenter.next_run()? {
            if let Some(shaped) = shape_run(&mut self.engine, &mut self.scratch, text, &run) {
                lines.push(shaped);
            }
        }
        Ok(())
    }
}

/// Collects shaped runs into lines and emits each completed line.
pub(crate) struct LineAccumulator<'a> {
    handler: &'a mut dyn RunHandler,
    runs: Vec<ShapedRun>,
    advance: f32,
    count: usize,
}

impl<'a> LineAccumulator<'a> {
    pub(crate) fn new(handler: &'a mut dyn RunHandler) -> Self {
        Self {
            handler,
            runs: Vec::new(),
            advance: 0.,
            count: 0,
        }
    }

    /// Horizontal advance of the runs on the current line.
    pub(crate) fn advance(&self) -> f32 {
        self.advance
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Number of lines emitted so far.
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn push(&mut self, run: ShapedRun) {
        self.advance += run.advance.x;
        self.runs.push(run);
    }

    /// Emits the current line unless it is empty.
    pub(crate) fn flush(&mut self) {
        if self.runs.is_empty() {
            return;
        }
        emit_line(&self.runs, &mut *self.handler);
        self.runs.clear();
        self.advance = 0.;
        self.count += 1;
    }

    /// Emits the pending line; if no line was emitted at all, emits an empty
    /// one.
    pub(crate) fn finish(&mut self) {
        self.flush();
        if self.count == 0 {
            emit_line(&[], &mut *self.handler);
            self.count = 1;
        }
    }
}

fn run_info(run: &ShapedRun) -> RunInfo<'_> {
    RunInfo {
        font: &run.run.font,
        level: run.run.level,
        script: run.run.script,
        language: &run.run.language,
        advance: run.advance,
        glyph_count: run.glyphs.len(),
        utf8_range: run.run.range.clone(),
    }
}

/// Delivers one line to `handler`, with runs in visual order.
fn emit_line(runs: &[ShapedRun], handler: &mut dyn RunHandler) {
    let levels: SmallVec<[u8; 16]> = runs.iter().map(|run| run.run.level).collect();
    let order = reorder_visual(&levels);
    log::trace!("emitting line of {} runs, visual order {order:?}", runs.len());

    handler.begin_line();
    for &index in &order {
        handler.run_info(&run_info(&runs[index]));
    }
    handler.commit_run_info();
    for &index in &order {
        let run = &runs[index];
        let info = run_info(run);
        fill_buffer(handler.run_buffer(&info), run);
        handler.commit_run_buffer(&info);
    }
    handler.commit_line();
}

/// Copies the glyphs of `run` into `buffer`.
///
/// Slices shorter than the glyph count are filled as far as they go.
fn fill_buffer(buffer: Buffer<'_>, run: &ShapedRun) {
    let Buffer {
        glyphs,
        positions,
        offsets,
        clusters,
        point,
    } = buffer;
    for (slot, glyph) in glyphs.iter_mut().zip(&run.glyphs) {
        *slot = glyph.id;
    }
    match offsets {
        Some(offsets) => {
            for (slot, glyph) in positions.iter_mut().zip(&run.glyphs) {
                *slot = point + glyph.pen;
            }
            for (slot, glyph) in offsets.iter_mut().zip(&run.glyphs) {
                *slot = glyph.offset;
            }
        }
        None => {
            for (slot, glyph) in positions.iter_mut().zip(&run.glyphs) {
                *slot = point + glyph.position();
            }
        }
    }
    if let Some(clusters) = clusters {
        for (slot, glyph) in clusters.iter_mut().zip(&run.glyphs) {
            *slot = glyph.cluster;
        }
    }
}
