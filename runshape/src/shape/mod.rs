// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shaping of resolved runs into positioned glyphs.
//!
//! A [`ShapingEngine`] turns the text of one run into glyphs in the y-up
//! convention of font files. This module normalizes that output: offsets and
//! advances are flipped to y-down, pen positions are accumulated, and cluster
//! indices are mapped back to byte offsets in the source text.

#[cfg(feature = "harfrust")]
mod cache;
#[cfg(feature = "harfrust")]
mod harfrust;

use alloc::vec::Vec;
use core::ops::{Add, Range, Sub};

use crate::Tag;
use crate::feature::Feature;
use crate::font::{ShapingFace, Typeface};
use crate::resolve::Run;
use crate::util::code_point_offsets;

#[cfg(feature = "harfrust")]
pub use self::harfrust::HarfrustEngine;

/// A point or vector in the y-down coordinate system of shaped output.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component; positive values point down.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0., y: 0. };

    /// Creates a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Text direction of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right.
    LeftToRight,
    /// Right to left.
    RightToLeft,
}

impl Direction {
    /// The direction implied by a bidi embedding level.
    pub fn from_level(level: u8) -> Self {
        if level & 1 != 0 {
            Self::RightToLeft
        } else {
            Self::LeftToRight
        }
    }

    /// Returns true for right-to-left.
    pub fn is_rtl(self) -> bool {
        self == Self::RightToLeft
    }
}

/// Everything an engine needs to shape one run.
#[derive(Copy, Clone, Debug)]
pub struct ShapeRequest<'a> {
    /// The text of the run.
    pub text: &'a str,
    /// The typeface the run is set in.
    pub font: &'a dyn Typeface,
    /// The font data the engine shapes with.
    pub face: ShapingFace<'a>,
    /// Text size in pixels per em.
    pub size: f32,
    /// Direction derived from the run's embedding level.
    pub direction: Direction,
    /// ISO 15924 script tag.
    pub script: Tag,
    /// BCP 47 language tag.
    pub language: &'a str,
    /// Features that apply to the run. Each covers the whole request.
    pub features: &'a [Feature],
}

/// One glyph as reported by an engine, in the y-up convention.
///
/// Glyphs are reported in visual order.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EngineGlyph {
    /// Glyph identifier.
    pub glyph_id: u16,
    /// Index of the first code point of the glyph's cluster within the
    /// request text.
    pub cluster: u32,
    /// Horizontal advance.
    pub x_advance: f32,
    /// Vertical advance, positive upwards.
    pub y_advance: f32,
    /// Horizontal offset from the pen position.
    pub x_offset: f32,
    /// Vertical offset from the pen position, positive upwards.
    pub y_offset: f32,
    /// True if the text may not be broken before this glyph's cluster
    /// without reshaping.
    pub unsafe_to_break: bool,
}

/// A text shaping engine.
///
/// Engines may keep mutable state such as caches, so one instance should not
/// be shared between threads.
pub trait ShapingEngine {
    /// Shapes `request.text`, appending glyphs in visual order to `glyphs`.
    fn shape(&mut self, request: &ShapeRequest<'_>, glyphs: &mut Vec<EngineGlyph>);
}

impl<E: ShapingEngine + ?Sized> ShapingEngine for &mut E {
    fn shape(&mut self, request: &ShapeRequest<'_>, glyphs: &mut Vec<EngineGlyph>) {
        (**self).shape(request, glyphs);
    }
}

/// An engine that maps each code point to its nominal glyph.
///
/// Advances come from the typeface and no offsets are applied. This performs
/// no contextual shaping, so it only suits simple scripts, but it works with
/// any [`Typeface`].
#[derive(Copy, Clone, Debug, Default)]
pub struct PrimitiveEngine;

impl ShapingEngine for PrimitiveEngine {
    fn shape(&mut self, request: &ShapeRequest<'_>, glyphs: &mut Vec<EngineGlyph>) {
        let ids: Vec<u16> = request
            .text
            .chars()
            .map(|ch| request.font.glyph_id(ch))
            .collect();
        let mut advances = alloc::vec![0.; ids.len()];
        request.font.advances(&ids, &mut advances);
        let first = glyphs.len();
        glyphs.extend(
            ids.iter()
                .zip(&advances)
                .enumerate()
                .map(|(index, (&glyph_id, &x_advance))| EngineGlyph {
                    glyph_id,
                    cluster: index as u32,
                    x_advance,
                    ..EngineGlyph::default()
                }),
        );
        if request.direction.is_rtl() {
            glyphs[first..].reverse();
        }
    }
}

/// A glyph of a shaped run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct ShapedGlyph {
    pub(crate) id: u16,
    /// Pen position before this glyph, relative to the run origin.
    pub(crate) pen: Point,
    pub(crate) offset: Point,
    /// Byte offset of the glyph's cluster in the source text.
    pub(crate) cluster: usize,
    pub(crate) unsafe_to_break: bool,
}

impl ShapedGlyph {
    /// Position of the glyph relative to the run origin, offset included.
    pub(crate) fn position(&self) -> Point {
        self.pen + self.offset
    }
}

/// A run together with its glyphs in visual order.
#[derive(Clone, Debug)]
pub(crate) struct ShapedRun {
    pub(crate) run: Run,
    pub(crate) glyphs: Vec<ShapedGlyph>,
    pub(crate) advance: Point,
}

impl ShapedRun {
    /// Pen position before glyph `index`; `glyphs.len()` gives the total
    /// advance.
    pub(crate) fn pen_at(&self, index: usize) -> Point {
        self.glyphs
            .get(index)
            .map_or(self.advance, |glyph| glyph.pen)
    }

    /// Copies out the glyphs `glyphs` as a run of their own covering the
    /// source bytes `range`, rebased to start at the origin.
    pub(crate) fn extract(&self, glyphs: Range<usize>, range: Range<usize>) -> Self {
        let origin = self.pen_at(glyphs.start);
        let end = self.pen_at(glyphs.end);
        Self {
            run: self.run.slice(range),
            glyphs: self.glyphs[glyphs]
                .iter()
                .map(|glyph| ShapedGlyph {
                    pen: glyph.pen - origin,
                    ..*glyph
                })
                .collect(),
            advance: end - origin,
        }
    }
}

/// Scratch space reused between calls to [`shape_run`].
#[derive(Debug, Default)]
pub(crate) struct ShapeScratch {
    glyphs: Vec<EngineGlyph>,
    offsets: Vec<usize>,
}

/// Shapes `run` with `engine`.
///
/// Returns `None` when the run's font cannot be shaped or the engine
/// produced no glyphs; either way the run contributes nothing to the output.
pub(crate) fn shape_run<E: ShapingEngine + ?Sized>(
    engine: &mut E,
    scratch: &mut ShapeScratch,
    text: &str,
    run: &Run,
) -> Option<ShapedRun> {
    let Some(face) = run.font.shaping_face() else {
        log::debug!("skipping run {:?}: font has no shaping face", run.range);
        return None;
    };
    let Some(run_text) = text.get(run.range.clone()) else {
        log::debug!("dropping run {:?}: not on character boundaries", run.range);
        return None;
    };
    let request = ShapeRequest {
        text: run_text,
        font: &*run.font,
        face,
        size: run.font.size(),
        direction: Direction::from_level(run.level),
        script: run.script,
        language: &run.language,
        features: &run.features,
    };
    scratch.glyphs.clear();
    engine.shape(&request, &mut scratch.glyphs);
    if scratch.glyphs.is_empty() {
        log::debug!("dropping run {:?}: no glyphs", run.range);
        return None;
    }

    code_point_offsets(run_text, run.range.start, &mut scratch.offsets);
    let mut pen = Point::ZERO;
    let glyphs = scratch
        .glyphs
        .iter()
        .map(|glyph| {
            let shaped = ShapedGlyph {
                id: glyph.glyph_id,
                pen,
                offset: Point::new(glyph.x_offset, -glyph.y_offset),
                cluster: scratch
                    .offsets
                    .get(glyph.cluster as usize)
                    .copied()
                    .unwrap_or(run.range.end),
                unsafe_to_break: glyph.unsafe_to_break,
            };
            pen = pen + Point::new(glyph.x_advance, -glyph.y_advance);
            shaped
        })
        .collect();
    Some(ShapedRun {
        run: run.clone(),
        glyphs,
        advance: pen,
    })
}
