// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{EngineGlyph, PrimitiveEngine, ShapeRequest, ShapingEngine};

/// Shapes like [`PrimitiveEngine`] but forbids breaking before any glyph, so
/// every line break has to reshape.
#[derive(Debug, Default)]
pub(crate) struct UnsafeEngine;

impl ShapingEngine for UnsafeEngine {
    fn shape(&mut self, request: &ShapeRequest<'_>, glyphs: &mut Vec<EngineGlyph>) {
        let first = glyphs.len();
        PrimitiveEngine.shape(request, glyphs);
        for glyph in &mut glyphs[first..] {
            glyph.unsafe_to_break = true;
        }
    }
}

/// Shapes like [`PrimitiveEngine`] and then moves every glyph by a fixed
/// offset and vertical advance, both in font (y-up) coordinates.
#[derive(Debug)]
pub(crate) struct OffsetEngine {
    pub(crate) x_offset: f32,
    pub(crate) y_offset: f32,
    pub(crate) y_advance: f32,
}

impl ShapingEngine for OffsetEngine {
    fn shape(&mut self, request: &ShapeRequest<'_>, glyphs: &mut Vec<EngineGlyph>) {
        let first = glyphs.len();
        PrimitiveEngine.shape(request, glyphs);
        for glyph in &mut glyphs[first..] {
            glyph.x_offset = self.x_offset;
            glyph.y_offset = self.y_offset;
            glyph.y_advance = self.y_advance;
        }
    }
}

/// Produces no glyphs at all.
#[derive(Debug, Default)]
pub(crate) struct EmptyEngine;

impl ShapingEngine for EmptyEngine {
    fn shape(&mut self, _request: &ShapeRequest<'_>, _glyphs: &mut Vec<EngineGlyph>) {}
}
