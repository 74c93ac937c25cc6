// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::RangeInclusive;

use crate::{FontMetrics, ShapingFace, Typeface};

/// A deterministic typeface.
///
/// Glyph ids are the low 16 bits of the code point and every glyph advances
/// by the font size.
#[derive(Clone, Debug)]
pub(crate) struct TestFont {
    size: f32,
    coverage: Option<Vec<RangeInclusive<char>>>,
    family: Option<String>,
    has_face: bool,
}

impl TestFont {
    /// A font covering every code point.
    pub(crate) fn new(size: f32) -> Self {
        Self {
            size,
            coverage: None,
            family: None,
            has_face: true,
        }
    }

    /// Restricts coverage to the given ranges.
    pub(crate) fn covering(mut self, ranges: impl IntoIterator<Item = RangeInclusive<char>>) -> Self {
        self.coverage = Some(ranges.into_iter().collect());
        self
    }

    pub(crate) fn named(mut self, family: &str) -> Self {
        self.family = Some(family.to_string());
        self
    }

    /// Hides the shaping face, so runs in this font cannot be shaped.
    pub(crate) fn without_face(mut self) -> Self {
        self.has_face = false;
        self
    }
}

impl Typeface for TestFont {
    fn size(&self) -> f32 {
        self.size
    }

    fn glyph_id(&self, ch: char) -> u16 {
        let covered = self
            .coverage
            .as_ref()
            .is_none_or(|ranges| ranges.iter().any(|range| range.contains(&ch)));
        if covered {
            (ch as u32 & 0xFFFF).max(1) as u16
        } else {
            0
        }
    }

    fn advances(&self, _glyphs: &[u16], advances: &mut [f32]) {
        advances.fill(self.size);
    }

    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            ascent: -0.8 * self.size,
            descent: 0.2 * self.size,
            leading: 0.,
        }
    }

    fn family_name(&self) -> Option<&str> {
        self.family.as_deref()
    }

    fn shaping_face(&self) -> Option<ShapingFace<'_>> {
        self.has_face.then_some(ShapingFace {
            id: 0,
            data: &[],
            index: 0,
            units_per_em: 1000,
        })
    }
}
