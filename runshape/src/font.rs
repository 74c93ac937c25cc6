// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typefaces as seen by the shaper.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use linebender_resource_handle::Blob;
use skrifa::instance::{LocationRef, Size};
use skrifa::{FontRef, GlyphId, MetadataProvider};

/// A shared handle to a typeface at a specific size.
pub type FontHandle = Arc<dyn Typeface>;

/// Vertical metrics of a sized font in the y-down convention: `ascent` is
/// negative (above the baseline) and `descent` positive.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the tallest glyphs.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the lowest glyphs.
    pub descent: f32,
    /// Recommended additional space between lines.
    pub leading: f32,
}

/// Weight, width and slant requested of a typeface.
///
/// This is passed as a hint to font substitution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontStyle {
    /// Weight on the CSS scale (400 is regular, 700 is bold).
    pub weight: u16,
    /// Width on the OpenType scale (5 is normal).
    pub width: u16,
    /// Slant.
    pub slant: Slant,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            weight: 400,
            width: 5,
            slant: Slant::Upright,
        }
    }
}

/// Slant of a typeface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Slant {
    /// Upright glyphs.
    #[default]
    Upright,
    /// Italic glyphs.
    Italic,
    /// Slanted upright glyphs.
    Oblique,
}

/// Font data exposed to a shaping engine.
#[derive(Copy, Clone, Debug)]
pub struct ShapingFace<'a> {
    /// Identifier that is unique for the underlying font data and index,
    /// used as a cache key by engines.
    pub id: u64,
    /// Raw font file data (`ttf`, `otf` or `ttc`).
    pub data: &'a [u8],
    /// Index of the face within a collection.
    pub index: u32,
    /// Design units per em, used to scale engine output to the text size.
    pub units_per_em: u16,
}

/// A typeface at a specific text size.
///
/// Implementations are read-only and may be shared between calls.
pub trait Typeface: fmt::Debug {
    /// The text size in pixels per em.
    fn size(&self) -> f32;

    /// Maps a code point to its nominal glyph identifier, or `0` when the
    /// typeface does not support it.
    fn glyph_id(&self, ch: char) -> u16;

    /// Writes the horizontal advance of every glyph in `glyphs` to the
    /// matching slot of `advances`.
    fn advances(&self, glyphs: &[u16], advances: &mut [f32]);

    /// Vertical metrics at this size.
    fn metrics(&self) -> FontMetrics {
        FontMetrics::default()
    }

    /// The family name, used as a hint when a substitute is needed.
    fn family_name(&self) -> Option<&str> {
        None
    }

    /// The style, used as a hint when a substitute is needed.
    fn style(&self) -> FontStyle {
        FontStyle::default()
    }

    /// Returns the face a shaping engine can consume, if there is one.
    ///
    /// Runs whose typeface exposes no shaping face produce no glyphs.
    fn shaping_face(&self) -> Option<ShapingFace<'_>> {
        None
    }

    /// Returns true if the typeface has a glyph for `ch`.
    fn supports(&self, ch: char) -> bool {
        self.glyph_id(ch) != 0
    }
}

/// Returns true if both handles refer to the same typeface object.
pub(crate) fn same_font(a: &FontHandle, b: &FontHandle) -> bool {
    Arc::ptr_eq(a, b)
}

/// A typeface backed by in-memory font data.
#[derive(Clone)]
pub struct FontFile {
    blob: Blob<u8>,
    index: u32,
    size: f32,
    units_per_em: u16,
    family_name: Option<String>,
    style: FontStyle,
    metrics: FontMetrics,
}

impl FontFile {
    /// Creates a typeface from the face at `index` in `blob`, at the given
    /// size.
    ///
    /// Returns `None` if the data cannot be read as a font.
    pub fn new(blob: Blob<u8>, index: u32, size: f32) -> Option<Self> {
        let font = FontRef::from_index(blob.as_ref(), index).ok()?;
        let unscaled = font.metrics(Size::unscaled(), LocationRef::default());
        let scaled = font.metrics(Size::new(size), LocationRef::default());
        let attributes = font.attributes();
        let style = FontStyle {
            weight: attributes.weight.value().round().clamp(1.0, 1000.0) as u16,
            width: width_class(attributes.stretch.ratio()),
            slant: match attributes.style {
                skrifa::attribute::Style::Normal => Slant::Upright,
                skrifa::attribute::Style::Italic => Slant::Italic,
                skrifa::attribute::Style::Oblique(_) => Slant::Oblique,
            },
        };
        let family_name = font
            .localized_strings(skrifa::string::StringId::FAMILY_NAME)
            .english_or_first()
            .map(|name| name.chars().collect::<String>());
        Some(Self {
            index,
            size,
            units_per_em: unscaled.units_per_em,
            family_name,
            style,
            metrics: FontMetrics {
                ascent: -scaled.ascent,
                descent: -scaled.descent,
                leading: scaled.leading,
            },
            blob,
        })
    }

    /// Creates a typeface from owned font data.
    pub fn from_data(data: Vec<u8>, index: u32, size: f32) -> Option<Self> {
        Self::new(Blob::new(Arc::new(data)), index, size)
    }

    /// Returns a copy of this typeface at a different size.
    pub fn with_size(&self, size: f32) -> Option<Self> {
        Self::new(self.blob.clone(), self.index, size)
    }

    /// Returns the underlying font data.
    pub fn blob(&self) -> &Blob<u8> {
        &self.blob
    }

    fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(self.blob.as_ref(), self.index).ok()
    }
}

impl fmt::Debug for FontFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFile")
            .field("blob", &self.blob.id())
            .field("index", &self.index)
            .field("size", &self.size)
            .field("units_per_em", &self.units_per_em)
            .field("family_name", &self.family_name)
            .field("style", &self.style)
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl Typeface for FontFile {
    fn size(&self) -> f32 {
        self.size
    }

    fn glyph_id(&self, ch: char) -> u16 {
        self.font_ref()
            .and_then(|font| font.charmap().map(ch))
            .and_then(|gid| u16::try_from(gid.to_u32()).ok())
            .unwrap_or(0)
    }

    fn advances(&self, glyphs: &[u16], advances: &mut [f32]) {
        let Some(font) = self.font_ref() else {
            advances.fill(0.);
            return;
        };
        let metrics = font.glyph_metrics(Size::new(self.size), LocationRef::default());
        for (glyph, advance) in glyphs.iter().zip(advances.iter_mut()) {
            *advance = metrics
                .advance_width(GlyphId::new(u32::from(*glyph)))
                .unwrap_or_default();
        }
    }

    fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    fn style(&self) -> FontStyle {
        self.style
    }

    fn shaping_face(&self) -> Option<ShapingFace<'_>> {
        Some(ShapingFace {
            id: self.blob.id(),
            data: self.blob.as_ref(),
            index: self.index,
            units_per_em: self.units_per_em,
        })
    }
}

/// Maps a width ratio (1.0 is normal) to the OpenType `usWidthClass` scale.
fn width_class(ratio: f32) -> u16 {
    const CLASSES: [f32; 9] = [0.5, 0.625, 0.75, 0.875, 1.0, 1.125, 1.25, 1.5, 2.0];
    let mut best = 5;
    let mut best_distance = f32::MAX;
    for (i, class) in CLASSES.iter().enumerate() {
        let distance = (class - ratio).abs();
        if distance < best_distance {
            best_distance = distance;
            best = i as u16 + 1;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_not_a_font() {
        assert!(FontFile::from_data(vec![0; 64], 0, 16.).is_none(), "zeros are no font");
        assert!(FontFile::from_data(Vec::new(), 0, 16.).is_none(), "empty data");
    }

    #[test]
    fn width_classes() {
        assert_eq!(width_class(1.0), 5);
        assert_eq!(width_class(0.5), 1);
        assert_eq!(width_class(2.0), 9);
        assert_eq!(width_class(1.1), 6);
    }
}
