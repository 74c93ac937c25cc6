// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! OpenType shaping with `harfrust`.

use alloc::vec::Vec;
use core::mem;

use super::cache::{FaceKey, PlanId, PlanKey};
use super::{Direction, EngineGlyph, ShapeRequest, ShapingEngine};
use crate::lru_cache::LruCache;

/// A [`ShapingEngine`] backed by `harfrust`.
///
/// Parsed font data and shape plans are kept in small LRU caches, so reusing
/// one engine across runs and calls avoids rebuilding them.
pub struct HarfrustEngine {
    data_cache: LruCache<FaceKey, harfrust::ShaperData>,
    plan_cache: LruCache<PlanId, harfrust::ShapePlan>,
    buffer: Option<harfrust::UnicodeBuffer>,
    features: Vec<harfrust::Feature>,
}

impl HarfrustEngine {
    /// Creates an engine with empty caches.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for HarfrustEngine {
    fn default() -> Self {
        const MAX_ENTRIES: usize = 16;
        Self {
            data_cache: LruCache::new(MAX_ENTRIES),
            plan_cache: LruCache::new(MAX_ENTRIES),
            buffer: Some(harfrust::UnicodeBuffer::new()),
            features: Vec::new(),
        }
    }
}

impl core::fmt::Debug for HarfrustEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HarfrustEngine").finish_non_exhaustive()
    }
}

impl ShapingEngine for HarfrustEngine {
    fn shape(&mut self, request: &ShapeRequest<'_>, glyphs: &mut Vec<EngineGlyph>) {
        let face = request.face;
        let Ok(font_ref) = harfrust::FontRef::from_index(face.data, face.index) else {
            log::debug!("face {} at index {} is not a readable font", face.id, face.index);
            return;
        };
        let face_key = FaceKey::new(face.id, face.index);
        let shaper_data = self
            .data_cache
            .get_or_insert_with(face_key, || harfrust::ShaperData::new(&font_ref));
        let shaper = shaper_data
            .shaper(&font_ref)
            .point_size(Some(request.size))
            .build();

        let direction = match request.direction {
            Direction::LeftToRight => harfrust::Direction::LeftToRight,
            Direction::RightToLeft => harfrust::Direction::RightToLeft,
        };
        let script = harfrust::Script::from_iso15924_tag(harfrust::Tag::from_u32(
            request.script.to_u32(),
        ));
        let language = request.language.parse::<harfrust::Language>().ok();
        self.features.clear();
        for feature in request.features {
            self.features.push(harfrust::Feature::new(
                harfrust::Tag::from_u32(feature.tag.to_u32()),
                feature.value,
                ..,
            ));
        }
        let plan = self.plan_cache.get_or_insert_with(
            PlanKey::new(
                face_key,
                direction,
                script,
                language.as_ref(),
                &self.features,
            ),
            || {
                harfrust::ShapePlan::new(
                    &shaper,
                    direction,
                    script,
                    language.as_ref(),
                    &self.features,
                )
            },
        );

        let mut buffer = mem::take(&mut self.buffer).unwrap_or_else(harfrust::UnicodeBuffer::new);
        buffer.clear();
        buffer.reserve(request.text.len());
        // Clusters are code point indices into the request text.
        for (index, ch) in request.text.chars().enumerate() {
            buffer.add(ch, index as u32);
        }
        buffer.set_direction(direction);
        if let Some(script) = script {
            buffer.set_script(script);
        }
        if let Some(language) = language.clone() {
            buffer.set_language(language);
        }

        let glyph_buffer = shaper.shape_with_plan(plan, buffer, &self.features);
        let scale = request.size / f32::from(face.units_per_em.max(1));
        glyphs.extend(
            glyph_buffer
                .glyph_infos()
                .iter()
                .zip(glyph_buffer.glyph_positions())
                .map(|(info, pos)| EngineGlyph {
                    glyph_id: u16::try_from(info.glyph_id).unwrap_or(0),
                    cluster: info.cluster,
                    x_advance: pos.x_advance as f32 * scale,
                    y_advance: pos.y_advance as f32 * scale,
                    x_offset: pos.x_offset as f32 * scale,
                    y_offset: pos.y_offset as f32 * scale,
                    unsafe_to_break: info.unsafe_to_break(),
                }),
        );
        log::trace!(
            "harfrust shaped {} bytes into {} glyphs",
            request.text.len(),
            glyphs.len()
        );
        self.buffer = Some(glyph_buffer.clear());
    }
}
