// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersection of the property iterators into atomic runs.

use alloc::string::String;
use core::ops::Range;

use smallvec::SmallVec;

use crate::Tag;
use crate::error::{IteratorKind, ShapeError};
use crate::feature::Feature;
use crate::font::FontHandle;
use crate::iter::{
    BidiRunIterator, FontRunIterator, LanguageRunIterator, RunIterator, ScriptRunIterator,
};

/// A maximal range of text sharing font, level, script, language and
/// feature set.
#[derive(Clone, Debug)]
pub(crate) struct Run {
    pub(crate) range: Range<usize>,
    pub(crate) font: FontHandle,
    pub(crate) level: u8,
    pub(crate) script: Tag,
    pub(crate) language: String,
    pub(crate) features: SmallVec<[Feature; 4]>,
}

impl Run {
    /// Returns a copy of this run restricted to `range`.
    pub(crate) fn slice(&self, range: Range<usize>) -> Self {
        Self {
            range,
            ..self.clone()
        }
    }

    pub(crate) fn is_rtl(&self) -> bool {
        self.level & 1 != 0
    }
}

/// Walks the four property iterators in lockstep, producing runs that end at
/// the nearest boundary of any of them or of any feature range.
///
/// Runs always start and end on character boundaries. An iterator boundary
/// inside a character is moved to the end of that character, and a feature
/// boundary inside a character does not cut the text at all.
pub(crate) struct RunSegmenter<'a> {
    text: &'a str,
    font: &'a mut dyn FontRunIterator,
    bidi: &'a mut dyn BidiRunIterator,
    script: &'a mut dyn ScriptRunIterator,
    language: &'a mut dyn LanguageRunIterator,
    features: &'a [Feature],
    offset: usize,
}

impl<'a> RunSegmenter<'a> {
    pub(crate) fn new(
        text: &'a str,
        font: &'a mut dyn FontRunIterator,
        bidi: &'a mut dyn BidiRunIterator,
        script: &'a mut dyn ScriptRunIterator,
        language: &'a mut dyn LanguageRunIterator,
        features: &'a [Feature],
    ) -> Self {
        consume_through(&mut *font, 0);
        consume_through(&mut *bidi, 0);
        consume_through(&mut *script, 0);
        consume_through(&mut *language, 0);
        Self {
            text,
            font,
            bidi,
            script,
            language,
            features,
            offset: 0,
        }
    }

    /// Resolves the next run.
    ///
    /// Returns `Ok(None)` once the whole text has been covered, and an error
    /// if some iterator fails to move past the current offset.
    pub(crate) fn next_run(&mut self) -> Result<Option<Run>, ShapeError> {
        let len = self.text.len();
        if self.offset >= len {
            return Ok(None);
        }
        let ends = [
            (IteratorKind::Font, self.font.end_of_current_run()),
            (IteratorKind::Bidi, self.bidi.end_of_current_run()),
            (IteratorKind::Script, self.script.end_of_current_run()),
            (IteratorKind::Language, self.language.end_of_current_run()),
        ];
        let (kind, mut end) = ends
            .iter()
            .copied()
            .min_by_key(|(_, end)| *end)
            .unwrap_or((IteratorKind::Font, len));
        if end <= self.offset {
            log::warn!(
                "{kind} iterator stalled at byte {} (run end {end}); aborting",
                self.offset
            );
            return Err(ShapeError::non_advancing(self.offset, Some(kind)));
        }
        end = end.min(len);
        while !self.text.is_char_boundary(end) {
            end += 1;
        }
        for feature in self.features {
            for boundary in [feature.start, feature.end] {
                if self.offset < boundary && boundary < end && self.text.is_char_boundary(boundary)
                {
                    end = boundary;
                }
            }
        }

        let range = self.offset..end;
        let run = Run {
            font: self.font.current_font().clone(),
            level: self.bidi.current_level(),
            script: self.script.current_script(),
            language: self.language.current_language().into(),
            features: self
                .features
                .iter()
                .filter(|feature| feature.applies_to(&range))
                .copied()
                .collect(),
            range,
        };
        log::trace!(
            "run {:?}: level {} script {} language {:?} features {}",
            run.range,
            run.level,
            run.script,
            run.language,
            run.features.len()
        );

        consume_through(&mut *self.font, end);
        consume_through(&mut *self.bidi, end);
        consume_through(&mut *self.script, end);
        consume_through(&mut *self.language, end);
        self.offset = end;
        Ok(Some(run))
    }
}

/// Moves `iter` past every run ending at or before `end`.
///
/// Stops early if a call to `consume` leaves the run end unchanged, so a
/// stalled iterator is reported by the next call to `next_run`.
fn consume_through<I: RunIterator + ?Sized>(iter: &mut I, end: usize) {
    while !iter.at_end() {
        let current = iter.end_of_current_run();
        if current > end {
            break;
        }
        iter.consume();
        if iter.end_of_current_run() == current {
            break;
        }
    }
}
