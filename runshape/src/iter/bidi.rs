// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bidi embedding level runs computed with the Unicode bidirectional algorithm.

use alloc::vec::Vec;

use unicode_bidi::{BidiInfo, Level};

use super::{BidiRunIterator, RunIterator};

/// A bidi iterator that resolves embedding levels with `unicode-bidi`.
#[derive(Clone, Debug)]
pub struct UnicodeBidiIterator {
    levels: Vec<u8>,
    cursor: usize,
    level: u8,
}

impl UnicodeBidiIterator {
    /// Resolves the embedding levels of `text` for the given paragraph base
    /// level (`0` for left-to-right, `1` for right-to-left).
    pub fn new(text: &str, base_level: u8) -> Self {
        let base = if base_level & 1 != 0 {
            Level::rtl()
        } else {
            Level::ltr()
        };
        let levels = if text.is_empty() {
            Vec::new()
        } else {
            BidiInfo::new(text, Some(base))
                .levels
                .iter()
                .map(|level| level.number())
                .collect()
        };
        Self {
            levels,
            cursor: 0,
            level: base.number(),
        }
    }

    /// Resolves levels with the base direction taken from the first strong
    /// character of `text`, defaulting to left-to-right.
    pub fn with_detected_direction(text: &str) -> Self {
        let info = BidiInfo::new(text, None);
        let base = info
            .paragraphs
            .first()
            .map_or(0, |paragraph| paragraph.level.number());
        Self::new(text, base)
    }
}

impl RunIterator for UnicodeBidiIterator {
    fn consume(&mut self) {
        let Some(&level) = self.levels.get(self.cursor) else {
            return;
        };
        self.level = level;
        let end = self.levels[self.cursor..]
            .iter()
            .position(|&next| next != level)
            .map_or(self.levels.len(), |len| self.cursor + len);
        self.cursor = end;
    }

    fn end_of_current_run(&self) -> usize {
        self.cursor
    }

    fn at_end(&self) -> bool {
        self.cursor == self.levels.len()
    }
}

impl BidiRunIterator for UnicodeBidiIterator {
    fn current_level(&self) -> u8 {
        self.level
    }
}
