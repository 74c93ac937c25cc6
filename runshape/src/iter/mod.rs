// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursors over per-character text properties.
//!
//! Each property (font, bidi level, script, language) partitions the text
//! into runs independently of the others. A property iterator starts before
//! its first run; every call to [`RunIterator::consume`] moves it onto the
//! next run, after which [`RunIterator::end_of_current_run`] reports where
//! that run ends. [`RunIterator::at_end`] becomes true once the current run
//! reaches the end of the text.

mod bidi;
mod font;
mod script;

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::Tag;
use crate::font::FontHandle;

pub use bidi::UnicodeBidiIterator;
pub use font::FallbackFontIterator;
pub use script::{UnicodeScriptIterator, script_tag};

/// The cursor contract shared by all property iterators.
pub trait RunIterator {
    /// Moves to the next run.
    ///
    /// Must not be called once [`RunIterator::at_end`] returns true.
    fn consume(&mut self);

    /// Byte offset one past the end of the current run, or `0` before the
    /// first call to [`RunIterator::consume`].
    fn end_of_current_run(&self) -> usize;

    /// Returns true when the current run ends at the end of the text.
    fn at_end(&self) -> bool;
}

/// Runs of text that share a font.
pub trait FontRunIterator: RunIterator {
    /// The font of the current run.
    fn current_font(&self) -> &FontHandle;
}

/// Runs of text that share a bidi embedding level.
pub trait BidiRunIterator: RunIterator {
    /// The embedding level of the current run; odd levels are right-to-left.
    fn current_level(&self) -> u8;
}

/// Runs of text that share a script.
pub trait ScriptRunIterator: RunIterator {
    /// The ISO 15924 tag of the current run.
    fn current_script(&self) -> Tag;
}

/// Runs of text that share a language.
pub trait LanguageRunIterator: RunIterator {
    /// The BCP 47 language tag of the current run.
    fn current_language(&self) -> &str;
}

/// A property iterator producing a single run over the whole text.
#[derive(Clone, Debug)]
pub struct TrivialRunIterator<T> {
    value: T,
    len: usize,
    at_end: bool,
}

/// A font iterator that uses one font for the whole text.
pub type TrivialFontIterator = TrivialRunIterator<FontHandle>;
/// A bidi iterator that uses one embedding level for the whole text.
pub type TrivialBidiIterator = TrivialRunIterator<u8>;
/// A script iterator that uses one script for the whole text.
pub type TrivialScriptIterator = TrivialRunIterator<Tag>;
/// A language iterator that uses one language for the whole text.
pub type TrivialLanguageIterator = TrivialRunIterator<String>;

impl<T> TrivialRunIterator<T> {
    /// Creates an iterator over `len` bytes of text with the given value.
    pub fn new(value: T, len: usize) -> Self {
        Self {
            value,
            len,
            at_end: len == 0,
        }
    }
}

impl<T> RunIterator for TrivialRunIterator<T> {
    fn consume(&mut self) {
        self.at_end = true;
    }

    fn end_of_current_run(&self) -> usize {
        if self.at_end {
            self.len
        } else {
            0
        }
    }

    fn at_end(&self) -> bool {
        self.at_end
    }
}

impl FontRunIterator for TrivialRunIterator<FontHandle> {
    fn current_font(&self) -> &FontHandle {
        &self.value
    }
}

impl BidiRunIterator for TrivialRunIterator<u8> {
    fn current_level(&self) -> u8 {
        self.value
    }
}

impl ScriptRunIterator for TrivialRunIterator<Tag> {
    fn current_script(&self) -> Tag {
        self.value
    }
}

impl LanguageRunIterator for TrivialRunIterator<String> {
    fn current_language(&self) -> &str {
        &self.value
    }
}

/// A property iterator over caller supplied segments.
///
/// Segments must be contiguous, start at offset `0` and be listed in order;
/// only the end of each segment is consulted.
#[derive(Clone, Debug)]
pub struct SegmentedRunIterator<T> {
    segments: Vec<(usize, T)>,
    current: Option<usize>,
}

impl<T> SegmentedRunIterator<T> {
    /// Creates an iterator from `(range, value)` segments.
    ///
    /// Returns `None` if there are no segments.
    pub fn new(segments: impl IntoIterator<Item = (Range<usize>, T)>) -> Option<Self> {
        let segments: Vec<_> = segments
            .into_iter()
            .map(|(range, value)| (range.end, value))
            .collect();
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            segments,
            current: None,
        })
    }

    fn value(&self) -> &T {
        let index = self.current.unwrap_or(0).min(self.segments.len() - 1);
        &self.segments[index].1
    }
}

impl<T> RunIterator for SegmentedRunIterator<T> {
    fn consume(&mut self) {
        self.current = Some(self.current.map_or(0, |i| i + 1));
    }

    fn end_of_current_run(&self) -> usize {
        match self.current {
            Some(index) => self.segments.get(index).map_or(0, |segment| segment.0),
            None => 0,
        }
    }

    fn at_end(&self) -> bool {
        self.current.is_some_and(|index| index + 1 >= self.segments.len())
    }
}

impl FontRunIterator for SegmentedRunIterator<FontHandle> {
    fn current_font(&self) -> &FontHandle {
        self.value()
    }
}

impl BidiRunIterator for SegmentedRunIterator<u8> {
    fn current_level(&self) -> u8 {
        *self.value()
    }
}

impl ScriptRunIterator for SegmentedRunIterator<Tag> {
    fn current_script(&self) -> Tag {
        *self.value()
    }
}

impl LanguageRunIterator for SegmentedRunIterator<String> {
    fn current_language(&self) -> &str {
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_iterator_has_one_run() {
        let mut iter = TrivialBidiIterator::new(1, 5);
        assert!(!iter.at_end());
        assert_eq!(iter.end_of_current_run(), 0);
        iter.consume();
        assert!(iter.at_end());
        assert_eq!(iter.end_of_current_run(), 5);
        assert_eq!(iter.current_level(), 1);
    }

    #[test]
    fn trivial_iterator_over_empty_text_starts_at_end() {
        let iter = TrivialScriptIterator::new(Tag::COMMON_SCRIPT, 0);
        assert!(iter.at_end(), "empty text has no runs to consume");
        assert_eq!(iter.end_of_current_run(), 0);
    }

    #[test]
    fn segmented_iterator_walks_segments() {
        let mut iter = SegmentedRunIterator::new([(0..4, 0_u8), (4..8, 1), (8..11, 0)]).unwrap();
        let mut seen = Vec::new();
        while !iter.at_end() {
            iter.consume();
            seen.push((iter.end_of_current_run(), iter.current_level()));
        }
        assert_eq!(seen, [(4, 0), (8, 1), (11, 0)]);
    }

    #[test]
    fn segmented_iterator_needs_segments() {
        assert!(SegmentedRunIterator::<u8>::new([]).is_none());
    }
}
