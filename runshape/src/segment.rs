// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line break opportunities.

use alloc::vec::Vec;
use core::fmt;

use icu_segmenter::LineSegmenter;
use icu_segmenter::options::{LineBreakOptions, LineBreakWordOption};

/// Finds the byte offsets at which a line may end.
pub trait LineBreaker: fmt::Debug {
    /// Appends every break opportunity of `text` to `breaks` in increasing
    /// order.
    ///
    /// Offsets `0` and `text.len()` may be included; they are ignored.
    fn line_breaks(&self, text: &str, breaks: &mut Vec<usize>);
}

/// Line breaking according to UAX #14, backed by ICU.
///
/// Dictionary and LSTM based segmentation is used for scripts written
/// without spaces.
#[derive(Copy, Clone, Debug, Default)]
pub struct IcuLineBreaker {
    word_option: Option<LineBreakWordOption>,
}

impl IcuLineBreaker {
    /// Creates a breaker with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how breaks inside words are treated, like CSS `word-break`.
    pub fn with_word_option(mut self, word_option: LineBreakWordOption) -> Self {
        self.word_option = Some(word_option);
        self
    }
}

impl LineBreaker for IcuLineBreaker {
    fn line_breaks(&self, text: &str, breaks: &mut Vec<usize>) {
        let mut options = LineBreakOptions::default();
        options.word_option = self.word_option;
        breaks.extend(LineSegmenter::new_auto(options).segment_str(text));
    }
}

/// A breaker that reports no opportunities, so only forced breaks at run
/// ends remain.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoBreaks;

impl LineBreaker for NoBreaks {
    fn line_breaks(&self, _text: &str, _breaks: &mut Vec<usize>) {}
}
