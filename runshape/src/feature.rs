// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! OpenType feature settings applied over byte ranges of the text.

use core::ops::Range;

use crate::Tag;

/// An OpenType feature setting applied to the byte range `start..end` of the
/// source text.
///
/// A feature applies to every run that overlaps its range. Runs are split at
/// feature boundaries, so a run is always either fully covered by a feature
/// or not covered at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Feature {
    /// The feature tag, such as `liga` or `kern`.
    pub tag: Tag,
    /// The feature value; `0` disables the feature, `1` enables it and larger
    /// values select alternates.
    pub value: u32,
    /// Start of the byte range the feature applies to.
    pub start: usize,
    /// End (exclusive) of the byte range the feature applies to.
    pub end: usize,
}

impl Feature {
    /// Creates a feature covering `range`.
    pub fn new(tag: Tag, value: u32, range: Range<usize>) -> Self {
        Self {
            tag,
            value,
            start: range.start,
            end: range.end,
        }
    }

    /// Creates a feature that covers the whole text.
    pub fn global(tag: Tag, value: u32) -> Self {
        Self::new(tag, value, 0..usize::MAX)
    }

    /// Returns the byte range covered by the feature.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns true if the feature covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns true if the feature applies to the given byte range.
    pub fn applies_to(&self, range: &Range<usize>) -> bool {
        !self.is_empty() && self.start < range.end && range.start < self.end
    }

    /// Parses a comma separated list of feature settings according to the CSS
    /// `font-feature-settings` grammar, producing features that cover the
    /// whole text.
    ///
    /// Parsing stops at the first malformed entry.
    pub fn parse_list(s: &str) -> impl Iterator<Item = Self> + '_ + Clone {
        ParseList::new(s)
            .map(|(tag, value_str)| {
                let value = match value_str {
                    "on" | "" => Some(1),
                    "off" => Some(0),
                    _ => value_str.parse::<u32>().ok(),
                };
                (tag, value)
            })
            .take_while(|(_, value)| value.is_some())
            .filter_map(|(tag, value)| Some(Self::global(tag, value?)))
    }
}

#[derive(Clone)]
struct ParseList<'a> {
    source: &'a [u8],
    len: usize,
    pos: usize,
}

impl<'a> ParseList<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            len: source.len(),
            pos: 0,
        }
    }
}

impl<'a> Iterator for ParseList<'a> {
    type Item = (Tag, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let mut pos = self.pos;
        while pos < self.len && {
            let ch = self.source[pos];
            ch.is_ascii_whitespace() || ch == b','
        } {
            pos += 1;
        }
        self.pos = pos;
        if pos >= self.len {
            return None;
        }
        let quote = match self.source[pos] {
            q @ (b'"' | b'\'') => q,
            _ => return None,
        };
        pos += 1;
        let start = pos;
        let mut tag_str = None;
        while pos < self.len {
            if self.source[pos] == quote {
                tag_str = core::str::from_utf8(self.source.get(start..pos)?).ok();
                pos += 1;
                break;
            }
            pos += 1;
        }
        self.pos = pos;
        let tag_str = tag_str?;
        if tag_str.len() != 4 || !tag_str.is_ascii() {
            return None;
        }
        let tag = Tag::from_str_lossy(tag_str);
        while pos < self.len && self.source[pos].is_ascii_whitespace() {
            pos += 1;
        }
        let start = pos;
        while pos < self.len && self.source[pos] != b',' {
            pos += 1;
        }
        let value = core::str::from_utf8(self.source.get(start..pos)?)
            .ok()?
            .trim();
        self.pos = (pos + 1).min(self.len);
        Some((tag, value))
    }
}
