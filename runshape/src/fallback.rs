// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font substitution for code points the requested font cannot render.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::font::{FontHandle, FontStyle};

/// Everything a substitution manager is told about the missing code point.
#[derive(Copy, Clone, Debug)]
pub struct FallbackRequest<'a> {
    /// Family name of the requested font, if known.
    pub family: Option<&'a str>,
    /// Style of the requested font.
    pub style: FontStyle,
    /// BCP 47 language tags, most preferred first.
    pub languages: &'a [&'a str],
    /// The code point that needs a glyph.
    pub ch: char,
}

/// Chooses a substitute typeface for a code point.
pub trait FontSubstitution: fmt::Debug {
    /// Returns a typeface able to render `request.ch`, or `None` if no such
    /// typeface is known.
    fn match_character(&self, request: &FallbackRequest<'_>) -> Option<FontHandle>;
}

/// Determines whether a fallback search continues.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MatchStatus {
    /// Keep looking at further candidates.
    Continue,
    /// Stop with the current candidate.
    Stop,
}

/// An ordered list of substitute typefaces.
///
/// Candidates are tried in order. A candidate whose language list contains
/// one of the requested languages is preferred over earlier candidates
/// without a language preference; otherwise the first candidate that covers
/// the code point wins.
#[derive(Clone, Debug, Default)]
pub struct FontList {
    entries: Vec<Entry>,
}

#[derive(Clone, Debug)]
struct Entry {
    font: FontHandle,
    languages: Vec<String>,
}

impl FontList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a typeface used for any language.
    pub fn push(&mut self, font: FontHandle) -> &mut Self {
        self.entries.push(Entry {
            font,
            languages: Vec::new(),
        });
        self
    }

    /// Appends a typeface preferred for the given languages.
    pub fn push_for_languages<'a>(
        &mut self,
        font: FontHandle,
        languages: impl IntoIterator<Item = &'a str>,
    ) -> &mut Self {
        self.entries.push(Entry {
            font,
            languages: languages.into_iter().map(String::from).collect(),
        });
        self
    }

    /// Returns the number of typefaces in the list.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the list holds no typefaces.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invokes `f` with every typeface covering `ch`, in list order, until it
    /// returns [`MatchStatus::Stop`].
    pub fn matches_with(&self, ch: char, mut f: impl FnMut(&FontHandle, &[String]) -> MatchStatus) {
        for entry in &self.entries {
            if !entry.font.supports(ch) {
                continue;
            }
            if f(&entry.font, &entry.languages) == MatchStatus::Stop {
                return;
            }
        }
    }
}

impl FontSubstitution for FontList {
    fn match_character(&self, request: &FallbackRequest<'_>) -> Option<FontHandle> {
        let mut selected: Option<FontHandle> = None;
        let mut selected_rank = 0;
        self.matches_with(request.ch, |font, languages| {
            let rank = rank(font, languages, request);
            if selected.is_none() || rank > selected_rank {
                selected = Some(font.clone());
                selected_rank = rank;
            }
            if rank >= 3 {
                MatchStatus::Stop
            } else {
                MatchStatus::Continue
            }
        });
        selected
    }
}

/// Scores a covering candidate: language match is worth 2, a family name
/// match 1.
fn rank(font: &FontHandle, languages: &[String], request: &FallbackRequest<'_>) -> u8 {
    let language_match = request.languages.iter().any(|wanted| {
        languages
            .iter()
            .any(|have| language_matches(have, wanted))
    });
    let family_match = match (request.family, font.family_name()) {
        (Some(wanted), Some(have)) => wanted.eq_ignore_ascii_case(have),
        _ => false,
    };
    (language_match as u8) * 2 + family_match as u8
}

/// Compares the primary language subtags of two BCP 47 tags.
fn language_matches(a: &str, b: &str) -> bool {
    let primary = |tag: &str| tag.split(['-', '_']).next().unwrap_or("").to_ascii_lowercase();
    let (a, b) = (primary(a), primary(b));
    !a.is_empty() && a == b
}
