// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font runs with per-code-point substitution.

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use super::{FontRunIterator, RunIterator};
use crate::fallback::{FallbackRequest, FontSubstitution};
use crate::font::{FontHandle, FontStyle, same_font};

/// A font iterator that substitutes fonts for code points the primary font
/// cannot render.
///
/// The primary font is used for every code point it supports. Otherwise the
/// most recent substitute is reused if it supports the code point, and only
/// then is the substitution manager asked. Code points nobody supports stay
/// with the primary font. A run ends where the next code point resolves to a
/// different font.
#[derive(Debug)]
pub struct FallbackFontIterator<'a> {
    text: &'a str,
    cursor: usize,
    primary: FontHandle,
    substitute: Option<FontHandle>,
    current: FontHandle,
    substitution: &'a dyn FontSubstitution,
    family: Option<String>,
    style: FontStyle,
    languages: Vec<String>,
}

impl<'a> FallbackFontIterator<'a> {
    /// Creates an iterator over `text` that starts from `primary` and asks
    /// `substitution` for fonts covering what `primary` cannot.
    pub fn new(text: &'a str, primary: FontHandle, substitution: &'a dyn FontSubstitution) -> Self {
        let family = primary.family_name().map(String::from);
        let style = primary.style();
        Self {
            text,
            cursor: 0,
            current: primary.clone(),
            primary,
            substitute: None,
            substitution,
            family,
            style,
            languages: Vec::new(),
        }
    }

    /// Sets the language hints passed to the substitution manager, most
    /// preferred first.
    pub fn with_languages<S: Into<String>>(mut self, languages: impl IntoIterator<Item = S>) -> Self {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Resolves the font for `ch`, remembering any new substitute.
    fn font_for(&mut self, ch: char) -> FontHandle {
        if self.primary.supports(ch) {
            return self.primary.clone();
        }
        if let Some(substitute) = &self.substitute {
            if substitute.supports(ch) {
                return substitute.clone();
            }
        }
        let languages: SmallVec<[&str; 4]> = self.languages.iter().map(String::as_str).collect();
        let request = FallbackRequest {
            family: self.family.as_deref(),
            style: self.style,
            languages: &languages,
            ch,
        };
        match self.substitution.match_character(&request) {
            Some(candidate) => {
                self.substitute = Some(candidate.clone());
                candidate
            }
            None => self.primary.clone(),
        }
    }
}

impl RunIterator for FallbackFontIterator<'_> {
    fn consume(&mut self) {
        let text = self.text;
        let start = self.cursor;
        let mut chars = text[start..].char_indices();
        let Some((_, first)) = chars.next() else {
            return;
        };
        self.current = self.font_for(first);
        self.cursor = text.len();
        for (offset, ch) in chars {
            let font = self.font_for(ch);
            if !same_font(&font, &self.current) {
                self.cursor = start + offset;
                break;
            }
        }
    }

    fn end_of_current_run(&self) -> usize {
        self.cursor
    }

    fn at_end(&self) -> bool {
        self.cursor == self.text.len()
    }
}

impl FontRunIterator for FallbackFontIterator<'_> {
    fn current_font(&self) -> &FontHandle {
        &self.current
    }
}
