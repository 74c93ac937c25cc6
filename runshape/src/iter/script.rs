// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Script runs from the Unicode `Script` property.

use icu_properties::props::Script;
use icu_properties::{CodePointMapData, PropertyNamesShort};

use super::{RunIterator, ScriptRunIterator};
use crate::Tag;

/// Returns the ISO 15924 tag of the script `ch` belongs to.
///
/// The lookup is backed by ICU's compiled property data.
pub fn script_tag(ch: char) -> Tag {
    to_tag(CodePointMapData::<Script>::new().get(ch))
}

fn to_tag(script: Script) -> Tag {
    PropertyNamesShort::<Script>::new()
        .get_locale_script(script)
        .map_or(Tag::UNKNOWN_SCRIPT, |script| Tag::new(&script.into_raw()))
}

fn is_weak(script: Script) -> bool {
    script == Script::Common || script == Script::Inherited
}

/// A script iterator driven by the Unicode `Script` property.
///
/// Common and inherited code points (spaces, punctuation, combining marks)
/// join the run they appear in; a run that starts with them adopts the first
/// real script that follows. A run made only of inherited code points is
/// reported as common.
#[derive(Clone, Debug)]
pub struct UnicodeScriptIterator<'a> {
    text: &'a str,
    cursor: usize,
    script: Tag,
}

impl<'a> UnicodeScriptIterator<'a> {
    /// Creates an iterator over `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            cursor: 0,
            script: Tag::COMMON_SCRIPT,
        }
    }
}

impl RunIterator for UnicodeScriptIterator<'_> {
    fn consume(&mut self) {
        let scripts = CodePointMapData::<Script>::new();
        let mut chars = self.text[self.cursor..].char_indices();
        let Some((_, first)) = chars.next() else {
            return;
        };
        let mut current = scripts.get(first);
        let mut end = self.text.len();
        for (offset, ch) in chars {
            let script = scripts.get(ch);
            if script == current {
                continue;
            }
            if is_weak(current) {
                current = script;
            } else if is_weak(script) {
                continue;
            } else {
                end = self.cursor + offset;
                break;
            }
        }
        if current == Script::Inherited {
            current = Script::Common;
        }
        self.script = to_tag(current);
        self.cursor = end;
    }

    fn end_of_current_run(&self) -> usize {
        self.cursor
    }

    fn at_end(&self) -> bool {
        self.cursor == self.text.len()
    }
}

impl ScriptRunIterator for UnicodeScriptIterator<'_> {
    fn current_script(&self) -> Tag {
        self.script
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(text: &str) -> Vec<(usize, Tag)> {
        let mut iter = UnicodeScriptIterator::new(text);
        let mut runs = Vec::new();
        while !iter.at_end() {
            iter.consume();
            runs.push((iter.end_of_current_run(), iter.current_script()));
        }
        runs
    }

    #[test]
    fn tags_come_from_property_data() {
        assert_eq!(script_tag('a'), Tag::new(b"Latn"));
        assert_eq!(script_tag('\u{05D0}'), Tag::new(b"Hebr"));
        assert_eq!(script_tag(' '), Tag::COMMON_SCRIPT);
    }

    #[test]
    fn spaces_join_the_surrounding_run() {
        assert_eq!(runs("Hello World"), [(11, Tag::new(b"Latn"))]);
    }

    #[test]
    fn leading_common_adopts_following_script() {
        assert_eq!(runs("  abc"), [(5, Tag::new(b"Latn"))]);
    }

    #[test]
    fn script_change_splits() {
        // "ab" then two Greek letters (2 bytes each)
        assert_eq!(
            runs("ab\u{03B1}\u{03B2}"),
            [(2, Tag::new(b"Latn")), (6, Tag::new(b"Grek"))]
        );
    }

    #[test]
    fn only_common_is_common() {
        assert_eq!(runs("123 !"), [(5, Tag::COMMON_SCRIPT)]);
    }
}
