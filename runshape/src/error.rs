// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error returned when a shaping call is aborted.
///
/// Output committed to the run handler before the error was detected stays
/// committed; every line that was begun is also finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    kind: ErrorKind,
    offset: usize,
    iterator: Option<IteratorKind>,
}

impl ShapeError {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The byte offset in the text at which shaping stopped.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The property iterator responsible, when it can be determined.
    pub fn iterator(&self) -> Option<IteratorKind> {
        self.iterator
    }

    pub(crate) fn non_advancing(offset: usize, iterator: Option<IteratorKind>) -> Self {
        Self {
            kind: ErrorKind::NonAdvancingIterator,
            offset,
            iterator,
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::NonAdvancingIterator => {
                write!(f, "run iterator did not advance past byte {}", self.offset)?;
                if let Some(iterator) = self.iterator {
                    write!(f, " ({iterator} iterator)")?;
                }
                Ok(())
            }
        }
    }
}

impl core::error::Error for ShapeError {}

/// Categories of [`ShapeError`].
#[non_exhaustive]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A property iterator reported a run end that did not move past the
    /// current offset.
    NonAdvancingIterator,
}

/// The property iterators a shaping call is driven by.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IteratorKind {
    /// The font iterator.
    Font,
    /// The bidi level iterator.
    Bidi,
    /// The script iterator.
    Script,
    /// The language iterator.
    Language,
}

impl fmt::Display for IteratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Font => "font",
            Self::Bidi => "bidi",
            Self::Script => "script",
            Self::Language => "language",
        })
    }
}
