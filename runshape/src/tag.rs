// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Four byte codes shared by scripts and OpenType features.

use core::fmt;
use core::str::FromStr;

/// A four byte identifier, such as an ISO 15924 script code (`Latn`) or an
/// OpenType feature tag (`liga`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Tag {
    raw: [u8; 4],
}

impl Tag {
    /// The “unknown” script (`Zzzz`).
    pub const UNKNOWN_SCRIPT: Self = Self::new(b"Zzzz");

    /// The “common” script (`Zyyy`).
    pub const COMMON_SCRIPT: Self = Self::new(b"Zyyy");

    /// The “inherited” script (`Zinh`).
    pub const INHERITED_SCRIPT: Self = Self::new(b"Zinh");

    /// Creates a tag from four bytes.
    ///
    /// This does not validate the input.
    #[must_use]
    #[inline(always)]
    pub const fn new(raw: &[u8; 4]) -> Self {
        Self { raw: *raw }
    }

    /// Creates a tag from its big-endian `u32` representation.
    #[must_use]
    #[inline(always)]
    pub const fn from_u32(value: u32) -> Self {
        Self {
            raw: value.to_be_bytes(),
        }
    }

    /// Creates a tag from the first four bytes of a string, padding with
    /// spaces when the string is shorter.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        let mut raw = [b' '; 4];
        for (i, b) in s.as_bytes().iter().take(4).enumerate() {
            raw[i] = *b;
        }
        Self { raw }
    }

    /// Returns the raw bytes.
    #[must_use]
    #[inline(always)]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.raw
    }

    /// Returns the big-endian `u32` representation.
    #[must_use]
    #[inline(always)]
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.raw)
    }

    /// Returns the tag as a string if all bytes are ASCII.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if self.raw.is_ascii() {
            core::str::from_utf8(&self.raw).ok()
        } else {
            None
        }
    }

    /// Parses a tag of one to four printable ASCII characters, padding with
    /// spaces.
    pub fn parse(s: &str) -> Result<Self, ParseTagError> {
        s.parse()
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => f.debug_tuple("Tag").field(&s).finish(),
            None => f.debug_tuple("Tag").field(&self.raw).finish(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.raw {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.is_empty() || bytes.len() > 4 {
            return Err(ParseTagError::InvalidLength);
        }
        if !bytes.iter().all(|b| b.is_ascii_graphic()) {
            return Err(ParseTagError::InvalidBytes);
        }
        Ok(Self::from_str_lossy(s))
    }
}

impl From<[u8; 4]> for Tag {
    fn from(raw: [u8; 4]) -> Self {
        Self { raw }
    }
}

/// An error returned from parsing a [`Tag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseTagError {
    /// The input was empty or longer than four bytes.
    InvalidLength,
    /// The input contained bytes that are not printable ASCII.
    InvalidBytes,
}

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength => f.write_str("invalid tag length"),
            Self::InvalidBytes => f.write_str("invalid tag bytes"),
        }
    }
}

impl core::error::Error for ParseTagError {}
