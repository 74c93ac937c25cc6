// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers.

use alloc::vec::Vec;

/// Returns true if `width` does not constrain line length.
///
/// Zero, negative, infinite and NaN widths all disable wrapping.
pub(crate) fn is_unbounded(width: f32) -> bool {
    !width.is_finite() || width <= 0.
}

/// Absolute byte offset of every code point of `text`, which starts at
/// `base` in the source text.
pub(crate) fn code_point_offsets(text: &str, base: usize, offsets: &mut Vec<usize>) {
    offsets.clear();
    offsets.extend(text.char_indices().map(|(offset, _)| base + offset));
}
