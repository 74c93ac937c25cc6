// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod engine;
mod font;
mod handler;

pub(crate) use engine::{EmptyEngine, OffsetEngine, UnsafeEngine};
pub(crate) use font::TestFont;
pub(crate) use handler::{Event, RecordingHandler};

use alloc::sync::Arc;

use crate::{FontHandle, PrimitiveEngine, Shaper};

/// A shaper that needs no font files.
pub(crate) fn shaper() -> Shaper<PrimitiveEngine> {
    Shaper::new(PrimitiveEngine)
}

/// A test font with a 10 unit advance per glyph.
pub(crate) fn font() -> FontHandle {
    Arc::new(TestFont::new(10.))
}
