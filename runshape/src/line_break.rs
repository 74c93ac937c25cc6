// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking over shaped runs.
//!
//! Each resolved run is shaped once. Byte offsets where the shaped glyphs may
//! be split without reshaping are recorded in [`TextProps`], so most
//! candidate lines are measured and cut from that single shaping result.
//! Candidates whose ends are not safe to break are reshaped on their own.

use core::ops::Range;

use hashbrown::HashMap;

use crate::error::ShapeError;
use crate::resolve::RunSegmenter;
use crate::shape::{Point, ShapeScratch, ShapedRun, ShapingEngine, shape_run};
use crate::shaper::LineAccumulator;

/// Safe-to-break byte offsets of a shaped run, each mapped to the glyph
/// boundary it falls on and the pen position there.
#[derive(Debug, Default)]
struct TextProps {
    boundaries: HashMap<usize, (usize, Point)>,
}

impl TextProps {
    fn new(model: &ShapedRun) -> Self {
        let range = &model.run.range;
        let count = model.glyphs.len();
        let rtl = model.run.is_rtl();
        let mut boundaries = HashMap::with_capacity(count + 1);

        // Glyphs are in visual order, so a right-to-left run starts at its
        // last glyph.
        let (first, last) = if rtl { (count, 0) } else { (0, count) };
        boundaries.insert(range.start, (first, model.pen_at(first)));
        boundaries.insert(range.end, (last, model.pen_at(last)));

        for index in 1..count {
            let before = &model.glyphs[index - 1];
            let after = &model.glyphs[index];
            if before.cluster == after.cluster {
                continue;
            }
            // The boundary sits at the start of the logically later cluster.
            let later = if rtl { before } else { after };
            if later.unsafe_to_break || later.cluster <= range.start || later.cluster >= range.end
            {
                continue;
            }
            boundaries.insert(later.cluster, (index, model.pen_at(index)));
        }
        Self { boundaries }
    }

    /// Glyph range covering the source bytes `range`, if both ends are safe
    /// to break.
    fn glyphs(&self, range: &Range<usize>) -> Option<Range<usize>> {
        let (start, _) = self.boundaries.get(&range.start)?;
        let (end, _) = self.boundaries.get(&range.end)?;
        Some(*start.min(end)..*start.max(end))
    }

    /// Width of the source bytes `range`, if both ends are safe to break.
    fn width(&self, range: &Range<usize>) -> Option<f32> {
        let (_, start) = self.boundaries.get(&range.start)?;
        let (_, end) = self.boundaries.get(&range.end)?;
        Some((end.x - start.x).abs())
    }
}

/// Where the glyphs of a candidate come from.
enum Piece {
    /// Cut from the current model.
    Cached,
    /// Shaped separately; `None` if shaping produced no glyphs.
    Reshaped(Option<ShapedRun>),
}

struct Candidate {
    end: usize,
    width: f32,
    score: f32,
    piece: Piece,
}

/// Break opportunities strictly inside `start..end`, followed by `end`.
fn candidates(breaks: &[usize], start: usize, end: usize) -> impl Iterator<Item = usize> + '_ {
    let first = breaks.partition_point(|&offset| offset <= start);
    breaks[first..]
        .iter()
        .copied()
        .take_while(move |&offset| offset < end)
        .chain(core::iter::once(end))
}

/// Resolves runs from `segmenter` and distributes them over lines no wider
/// than `width`.
///
/// Lines only exceed `width` when a single unbreakable piece is wider than
/// the whole line; such a piece is placed on a line of its own.
pub(crate) fn wrap_runs<E: ShapingEngine + ?Sized>(
    engine: &mut E,
    scratch: &mut ShapeScratch,
    text: &str,
    breaks: &[usize],
    width: f32,
    segmenter: &mut RunSegmenter<'_>,
    lines: &mut LineAccumulator<'_>,
) -> Result<(), ShapeError> {
    while let Some(run) = segmenter.next_run()? {
        let Some(mut model) = shape_run(engine, scratch, text, &run) else {
            continue;
        };
        let mut props = TextProps::new(&model);
        let run_end = run.range.end;
        let mut start = run.range.start;

        while start < run_end {
            let budget = width - lines.advance();
            let mut best: Option<Candidate> = None;
            for end in candidates(breaks, start, run_end) {
                let range = start..end;
                let (candidate_width, piece) = match props.width(&range) {
                    Some(candidate_width) => (candidate_width, Piece::Cached),
                    None => {
                        let shaped = shape_run(engine, scratch, text, &run.slice(range));
                        let candidate_width = shaped.as_ref().map_or(0., |shaped| shaped.advance.x);
                        (candidate_width, Piece::Reshaped(shaped))
                    }
                };
                let score = if candidate_width < budget {
                    (end - start) as f32
                } else {
                    budget - candidate_width
                };
                if best.as_ref().is_none_or(|best| score > best.score) {
                    best = Some(Candidate {
                        end,
                        width: candidate_width,
                        score,
                        piece,
                    });
                }
            }
            let Some(best) = best else {
                break;
            };
            log::trace!(
                "best break for {start}..{run_end} is {} (width {}, score {})",
                best.end,
                best.width,
                best.score
            );

            if !lines.is_empty() && width < lines.advance() + best.width {
                log::trace!("line full at byte {start}");
                lines.flush();
                continue;
            }

            let end = best.end;
            match best.piece {
                Piece::Cached => {
                    if let Some(glyphs) = props.glyphs(&(start..end)) {
                        lines.push(model.extract(glyphs, start..end));
                    }
                }
                Piece::Reshaped(shaped) => {
                    if let Some(shaped) = shaped {
                        lines.push(shaped);
                    }
                    if end < run_end {
                        // The old model no longer lines up with the rest of
                        // the run.
                        match shape_run(engine, scratch, text, &run.slice(end..run_end)) {
                            Some(remainder) => {
                                model = remainder;
                                props = TextProps::new(&model);
                            }
                            None => props = TextProps::default(),
                        }
                    }
                }
            }
            start = end;
            if start < run_end {
                lines.flush();
            }
        }
    }
    Ok(())
}
