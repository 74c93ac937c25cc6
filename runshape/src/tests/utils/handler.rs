// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::{Buffer, Point, RunHandler, RunInfo, Tag};

/// One call made on a [`RunHandler`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    BeginLine,
    RunInfo {
        range: Range<usize>,
        level: u8,
        script: Tag,
        family: Option<String>,
        glyph_count: usize,
        advance: Point,
    },
    CommitRunInfo,
    RunBuffer(Range<usize>),
    CommitRunBuffer(Range<usize>),
    CommitLine,
}

/// The glyph data written for one run.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct RecordedRun {
    pub(crate) range: Range<usize>,
    pub(crate) glyphs: Vec<u16>,
    pub(crate) positions: Vec<Point>,
    pub(crate) offsets: Vec<Point>,
    pub(crate) clusters: Vec<usize>,
}

/// A handler that records every call and every buffer it hands out.
#[derive(Debug, Default)]
pub(crate) struct RecordingHandler {
    pub(crate) events: Vec<Event>,
    pub(crate) runs: Vec<RecordedRun>,
    with_offsets: bool,
    point: Point,
}

impl RecordingHandler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Requests separate glyph offsets in every buffer.
    pub(crate) fn with_offsets(mut self) -> Self {
        self.with_offsets = true;
        self
    }

    /// Sets the point handed out with every buffer.
    pub(crate) fn with_point(mut self, point: Point) -> Self {
        self.point = point;
        self
    }

    /// The byte ranges of the runs of every line, in visual order.
    pub(crate) fn lines(&self) -> Vec<Vec<Range<usize>>> {
        let mut lines = Vec::new();
        for event in &self.events {
            match event {
                Event::BeginLine => lines.push(Vec::new()),
                Event::RunInfo { range, .. } => {
                    if let Some(line) = lines.last_mut() {
                        line.push(range.clone());
                    }
                }
                _ => {}
            }
        }
        lines
    }

    /// Sum of the run advances of every line.
    pub(crate) fn line_widths(&self) -> Vec<f32> {
        let mut widths = Vec::new();
        for event in &self.events {
            match event {
                Event::BeginLine => widths.push(0.),
                Event::RunInfo { advance, .. } => {
                    if let Some(width) = widths.last_mut() {
                        *width += advance.x;
                    }
                }
                _ => {}
            }
        }
        widths
    }

    /// Byte ranges of all runs, sorted.
    pub(crate) fn sorted_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges: Vec<_> = self.lines().into_iter().flatten().collect();
        ranges.sort_by_key(|range| range.start);
        ranges
    }

    pub(crate) fn count(&self, wanted: &Event) -> usize {
        self.events.iter().filter(|event| *event == wanted).count()
    }
}

impl RunHandler for RecordingHandler {
    fn begin_line(&mut self) {
        self.events.push(Event::BeginLine);
    }

    fn run_info(&mut self, info: &RunInfo<'_>) {
        self.events.push(Event::RunInfo {
            range: info.utf8_range.clone(),
            level: info.level,
            script: info.script,
            family: info.font.family_name().map(String::from),
            glyph_count: info.glyph_count,
            advance: info.advance,
        });
    }

    fn commit_run_info(&mut self) {
        self.events.push(Event::CommitRunInfo);
    }

    fn run_buffer(&mut self, info: &RunInfo<'_>) -> Buffer<'_> {
        self.events.push(Event::RunBuffer(info.utf8_range.clone()));
        let count = info.glyph_count;
        self.runs.push(RecordedRun {
            range: info.utf8_range.clone(),
            glyphs: vec![0; count],
            positions: vec![Point::ZERO; count],
            offsets: if self.with_offsets {
                vec![Point::ZERO; count]
            } else {
                Vec::new()
            },
            clusters: vec![0; count],
        });
        let with_offsets = self.with_offsets;
        let point = self.point;
        let index = self.runs.len() - 1;
        let run = &mut self.runs[index];
        Buffer {
            glyphs: &mut run.glyphs,
            positions: &mut run.positions,
            offsets: with_offsets.then_some(&mut run.offsets[..]),
            clusters: Some(&mut run.clusters),
            point,
        }
    }

    fn commit_run_buffer(&mut self, info: &RunInfo<'_>) {
        self.events.push(Event::CommitRunBuffer(info.utf8_range.clone()));
    }

    fn commit_line(&mut self) {
        self.events.push(Event::CommitLine);
    }
}
