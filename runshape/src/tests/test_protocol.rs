// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;

use super::utils::{EmptyEngine, Event, OffsetEngine, RecordingHandler, TestFont, font, shaper};
use crate::iter::{
    SegmentedRunIterator, TrivialFontIterator, TrivialLanguageIterator, TrivialScriptIterator,
};
use crate::{FontHandle, Point, Shaper, Tag};

fn shape(text: &str, width: f32) -> RecordingHandler {
    let mut handler = RecordingHandler::new();
    shaper()
        .shape(text, &font(), true, width, &mut handler, &[])
        .unwrap();
    handler
}

/// Shapes `text` with the given bidi levels and otherwise uniform properties.
fn shape_with_levels(
    text: &str,
    levels: &[(core::ops::Range<usize>, u8)],
    handler: &mut RecordingHandler,
) {
    let mut fonts = TrivialFontIterator::new(font(), text.len());
    let mut bidi = SegmentedRunIterator::new(levels.iter().cloned()).unwrap();
    let mut scripts = TrivialScriptIterator::new(Tag::new(b"Latn"), text.len());
    let mut languages = TrivialLanguageIterator::new("en".into(), text.len());
    shaper()
        .shape_with_iterators(
            text,
            &mut fonts,
            &mut bidi,
            &mut scripts,
            &mut languages,
            &[],
            0.,
            handler,
        )
        .unwrap();
}

#[test]
fn empty_text_is_one_empty_cycle() {
    let handler = shape("", 100.);
    assert_eq!(
        handler.events,
        [Event::BeginLine, Event::CommitRunInfo, Event::CommitLine]
    );
    let handler = shape("", 0.);
    assert_eq!(
        handler.events,
        [Event::BeginLine, Event::CommitRunInfo, Event::CommitLine]
    );
}

#[test]
fn hello_world_is_one_run() {
    let handler = shape("Hello World", 1000.);
    assert_eq!(handler.lines(), [[0..11]]);
    assert_eq!(
        handler.events[1],
        Event::RunInfo {
            range: 0..11,
            level: 0,
            script: Tag::new(b"Latn"),
            family: None,
            glyph_count: 11,
            advance: Point::new(110., 0.),
        }
    );
    assert_eq!(handler.runs.len(), 1, "one buffer requested");
    assert_eq!(handler.runs[0].glyphs.len(), 11);
}

#[test]
fn info_pass_precedes_buffer_pass() {
    // "ab " + two Hebrew letters + " cd"
    let text = "ab \u{05D0}\u{05D1} cd";
    let handler = shape(text, 0.);
    let lines = handler.lines();
    assert_eq!(lines.len(), 1, "no wrapping");
    let runs = lines[0].len();
    assert!(runs >= 3, "bidi splits the text: {lines:?}");
    assert_eq!(
        handler.sorted_ranges(),
        lines[0],
        "an isolated right-to-left run keeps its place"
    );

    let kinds: Vec<_> = handler
        .events
        .iter()
        .map(|event| match event {
            Event::BeginLine => "begin",
            Event::RunInfo { .. } => "info",
            Event::CommitRunInfo => "commit-info",
            Event::RunBuffer(_) => "buffer",
            Event::CommitRunBuffer(_) => "commit-buffer",
            Event::CommitLine => "commit-line",
        })
        .collect();
    let mut expected = vec!["begin"];
    expected.extend(core::iter::repeat_n("info", runs));
    expected.push("commit-info");
    for _ in 0..runs {
        expected.extend(["buffer", "commit-buffer"]);
    }
    expected.push("commit-line");
    assert_eq!(kinds, expected);
}

#[test]
fn runs_are_delivered_in_visual_order() {
    let mut handler = RecordingHandler::new();
    shape_with_levels("abcdef", &[(0..2, 1), (2..4, 2), (4..6, 1)], &mut handler);
    assert_eq!(handler.lines(), [[4..6, 2..4, 0..2]]);
    let buffers: Vec<_> = handler
        .events
        .iter()
        .filter_map(|event| match event {
            Event::RunBuffer(range) => Some(range.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(buffers, [4..6, 2..4, 0..2], "buffers follow the same order");
}

#[test]
fn rtl_glyphs_are_in_visual_order() {
    let mut handler = RecordingHandler::new();
    shape_with_levels("abc", &[(0..3, 1)], &mut handler);
    let run = &handler.runs[0];
    assert_eq!(run.glyphs, ['c' as u16, 'b' as u16, 'a' as u16]);
    assert_eq!(run.clusters, [2, 1, 0]);
    assert_eq!(
        run.positions,
        [Point::new(0., 0.), Point::new(10., 0.), Point::new(20., 0.)]
    );
}

#[test]
fn clusters_are_byte_offsets() {
    let handler = shape("a\u{00E9}b", 0.);
    assert_eq!(handler.runs[0].clusters, [0, 1, 3]);
}

#[test]
fn buffer_point_and_offsets() {
    let mut handler = RecordingHandler::new()
        .with_offsets()
        .with_point(Point::new(5., 7.));
    shaper()
        .shape("abc", &font(), true, 0., &mut handler, &[])
        .unwrap();
    let run = &handler.runs[0];
    assert_eq!(
        run.positions,
        [Point::new(5., 7.), Point::new(15., 7.), Point::new(25., 7.)]
    );
    assert_eq!(run.offsets, [Point::ZERO; 3]);
}

#[test]
fn engine_output_is_flipped_to_y_down() {
    let engine = || OffsetEngine {
        x_offset: 3.,
        y_offset: 2.,
        y_advance: 1.,
    };

    let mut handler = RecordingHandler::new().with_offsets();
    Shaper::new(engine())
        .shape("ab", &font(), true, 0., &mut handler, &[])
        .unwrap();
    let run = &handler.runs[0];
    assert_eq!(run.positions, [Point::new(0., 0.), Point::new(10., -1.)]);
    assert_eq!(run.offsets, [Point::new(3., -2.); 2]);
    let advance = handler.events.iter().find_map(|event| match event {
        Event::RunInfo { advance, .. } => Some(*advance),
        _ => None,
    });
    assert_eq!(advance, Some(Point::new(20., -2.)), "advances accumulate");

    let mut handler = RecordingHandler::new();
    Shaper::new(engine())
        .shape("ab", &font(), true, 0., &mut handler, &[])
        .unwrap();
    assert_eq!(
        handler.runs[0].positions,
        [Point::new(3., -2.), Point::new(13., -3.)],
        "offsets are folded into positions"
    );
}

#[test]
fn runs_without_glyphs_are_dropped() {
    for width in [0., 50.] {
        let mut handler = RecordingHandler::new();
        Shaper::new(EmptyEngine)
            .shape("Hello world", &font(), true, width, &mut handler, &[])
            .unwrap();
        assert_eq!(
            handler.events,
            [Event::BeginLine, Event::CommitRunInfo, Event::CommitLine],
            "one empty cycle at width {width}"
        );
    }
}

#[cfg(feature = "harfrust")]
#[test]
fn harfrust_drops_unreadable_faces() {
    let mut shaper = Shaper::<crate::HarfrustEngine>::default();
    for _ in 0..2 {
        let mut handler = RecordingHandler::new();
        shaper
            .shape("Hello", &font(), true, 40., &mut handler, &[])
            .unwrap();
        assert_eq!(
            handler.events,
            [Event::BeginLine, Event::CommitRunInfo, Event::CommitLine],
            "the test font carries no font tables"
        );
    }
}

#[test]
fn unshapeable_runs_are_skipped() {
    let faceless: FontHandle = Arc::new(TestFont::new(10.).without_face());
    let mut handler = RecordingHandler::new();
    shaper()
        .shape("Hello", &faceless, true, 0., &mut handler, &[])
        .unwrap();
    assert_eq!(
        handler.events,
        [Event::BeginLine, Event::CommitRunInfo, Event::CommitLine],
        "nothing to show, but the line cycle is complete"
    );
}

#[test]
fn glyph_run_collector_places_baselines() {
    let mut collector = crate::GlyphRunCollector::new();
    let mut shaper = shaper().with_line_breaker(Box::new(crate::NoBreaks));
    shaper
        .shape("abc", &font(), true, 0., &mut collector, &[])
        .unwrap();
    let lines = collector.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].baseline, 8., "ascent of a 10px test font");
    assert_eq!(lines[0].width, 30.);
    assert_eq!(
        lines[0].runs[0].positions,
        [Point::new(0., 8.), Point::new(10., 8.), Point::new(20., 8.)]
    );
    assert_eq!(collector.end_point(), Point::new(0., 10.));
}
