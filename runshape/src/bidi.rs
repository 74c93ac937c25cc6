// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual reordering of the runs of a line.

use alloc::vec::Vec;

/// Computes the visual order of runs with the given embedding levels, as
/// described by rule L2 of the Unicode bidirectional algorithm.
///
/// The result maps each visual position to the logical index of the run
/// displayed there. Runs are reordered as whole units.
pub fn reorder_visual(levels: &[u8]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..levels.len()).collect();

    // Find the max level and the min *odd* level
    let mut max_level = 0;
    let mut lowest_odd_level = None;
    for &level in levels {
        max_level = max_level.max(level);
        if level & 1 != 0 && lowest_odd_level.is_none_or(|lowest| level < lowest) {
            lowest_odd_level = Some(level);
        }
    }
    let Some(lowest_odd_level) = lowest_odd_level else {
        return order;
    };

    for level in (lowest_odd_level..=max_level).rev() {
        let mut i = 0;
        while i < order.len() {
            if levels[order[i]] < level {
                i += 1;
                continue;
            }
            let mut end = i + 1;
            while end < order.len() && levels[order[end]] >= level {
                end += 1;
            }
            order[i..end].reverse();
            i = end;
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::reorder_visual;

    #[test]
    fn all_ltr_is_identity() {
        assert_eq!(reorder_visual(&[0, 0, 0]), [0, 1, 2]);
    }

    #[test]
    fn all_rtl_is_reversed() {
        assert_eq!(reorder_visual(&[1, 1, 1]), [2, 1, 0]);
    }

    #[test]
    fn embedded_rtl_block_is_reversed_in_place() {
        assert_eq!(reorder_visual(&[0, 1, 1, 0]), [0, 2, 1, 3]);
    }

    #[test]
    fn separated_rtl_runs_are_not_merged() {
        assert_eq!(reorder_visual(&[1, 0, 0, 1]), [0, 1, 2, 3]);
    }

    #[test]
    fn isolated_odd_run_keeps_its_place() {
        assert_eq!(reorder_visual(&[0, 1, 0]), [0, 1, 2]);
    }

    #[test]
    fn nested_levels() {
        // An LTR number (level 2) inside RTL text (level 1).
        assert_eq!(reorder_visual(&[1, 2, 2, 1]), [3, 1, 2, 0]);
    }

    #[test]
    fn even_levels_only_are_identity() {
        assert_eq!(reorder_visual(&[0, 2, 2, 0]), [0, 1, 2, 3]);
    }

    #[test]
    fn empty() {
        assert!(reorder_visual(&[]).is_empty(), "no runs, no order");
    }
}
