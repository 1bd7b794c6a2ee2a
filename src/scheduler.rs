use std::ops::Range;

use rayon::prelude::*;

use crate::config::SimConfig;
use crate::grid::{Cell, Grid};
use crate::rng::RngManager;
use crate::rules::{self, RangeView};
use crate::stats::TickStats;
use crate::terrain::TerrainMask;

/// Run one tick: a parallel sweep over every partition's interior, then a
/// single-threaded sweep over the seam cells, then a stats merge.
///
/// A cell's writes reach at most its edge-clamped 4-neighborhood, so an
/// interior cell (at least one full row away from either end of its flat
/// range) can only touch cells inside its own partition. The leading and
/// trailing `width` cells of each range are the ones that could cross a
/// partition seam; they are swept after the join, with full-grid access.
pub(crate) fn run_tick(
    grid: &mut Grid,
    terrain: &TerrainMask,
    config: &SimConfig,
    rng: &mut RngManager,
    dt: f32,
) -> TickStats {
    let width = grid.width() as usize;
    let ranges = grid.partition(config.workers);
    let worker_streams = rng.streams(ranges.len());
    let mut seam_stream = rng.stream();

    let mut slices: Vec<(Range<usize>, &mut [Cell])> = Vec::with_capacity(ranges.len());
    let mut rest = grid.cells_mut();
    for range in &ranges {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
        slices.push((range.clone(), head));
        rest = tail;
    }

    let locals: Vec<TickStats> = slices
        .into_par_iter()
        .zip(worker_streams.into_par_iter())
        .map(|((range, slice), mut stream)| {
            let mut local = TickStats::default();
            let mut view = RangeView::new(slice, range.start);
            rules::step_span(
                &mut view,
                interior(&range, width),
                terrain,
                config,
                &mut stream,
                dt,
                &mut local,
            );
            local
        })
        .collect();

    let mut stats = TickStats::default();
    for local in &locals {
        stats.merge(local);
    }

    let mut view = RangeView::new(grid.cells_mut(), 0);
    for span in seam_spans(&ranges, width) {
        rules::step_span(
            &mut view,
            span,
            terrain,
            config,
            &mut seam_stream,
            dt,
            &mut stats,
        );
    }

    stats
}

/// The part of a range whose cells cannot write past either end of the
/// range. Ranges shorter than two rows have no interior.
fn interior(range: &Range<usize>, width: usize) -> Range<usize> {
    if range.len() > 2 * width {
        range.start + width..range.end - width
    } else {
        range.start..range.start
    }
}

/// The complement of `interior` for each range, in ascending index order.
fn seam_spans(ranges: &[Range<usize>], width: usize) -> Vec<Range<usize>> {
    let mut spans = Vec::with_capacity(ranges.len() * 2);
    for range in ranges {
        if range.len() > 2 * width {
            spans.push(range.start..range.start + width);
            spans.push(range.end - width..range.end);
        } else if !range.is_empty() {
            spans.push(range.clone());
        }
    }
    spans
}
