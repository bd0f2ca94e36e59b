// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Metric components
//!
//! Each component reads the same immutable [`MeshBuffers`](crate::geometry::MeshBuffers)
//! and produces a disjoint part of the report. None depends on another.

mod cancel;
pub mod curvature;
pub mod edges;
pub mod quality;
pub mod topology;

pub use cancel::CancelToken;
pub use curvature::{curvature_stats, CurvatureStats};
pub use edges::average_edge_length;
pub use quality::{aspect_ratio, average_aspect_ratio};
pub use topology::{genus_estimate, TopologyAnalyzer, TopologySummary, DEFAULT_SHARP_ANGLE_DEGREES};

use crate::error::MetricResult;
use rayon::prelude::*;

/// Per-pass execution settings shared by the heavy components
#[derive(Debug, Clone, Copy)]
pub struct MetricContext<'a> {
    pub cancel: &'a CancelToken,
    /// Elements processed between two cancel polls
    pub check_interval: usize,
    pub parallel: bool,
}

impl<'a> MetricContext<'a> {
    pub fn new(cancel: &'a CancelToken, check_interval: usize, parallel: bool) -> Self {
        Self {
            cancel,
            check_interval: check_interval.max(1),
            parallel,
        }
    }
}

/// Apply `f` to fixed-size chunks of `items`, polling the cancel token once
/// per chunk.
///
/// `f` receives the index of the chunk's first element. Results come back in
/// chunk order whether or not the work ran in parallel, so reductions over
/// them are reproducible.
pub(crate) fn map_chunks<T, A, F>(items: &[T], ctx: &MetricContext<'_>, f: F) -> MetricResult<Vec<A>>
where
    T: Sync,
    A: Send,
    F: Fn(usize, &[T]) -> A + Sync + Send,
{
    let size = ctx.check_interval;
    let run = |(i, chunk): (usize, &[T])| -> MetricResult<A> {
        ctx.cancel.check()?;
        Ok(f(i * size, chunk))
    };

    if ctx.parallel {
        items.par_chunks(size).enumerate().map(run).collect()
    } else {
        items.chunks(size).enumerate().map(run).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_chunks_offsets_in_order() {
        let token = CancelToken::new();
        let items: Vec<u32> = (0..10).collect();
        for parallel in [false, true] {
            let ctx = MetricContext::new(&token, 4, parallel);
            let offsets = map_chunks(&items, &ctx, |offset, chunk| (offset, chunk.len())).unwrap();
            assert_eq!(offsets, vec![(0, 4), (4, 4), (8, 2)]);
        }
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let token = CancelToken::new();
        assert_eq!(MetricContext::new(&token, 0, false).check_interval, 1);
    }
}
