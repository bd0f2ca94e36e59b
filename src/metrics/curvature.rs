// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Neighbour-distance curvature proxy
//!
//! This is NOT mean or Gaussian curvature. Each vertex gets the mean
//! Euclidean distance to its edge-connected neighbours, which tracks local
//! sampling density and only loosely follows how sharply the surface bends.
//! The `*_curvature` report fields keep that name for compatibility with
//! existing consumers; treat them as a coarse proxy.

use super::{map_chunks, MetricContext};
use crate::error::{MetricError, MetricResult};
use crate::geometry::MeshBuffers;
use serde::{Deserialize, Serialize};

/// Aggregate of the per-vertex proxy over vertices with neighbours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvatureStats {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    /// Vertices that contributed (those with at least one neighbour)
    pub samples: usize,
}

impl CurvatureStats {
    /// All zeros, used when no vertex has a neighbour
    pub fn zero() -> Self {
        Self {
            min: 0.0,
            mean: 0.0,
            max: 0.0,
            samples: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Accumulator {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn merge(mut self, other: Accumulator) -> Self {
        self.count += other.count;
        self.sum += other.sum;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self
    }
}

/// Mean distance from `vertex` to its neighbours, `None` without neighbours
pub fn vertex_proxy(mesh: &MeshBuffers, vertex: usize, neighbors: &[usize]) -> Option<f64> {
    if neighbors.is_empty() {
        return None;
    }
    let origin = mesh.vertices[vertex];
    let total: f64 = neighbors
        .iter()
        .map(|&n| (mesh.vertices[n] - origin).norm())
        .sum();
    Some(total / neighbors.len() as f64)
}

/// Min, mean and max of [`vertex_proxy`] over the mesh.
///
/// `adjacency` holds one neighbour list per vertex. Isolated vertices are
/// skipped, not counted as zero.
pub fn curvature_stats(
    mesh: &MeshBuffers,
    adjacency: &[Vec<usize>],
    ctx: &MetricContext<'_>,
) -> MetricResult<CurvatureStats> {
    let partials = map_chunks(adjacency, ctx, |offset, chunk| {
        let mut acc = Accumulator::new();
        for (i, neighbors) in chunk.iter().enumerate() {
            if let Some(value) = vertex_proxy(mesh, offset + i, neighbors) {
                acc.push(value);
            }
        }
        acc
    })?;

    let total = partials
        .into_iter()
        .fold(Accumulator::new(), Accumulator::merge);

    if total.count == 0 {
        return Ok(CurvatureStats::zero());
    }

    Ok(CurvatureStats {
        min: MetricError::ensure_finite("min_curvature", total.min)?,
        mean: MetricError::ensure_finite("average_curvature", total.sum / total.count as f64)?,
        max: MetricError::ensure_finite("max_curvature", total.max)?,
        samples: total.count,
    })
}
