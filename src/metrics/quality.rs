// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle shape quality

use super::{map_chunks, MetricContext};
use crate::error::{MetricError, MetricResult};
use crate::geometry::MeshBuffers;
use nalgebra::Point3;

/// Area floor for near-degenerate triangles
pub const AREA_EPSILON: f64 = 1e-12;

/// Ratio reported for triangles whose corners all coincide
pub const COLLAPSED_ASPECT_RATIO: f64 = 1.0 / AREA_EPSILON;

/// Normalized radius ratio `R / 2r` of one triangle.
///
/// At least 1.0, exactly 1.0 for an equilateral triangle, and unbounded as
/// the corners approach collinearity. Zero-area triangles are clamped to
/// [`AREA_EPSILON`] instead of failing; triangles collapsed to a point get
/// [`COLLAPSED_ASPECT_RATIO`].
pub fn aspect_ratio(v0: &Point3<f64>, v1: &Point3<f64>, v2: &Point3<f64>) -> f64 {
    let a = (v0 - v1).norm();
    let b = (v1 - v2).norm();
    let c = (v2 - v0).norm();

    let perimeter = a + b + c;
    if perimeter <= AREA_EPSILON {
        return COLLAPSED_ASPECT_RATIO;
    }

    // Heron's formula, clamped against rounding below zero
    let s = perimeter / 2.0;
    let area = (s * (s - a) * (s - b) * (s - c)).max(0.0).sqrt().max(AREA_EPSILON);

    let inradius = 2.0 * area / perimeter;
    let circumradius = (a * b * c) / (4.0 * area);
    (circumradius / (2.0 * inradius)).max(1.0)
}

/// Mean [`aspect_ratio`] over all triangles
pub fn average_aspect_ratio(mesh: &MeshBuffers, ctx: &MetricContext<'_>) -> MetricResult<f64> {
    debug_assert!(!mesh.triangles.is_empty());

    let chunk_sums = map_chunks(&mesh.triangles, ctx, |_, chunk| {
        chunk
            .iter()
            .map(|t| {
                let [v0, v1, v2] = mesh.corners(t);
                aspect_ratio(&v0, &v1, &v2)
            })
            .sum::<f64>()
    })?;

    let mean = chunk_sums.iter().sum::<f64>() / mesh.triangle_count() as f64;
    MetricError::ensure_finite("average_triangle_aspect_ratio", mean)
}
