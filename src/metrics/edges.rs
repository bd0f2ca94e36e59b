// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Edge length statistics

use crate::error::{MetricError, MetricResult};
use crate::geometry::MeshBuffers;

/// Mean length over the three edges of every triangle.
///
/// Shared edges are counted once per incident triangle, so the mean is
/// weighted by local triangle density. The caller must not pass a mesh
/// without triangles.
pub fn average_edge_length(mesh: &MeshBuffers) -> MetricResult<f64> {
    debug_assert!(!mesh.triangles.is_empty());

    let total: f64 = mesh
        .triangles
        .iter()
        .map(|t| {
            let [v0, v1, v2] = mesh.corners(t);
            (v0 - v1).norm() + (v1 - v2).norm() + (v2 - v0).norm()
        })
        .sum();

    let mean = total / (3 * mesh.triangle_count()) as f64;
    MetricError::ensure_finite("average_edge_length", mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_unit_equilateral() {
        let h = 3.0_f64.sqrt() / 2.0;
        let mesh = MeshBuffers::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, h, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let mean = average_edge_length(&mesh).unwrap();
        assert!((mean - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_shared_edge_counted_per_triangle() {
        // Unit square split on its diagonal: 4 sides of 1, diagonal twice
        let mesh = MeshBuffers::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        );
        let expected = (4.0 + 2.0 * 2.0_f64.sqrt()) / 6.0;
        assert!((average_edge_length(&mesh).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_coordinates_are_reported() {
        let mesh = MeshBuffers::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(f64::INFINITY, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        assert!(matches!(
            average_edge_length(&mesh),
            Err(MetricError::NonFinite { .. })
        ));
    }
}
