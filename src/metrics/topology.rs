// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Topological invariants and sharp-edge detection
//!
//! Everything here shares one [`EdgeIncidence`] map built from the triangle
//! buffer. Distinct edges are counted once, unlike the edge-length mean.

use super::MetricContext;
use crate::error::MetricResult;
use crate::geometry::{EdgeIncidence, EdgeKey, MeshBuffers};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Default dihedral threshold above which an interior edge is sharp
pub const DEFAULT_SHARP_ANGLE_DEGREES: f64 = 30.0;

/// Topology fields of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologySummary {
    pub euler_characteristic: i64,
    pub genus_estimate: Option<i64>,
    pub non_manifold_edge_count: usize,
    pub connected_components: usize,
    pub sharp_edge_count: usize,
}

/// Edge-incidence based topology queries over one mesh
pub struct TopologyAnalyzer<'a> {
    mesh: &'a MeshBuffers,
    incidence: EdgeIncidence,
}

impl<'a> TopologyAnalyzer<'a> {
    pub fn new(mesh: &'a MeshBuffers) -> Self {
        Self {
            mesh,
            incidence: EdgeIncidence::build(&mesh.triangles),
        }
    }

    pub fn incidence(&self) -> &EdgeIncidence {
        &self.incidence
    }

    /// `V - E + F` with `E` the number of distinct edges
    pub fn euler_characteristic(&self) -> i64 {
        self.mesh.vertex_count() as i64 - self.incidence.edge_count() as i64
            + self.mesh.triangle_count() as i64
    }

    /// Interior edges whose face normals differ by more than `threshold_degrees`.
    ///
    /// Boundary edges (one triangle) and non-manifold edges (three or more)
    /// are never classified.
    pub fn sharp_edge_count(
        &self,
        normals: &[Vector3<f64>],
        threshold_degrees: f64,
        ctx: &MetricContext<'_>,
    ) -> MetricResult<usize> {
        let threshold = threshold_degrees.to_radians();
        let interval = ctx.check_interval.max(1);
        let mut sharp = 0;

        for (i, (_, a, b)) in self.incidence.interior_edges().enumerate() {
            if i % interval == 0 {
                ctx.cancel.check()?;
            }
            if dihedral_angle(&normals[a], &normals[b]) > threshold {
                sharp += 1;
            }
        }

        Ok(sharp)
    }
}

/// Angle in radians between two face normals, robust to rounding past ±1
pub fn dihedral_angle(n1: &Vector3<f64>, n2: &Vector3<f64>) -> f64 {
    n1.dot(n2).clamp(-1.0, 1.0).acos()
}

/// `(2 - χ) / 2` rounded toward negative infinity, only for watertight meshes.
///
/// The formula holds for one closed connected orientable surface. Over
/// several closed components the whole-mesh χ is summed, so the result is a
/// composite that matches no single component (two spheres give -1).
pub fn genus_estimate(euler_characteristic: i64, watertight: bool) -> Option<i64> {
    watertight.then(|| (2 - euler_characteristic).div_euclid(2))
}

/// Pass-through count of the kernel's raw non-manifold edge list
pub fn non_manifold_edge_count(edges: &[EdgeKey]) -> usize {
    edges.len()
}
