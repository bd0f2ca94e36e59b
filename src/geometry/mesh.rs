// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh buffers and optional precomputed primitives

use super::{BoundingBox, EdgeKey};
use crate::error::InvalidMeshError;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Primitives an external geometry kernel may have computed already.
///
/// Every field is optional. A supplied value is used as-is in place of
/// asking the [`GeometryKernel`](crate::kernel::GeometryKernel).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshPrimitives {
    /// One unit normal per triangle
    pub face_normals: Option<Vec<Vector3<f64>>>,
    /// Distinct edge-sharing neighbours, one list per vertex
    pub vertex_adjacency: Option<Vec<Vec<usize>>>,
    pub watertight: Option<bool>,
    pub surface_area: Option<f64>,
    pub volume: Option<f64>,
    pub convex_hull_volume: Option<f64>,
    pub connected_components: Option<usize>,
    pub non_manifold_edges: Option<Vec<EdgeKey>>,
    pub bounding_box: Option<BoundingBox>,
}

/// Triangulated surface as supplied by a loader or simplifier.
///
/// Treated as read-only for the duration of an analysis pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffers {
    pub vertices: Vec<Point3<f64>>,
    pub triangles: Vec<[usize; 3]>,
    #[serde(default)]
    pub precomputed: MeshPrimitives,
}

impl MeshBuffers {
    pub fn new(vertices: Vec<Point3<f64>>, triangles: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            triangles,
            precomputed: MeshPrimitives::default(),
        }
    }

    /// Attach kernel primitives computed elsewhere
    pub fn with_primitives(mut self, precomputed: MeshPrimitives) -> Self {
        self.precomputed = precomputed;
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when there is nothing to measure
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.triangles.is_empty()
    }

    /// Corner positions of triangle `t`
    #[inline]
    pub fn corners(&self, t: &[usize; 3]) -> [Point3<f64>; 3] {
        [self.vertices[t[0]], self.vertices[t[1]], self.vertices[t[2]]]
    }

    /// Check every index and every supplied primitive against the buffers.
    pub fn validate(&self) -> Result<(), InvalidMeshError> {
        let vertex_count = self.vertices.len();

        for (triangle, indices) in self.triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= vertex_count) {
                return Err(InvalidMeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }

        if let Some(normals) = &self.precomputed.face_normals {
            if normals.len() != self.triangles.len() {
                return Err(InvalidMeshError::PrimitiveLength {
                    primitive: "face normals",
                    expected: self.triangles.len(),
                    actual: normals.len(),
                });
            }
        }

        if let Some(adjacency) = &self.precomputed.vertex_adjacency {
            if adjacency.len() != vertex_count {
                return Err(InvalidMeshError::PrimitiveLength {
                    primitive: "vertex adjacency",
                    expected: vertex_count,
                    actual: adjacency.len(),
                });
            }
            for (vertex, neighbors) in adjacency.iter().enumerate() {
                if let Some(&neighbor) = neighbors.iter().find(|&&n| n >= vertex_count) {
                    return Err(InvalidMeshError::AdjacencyIndex {
                        vertex,
                        neighbor,
                        vertex_count,
                    });
                }
            }
        }

        Ok(())
    }
}
