// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry kernel capability
//!
//! The metric engine never computes normals, watertightness, hulls or
//! clustering itself. It asks a [`GeometryKernel`] for them, so tests can
//! inject fakes with fixed answers and callers can plug in whatever kernel
//! produced the mesh. [`NativeKernel`] is the built-in implementation.

use crate::geometry::{vertex_adjacency, BoundingBox, EdgeIncidence, EdgeKey, MeshBuffers};
use anyhow::{anyhow, Result};
use nalgebra::{Point3, Vector3};
use parry3d::transformation::try_convex_hull;

/// Mesh primitives supplied by an external geometry kernel.
///
/// Implementations must be pure: the same buffers give the same answers.
pub trait GeometryKernel: Send + Sync {
    /// One unit normal per triangle, in triangle order
    fn face_normals(&self, mesh: &MeshBuffers) -> Result<Vec<Vector3<f64>>>;

    /// Distinct edge-sharing neighbours, one list per vertex
    fn vertex_adjacency(&self, mesh: &MeshBuffers) -> Result<Vec<Vec<usize>>>;

    fn is_watertight(&self, mesh: &MeshBuffers) -> Result<bool>;

    fn surface_area(&self, mesh: &MeshBuffers) -> Result<f64>;

    /// Enclosed volume; only meaningful for watertight meshes
    fn volume(&self, mesh: &MeshBuffers) -> Result<f64>;

    fn convex_hull_volume(&self, mesh: &MeshBuffers) -> Result<f64>;

    /// Number of clusters of triangles connected through shared edges
    fn connected_components(&self, mesh: &MeshBuffers) -> Result<usize>;

    /// Raw list of edges violating 2-manifold structure
    fn non_manifold_edges(&self, mesh: &MeshBuffers) -> Result<Vec<EdgeKey>>;

    fn bounding_box(&self, mesh: &MeshBuffers) -> Result<BoundingBox>;
}

/// Built-in kernel working directly on the index buffers
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeKernel;

impl NativeKernel {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryKernel for NativeKernel {
    fn face_normals(&self, mesh: &MeshBuffers) -> Result<Vec<Vector3<f64>>> {
        Ok(mesh
            .triangles
            .iter()
            .map(|t| {
                let [v0, v1, v2] = mesh.corners(t);
                // Degenerate triangles have no direction; report a zero normal
                (v1 - v0)
                    .cross(&(v2 - v0))
                    .try_normalize(f64::EPSILON)
                    .unwrap_or_else(Vector3::zeros)
            })
            .collect())
    }

    fn vertex_adjacency(&self, mesh: &MeshBuffers) -> Result<Vec<Vec<usize>>> {
        Ok(vertex_adjacency(mesh.vertex_count(), &mesh.triangles))
    }

    /// Every edge shared by exactly two triangles
    fn is_watertight(&self, mesh: &MeshBuffers) -> Result<bool> {
        Ok(EdgeIncidence::build(&mesh.triangles).is_closed())
    }

    fn surface_area(&self, mesh: &MeshBuffers) -> Result<f64> {
        Ok(mesh
            .triangles
            .iter()
            .map(|t| {
                let [v0, v1, v2] = mesh.corners(t);
                (v1 - v0).cross(&(v2 - v0)).norm() / 2.0
            })
            .sum())
    }

    /// Sum of signed tetrahedra against the origin
    fn volume(&self, mesh: &MeshBuffers) -> Result<f64> {
        let signed: f64 = mesh
            .triangles
            .iter()
            .map(|t| {
                let [v0, v1, v2] = mesh.corners(t);
                v0.coords.dot(&v1.coords.cross(&v2.coords)) / 6.0
            })
            .sum();
        Ok(signed.abs())
    }

    fn convex_hull_volume(&self, mesh: &MeshBuffers) -> Result<f64> {
        if mesh.vertices.len() < 4 {
            return Ok(0.0);
        }
        if let Some(i) = mesh.vertices.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(anyhow!("vertex {} has non-finite coordinates", i));
        }

        let points: Vec<Point3<f32>> = mesh.vertices.iter().map(|p| p.cast::<f32>()).collect();
        let (hull_vertices, hull_faces) =
            try_convex_hull(&points).map_err(|e| anyhow!("convex hull failed: {:?}", e))?;

        let signed: f64 = hull_faces
            .iter()
            .map(|face| {
                let a = hull_vertices[face[0] as usize].cast::<f64>();
                let b = hull_vertices[face[1] as usize].cast::<f64>();
                let c = hull_vertices[face[2] as usize].cast::<f64>();
                a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
            })
            .sum();
        Ok(signed.abs())
    }

    fn connected_components(&self, mesh: &MeshBuffers) -> Result<usize> {
        let incidence = EdgeIncidence::build(&mesh.triangles);
        let mut clusters = DisjointSet::new(mesh.triangle_count());

        for (_, triangles) in incidence.iter() {
            if let Some((&first, rest)) = triangles.split_first() {
                for &other in rest {
                    clusters.union(first, other);
                }
            }
        }

        Ok(clusters.count())
    }

    fn non_manifold_edges(&self, mesh: &MeshBuffers) -> Result<Vec<EdgeKey>> {
        Ok(EdgeIncidence::build(&mesh.triangles).non_manifold_edges())
    }

    fn bounding_box(&self, mesh: &MeshBuffers) -> Result<BoundingBox> {
        Ok(BoundingBox::from_points(&mesh.vertices))
    }
}

/// Union-find over triangle indices
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl DisjointSet {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
            sets: size,
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        self.sets -= 1;
    }

    fn count(&self) -> usize {
        self.sets
    }
}
