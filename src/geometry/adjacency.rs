// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Edge keys, edge-to-triangle incidence and vertex neighbourhoods

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Unordered vertex pair, stored with the smaller index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey(pub usize, pub usize);

impl EdgeKey {
    pub fn new(v0: usize, v1: usize) -> Self {
        // Always store edges with smaller index first for consistent hashing
        if v0 <= v1 {
            Self(v0, v1)
        } else {
            Self(v1, v0)
        }
    }
}

/// The three edge keys of a triangle, in corner order
#[inline]
pub fn triangle_edges(t: &[usize; 3]) -> [EdgeKey; 3] {
    [
        EdgeKey::new(t[0], t[1]),
        EdgeKey::new(t[1], t[2]),
        EdgeKey::new(t[2], t[0]),
    ]
}

/// Maps each distinct edge to the triangles containing it.
///
/// One incident triangle marks a boundary edge, two an interior edge,
/// three or more a non-manifold edge.
#[derive(Debug, Clone, Default)]
pub struct EdgeIncidence {
    edge_to_triangles: AHashMap<EdgeKey, Vec<usize>>,
}

impl EdgeIncidence {
    pub fn build(triangles: &[[usize; 3]]) -> Self {
        let mut edge_to_triangles: AHashMap<EdgeKey, Vec<usize>> =
            AHashMap::with_capacity(triangles.len() * 3 / 2);

        for (triangle_idx, triangle) in triangles.iter().enumerate() {
            for edge in triangle_edges(triangle) {
                edge_to_triangles.entry(edge).or_default().push(triangle_idx);
            }
        }

        Self { edge_to_triangles }
    }

    /// Number of distinct edges
    pub fn edge_count(&self) -> usize {
        self.edge_to_triangles.len()
    }

    /// Triangles incident to `edge`, empty if the edge is not in the mesh
    #[cfg(test)]
    fn triangles_for_edge(&self, edge: EdgeKey) -> &[usize] {
        self.edge_to_triangles
            .get(&edge)
            .map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EdgeKey, &[usize])> + '_ {
        self.edge_to_triangles
            .iter()
            .map(|(&edge, triangles)| (edge, triangles.as_slice()))
    }

    /// Edges shared by exactly two triangles, as (edge, first, second)
    pub fn interior_edges(&self) -> impl Iterator<Item = (EdgeKey, usize, usize)> + '_ {
        self.iter().filter_map(|(edge, triangles)| match triangles {
            [a, b] => Some((edge, *a, *b)),
            _ => None,
        })
    }

    #[cfg(test)]
    fn boundary_edge_count(&self) -> usize {
        self.edge_to_triangles
            .values()
            .filter(|triangles| triangles.len() == 1)
            .count()
    }

    /// Edges with three or more incident triangles, sorted
    pub fn non_manifold_edges(&self) -> Vec<EdgeKey> {
        let mut edges: Vec<EdgeKey> = self
            .edge_to_triangles
            .iter()
            .filter(|(_, triangles)| triangles.len() > 2)
            .map(|(&edge, _)| edge)
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Every edge has exactly two incident triangles
    pub fn is_closed(&self) -> bool {
        !self.edge_to_triangles.is_empty()
            && self
                .edge_to_triangles
                .values()
                .all(|triangles| triangles.len() == 2)
    }
}

/// Distinct edge-sharing neighbours of every vertex, sorted ascending.
///
/// Vertices that no triangle references get an empty list.
pub fn vertex_adjacency(vertex_count: usize, triangles: &[[usize; 3]]) -> Vec<Vec<usize>> {
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];

    for triangle in triangles {
        for EdgeKey(a, b) in triangle_edges(triangle) {
            if a == b {
                continue;
            }
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
    }

    for neighbors in &mut adjacency {
        neighbors.sort_unstable();
        neighbors.dedup();
    }

    adjacency
}
