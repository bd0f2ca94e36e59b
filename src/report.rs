// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Analysis report

use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds as plain coordinate triples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportBounds {
    pub min_bound: [f64; 3],
    pub max_bound: [f64; 3],
}

impl From<BoundingBox> for ReportBounds {
    fn from(bbox: BoundingBox) -> Self {
        Self {
            min_bound: [bbox.min.x, bbox.min.y, bbox.min.z],
            max_bound: [bbox.max.x, bbox.max.y, bbox.max.z],
        }
    }
}

/// Shape-quality and topology descriptors of one mesh.
///
/// Built once per analysis pass and never modified afterwards. `volume` and
/// `genus_estimate` are `None` unless the mesh is watertight.
///
/// The three `*_curvature` fields are a mean neighbour-distance proxy, not
/// differential-geometry curvature; see [`crate::metrics::curvature`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub vertices: usize,
    pub triangles: usize,
    pub surface_area: f64,
    pub volume: Option<f64>,
    pub convex_hull_volume: f64,
    pub watertight: bool,
    pub bounding_box: ReportBounds,
    /// Smallest side of the bounding box
    pub approx_thickness: f64,
    pub average_edge_length: f64,
    pub average_triangle_aspect_ratio: f64,
    pub non_manifold_edge_count: usize,
    pub min_curvature: f64,
    pub average_curvature: f64,
    pub max_curvature: f64,
    pub euler_characteristic: i64,
    pub genus_estimate: Option<i64>,
    pub connected_components: usize,
    pub sharp_edge_count: usize,
    /// Metrics replaced by their neutral default, with the reason
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AnalysisReport {
    /// Report for a mesh without vertices or triangles
    pub fn empty() -> Self {
        Self {
            vertices: 0,
            triangles: 0,
            surface_area: 0.0,
            volume: None,
            convex_hull_volume: 0.0,
            watertight: false,
            bounding_box: BoundingBox::zero().into(),
            approx_thickness: 0.0,
            average_edge_length: 0.0,
            average_triangle_aspect_ratio: 0.0,
            non_manifold_edge_count: 0,
            min_curvature: 0.0,
            average_curvature: 0.0,
            max_curvature: 0.0,
            euler_characteristic: 0,
            genus_estimate: None,
            connected_components: 0,
            sharp_edge_count: 0,
            warnings: Vec::new(),
        }
    }

    /// True when at least one metric fell back to its default
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Single-line JSON, for streams with one report per line
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
