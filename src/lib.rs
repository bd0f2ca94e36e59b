// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scanalyzer Metric Engine
//!
//! Turns triangle mesh buffers into an [`AnalysisReport`] of shape-quality
//! and topology descriptors: mean edge length, triangle aspect ratio, a
//! neighbour-distance curvature proxy, Euler characteristic, genus estimate
//! and sharp-edge count, plus pass-through primitives from a pluggable
//! [`GeometryKernel`].
//!
//! The engine performs no file I/O and keeps no state between passes. The
//! [`io`] and [`cli`] modules are collaborators built on top of it.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod kernel;
pub mod metrics;
pub mod report;

pub use analyzer::Analyzer;
pub use config::AnalysisConfig;
pub use error::{AnalysisError, InvalidMeshError, MetricError};
pub use geometry::{BoundingBox, MeshBuffers, MeshPrimitives, Primitive};
pub use kernel::{GeometryKernel, NativeKernel};
pub use metrics::CancelToken;
pub use report::AnalysisReport;

/// Analyze `mesh` with the native kernel and default settings
pub fn analyze(mesh: &MeshBuffers) -> Result<AnalysisReport, AnalysisError> {
    Analyzer::new().analyze(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_basic_cube() {
        let mesh = Primitive::cube(Vector3::new(10.0, 10.0, 10.0), true).to_mesh();
        let report = analyze(&mesh).unwrap();
        assert_eq!(report.triangles, 12);
        assert_eq!(report.genus_estimate, Some(0));
    }
}
