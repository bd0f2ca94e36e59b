// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the analysis engine

use thiserror::Error;

/// Result type for a whole analysis pass.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Result type for a single metric component.
pub type MetricResult<T> = Result<T, MetricError>;

/// Errors that abort an analysis pass.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input buffers are structurally invalid.
    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] InvalidMeshError),

    /// The caller cancelled the pass through its cancel token.
    #[error("analysis cancelled")]
    Cancelled,

    /// The analysis configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Structural problems detected before any metric runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMeshError {
    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index} (mesh has {vertex_count} vertices)")]
    IndexOutOfRange {
        triangle: usize,
        index: usize,
        vertex_count: usize,
    },

    /// A supplied per-element primitive does not match the buffer it describes.
    #[error("precomputed {primitive} has {actual} entries, expected {expected}")]
    PrimitiveLength {
        primitive: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A supplied adjacency list names a vertex that does not exist.
    #[error("adjacency of vertex {vertex} references vertex {neighbor} (mesh has {vertex_count} vertices)")]
    AdjacencyIndex {
        vertex: usize,
        neighbor: usize,
        vertex_count: usize,
    },
}

/// Failure local to one metric component.
///
/// The assembler replaces the affected metric with its neutral default,
/// except for [`MetricError::Cancelled`] which ends the pass.
#[derive(Debug, Error)]
pub enum MetricError {
    /// The component produced NaN or infinity.
    #[error("{metric} is not finite ({value})")]
    NonFinite { metric: &'static str, value: f64 },

    /// The cancel token fired while the component was running.
    #[error("cancelled")]
    Cancelled,

    /// The geometry kernel could not supply a primitive.
    #[error("geometry kernel failed to provide {primitive}: {source}")]
    Kernel {
        primitive: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl MetricError {
    /// Reject NaN and infinite results.
    pub fn ensure_finite(metric: &'static str, value: f64) -> MetricResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(MetricError::NonFinite { metric, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(MetricError::ensure_finite("x", 1.5).unwrap(), 1.5);
        assert!(matches!(
            MetricError::ensure_finite("x", f64::NAN),
            Err(MetricError::NonFinite { metric: "x", .. })
        ));
        assert!(MetricError::ensure_finite("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_invalid_mesh_message() {
        let err = AnalysisError::from(InvalidMeshError::IndexOutOfRange {
            triangle: 2,
            index: 9,
            vertex_count: 4,
        });
        assert_eq!(
            err.to_string(),
            "invalid mesh: triangle 2 references vertex 9 (mesh has 4 vertices)"
        );
    }
}
