// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Analysis pass orchestration
//!
//! Validates the buffers, runs the four metric components (in parallel on
//! the rayon pool unless disabled), pulls pass-through primitives from the
//! geometry kernel and assembles one [`AnalysisReport`].
//!
//! A component failure other than cancellation never aborts the pass: the
//! metric takes its neutral default and a warning is recorded.

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult, MetricError, MetricResult};
use crate::geometry::{BoundingBox, MeshBuffers};
use crate::kernel::{GeometryKernel, NativeKernel};
use crate::metrics::topology::non_manifold_edge_count;
use crate::metrics::{
    average_aspect_ratio, average_edge_length, curvature_stats, genus_estimate, CancelToken,
    CurvatureStats, MetricContext, TopologyAnalyzer, TopologySummary,
};
use crate::report::AnalysisReport;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Computes [`AnalysisReport`]s through an injected [`GeometryKernel`].
///
/// Holds no per-mesh state; one analyzer can serve concurrent passes.
#[derive(Debug, Clone)]
pub struct Analyzer<K = NativeKernel> {
    kernel: K,
    config: AnalysisConfig,
}

impl Analyzer<NativeKernel> {
    pub fn new() -> Self {
        Self::with_kernel(NativeKernel)
    }
}

impl Default for Analyzer<NativeKernel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: GeometryKernel> Analyzer<K> {
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            kernel,
            config: AnalysisConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Run a full pass that cannot be cancelled
    pub fn analyze(&self, mesh: &MeshBuffers) -> AnalysisResult<AnalysisReport> {
        self.analyze_with_cancel(mesh, &CancelToken::new())
    }

    /// Run a full pass, giving up with [`AnalysisError::Cancelled`] once
    /// `cancel` fires.
    pub fn analyze_with_cancel(
        &self,
        mesh: &MeshBuffers,
        cancel: &CancelToken,
    ) -> AnalysisResult<AnalysisReport> {
        self.config.validate()?;
        mesh.validate()?;

        if mesh.is_empty() {
            info!(
                vertices = mesh.vertex_count(),
                triangles = mesh.triangle_count(),
                "empty mesh, skipping metric computation"
            );
            return Ok(AnalysisReport::empty());
        }

        let started = Instant::now();
        let ctx = MetricContext::new(cancel, self.config.cancel_check_interval, self.config.parallel);
        let mut fallback = Fallback::default();

        let watertight = fallback.take(
            "watertight",
            self.primitive("watertight flag", &mesh.precomputed.watertight, || {
                self.kernel.is_watertight(mesh)
            }),
            false,
        )?;

        let ((edges, quality), (curvature, (topology, surface))) = join(
            self.config.parallel,
            || {
                join(
                    self.config.parallel,
                    || timed("edge statistics", || average_edge_length(mesh)),
                    || timed("triangle quality", || average_aspect_ratio(mesh, &ctx)),
                )
            },
            || {
                join(
                    self.config.parallel,
                    || timed("curvature proxy", || self.curvature(mesh, &ctx)),
                    || {
                        join(
                            self.config.parallel,
                            || self.topology(mesh, &ctx),
                            || self.surface(mesh, watertight),
                        )
                    },
                )
            },
        );

        let average_edge_length = fallback.take("average_edge_length", edges, 0.0)?;
        let average_triangle_aspect_ratio =
            fallback.take("average_triangle_aspect_ratio", quality, 0.0)?;
        let curvature = fallback.take("curvature", curvature, CurvatureStats::zero())?;

        let summary = TopologySummary {
            euler_characteristic: topology.euler_characteristic,
            genus_estimate: genus_estimate(topology.euler_characteristic, watertight),
            non_manifold_edge_count: fallback.take(
                "non_manifold_edge_count",
                topology.non_manifold_edge_count,
                0,
            )?,
            connected_components: fallback.take(
                "connected_components",
                topology.connected_components,
                0,
            )?,
            sharp_edge_count: fallback.take("sharp_edge_count", topology.sharp_edge_count, 0)?,
        };

        let surface_area = fallback.take("surface_area", surface.surface_area, 0.0)?;
        let volume = match surface.volume {
            Some(volume) => fallback.take_optional("volume", volume)?,
            None => None,
        };
        let convex_hull_volume = fallback.take("convex_hull_volume", surface.convex_hull_volume, 0.0)?;
        let bounding_box = fallback.take("bounding_box", surface.bounding_box, BoundingBox::zero())?;

        let report = AnalysisReport {
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            surface_area,
            volume,
            convex_hull_volume,
            watertight,
            bounding_box: bounding_box.into(),
            approx_thickness: bounding_box.min_extent(),
            average_edge_length,
            average_triangle_aspect_ratio,
            non_manifold_edge_count: summary.non_manifold_edge_count,
            min_curvature: curvature.min,
            average_curvature: curvature.mean,
            max_curvature: curvature.max,
            euler_characteristic: summary.euler_characteristic,
            genus_estimate: summary.genus_estimate,
            connected_components: summary.connected_components,
            sharp_edge_count: summary.sharp_edge_count,
            warnings: fallback.warnings,
        };

        info!(
            vertices = report.vertices,
            triangles = report.triangles,
            watertight = report.watertight,
            warnings = report.warnings.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis pass complete"
        );

        Ok(report)
    }

    /// Supplied primitive if the caller attached one, else ask the kernel
    fn primitive<T: Clone>(
        &self,
        name: &'static str,
        supplied: &Option<T>,
        compute: impl FnOnce() -> anyhow::Result<T>,
    ) -> MetricResult<T> {
        match supplied {
            Some(value) => Ok(value.clone()),
            None => compute().map_err(|source| MetricError::Kernel {
                primitive: name,
                source,
            }),
        }
    }

    fn curvature(&self, mesh: &MeshBuffers, ctx: &MetricContext<'_>) -> MetricResult<CurvatureStats> {
        match &mesh.precomputed.vertex_adjacency {
            Some(adjacency) => curvature_stats(mesh, adjacency, ctx),
            None => {
                let adjacency = self
                    .kernel
                    .vertex_adjacency(mesh)
                    .map_err(|source| MetricError::Kernel {
                        primitive: "vertex adjacency",
                        source,
                    })?;
                if adjacency.len() != mesh.vertex_count() {
                    return Err(MetricError::Kernel {
                        primitive: "vertex adjacency",
                        source: anyhow::anyhow!(
                            "{} lists for {} vertices",
                            adjacency.len(),
                            mesh.vertex_count()
                        ),
                    });
                }
                curvature_stats(mesh, &adjacency, ctx)
            }
        }
    }

    fn topology(&self, mesh: &MeshBuffers, ctx: &MetricContext<'_>) -> TopologyParts {
        let started = Instant::now();
        let analyzer = TopologyAnalyzer::new(mesh);
        let euler_characteristic = analyzer.euler_characteristic();

        let sharp_edge_count = self
            .primitive("face normals", &mesh.precomputed.face_normals, || {
                self.kernel.face_normals(mesh)
            })
            .and_then(|normals| {
                if normals.len() != mesh.triangle_count() {
                    return Err(MetricError::Kernel {
                        primitive: "face normals",
                        source: anyhow::anyhow!(
                            "{} normals for {} triangles",
                            normals.len(),
                            mesh.triangle_count()
                        ),
                    });
                }
                analyzer.sharp_edge_count(&normals, self.config.sharp_angle_degrees, ctx)
            });

        let non_manifold_edge_count = self
            .primitive("non-manifold edges", &mesh.precomputed.non_manifold_edges, || {
                self.kernel.non_manifold_edges(mesh)
            })
            .map(|edges| non_manifold_edge_count(&edges));

        let connected_components = self.primitive(
            "connected components",
            &mesh.precomputed.connected_components,
            || self.kernel.connected_components(mesh),
        );

        debug!(
            edges = analyzer.incidence().edge_count(),
            euler_characteristic,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "topology"
        );

        TopologyParts {
            euler_characteristic,
            non_manifold_edge_count,
            connected_components,
            sharp_edge_count,
        }
    }

    fn surface(&self, mesh: &MeshBuffers, watertight: bool) -> SurfaceParts {
        let pre = &mesh.precomputed;

        let surface_area = self
            .primitive("surface area", &pre.surface_area, || self.kernel.surface_area(mesh))
            .and_then(|v| MetricError::ensure_finite("surface_area", v));

        // Volume is only defined for closed surfaces
        let volume = watertight.then(|| {
            self.primitive("volume", &pre.volume, || self.kernel.volume(mesh))
                .and_then(|v| MetricError::ensure_finite("volume", v))
        });

        let convex_hull_volume = self
            .primitive("convex hull volume", &pre.convex_hull_volume, || {
                self.kernel.convex_hull_volume(mesh)
            })
            .and_then(|v| MetricError::ensure_finite("convex_hull_volume", v));

        let bounding_box = self
            .primitive("bounding box", &pre.bounding_box, || self.kernel.bounding_box(mesh))
            .and_then(|bbox| {
                if bbox.is_finite() {
                    Ok(bbox)
                } else {
                    Err(MetricError::NonFinite {
                        metric: "bounding_box",
                        value: f64::NAN,
                    })
                }
            });

        SurfaceParts {
            surface_area,
            volume,
            convex_hull_volume,
            bounding_box,
        }
    }
}

/// Raw topology outputs before defaults are applied
struct TopologyParts {
    euler_characteristic: i64,
    non_manifold_edge_count: MetricResult<usize>,
    connected_components: MetricResult<usize>,
    sharp_edge_count: MetricResult<usize>,
}

/// Raw kernel pass-through values before defaults are applied
struct SurfaceParts {
    surface_area: MetricResult<f64>,
    volume: Option<MetricResult<f64>>,
    convex_hull_volume: MetricResult<f64>,
    bounding_box: MetricResult<BoundingBox>,
}

/// Collects warnings for metrics replaced by their neutral default
#[derive(Default)]
struct Fallback {
    warnings: Vec<String>,
}

impl Fallback {
    fn take<T>(&mut self, metric: &'static str, result: MetricResult<T>, default: T) -> AnalysisResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(MetricError::Cancelled) => Err(AnalysisError::Cancelled),
            Err(err) => {
                warn!(metric, error = %err, "metric failed, using neutral default");
                self.warnings.push(format!("{}: {}", metric, err));
                Ok(default)
            }
        }
    }

    /// Like [`Fallback::take`] with `None` as the default
    fn take_optional<T>(&mut self, metric: &'static str, result: MetricResult<T>) -> AnalysisResult<Option<T>> {
        self.take(metric, result.map(Some), None)
    }
}

fn join<A, B, RA, RB>(parallel: bool, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    if parallel {
        rayon::join(a, b)
    } else {
        (a(), b())
    }
}

fn timed<T>(component: &'static str, f: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let result = f();
    debug!(component, elapsed_ms = started.elapsed().as_millis() as u64, "component finished");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{EdgeKey, MeshPrimitives, Primitive};
    use anyhow::{anyhow, Result};
    use nalgebra::{Point3, Vector3};

    /// Kernel whose hull computation always fails
    struct BrokenHull;

    impl GeometryKernel for BrokenHull {
        fn face_normals(&self, mesh: &MeshBuffers) -> Result<Vec<Vector3<f64>>> {
            NativeKernel.face_normals(mesh)
        }
        fn vertex_adjacency(&self, mesh: &MeshBuffers) -> Result<Vec<Vec<usize>>> {
            NativeKernel.vertex_adjacency(mesh)
        }
        fn is_watertight(&self, mesh: &MeshBuffers) -> Result<bool> {
            NativeKernel.is_watertight(mesh)
        }
        fn surface_area(&self, mesh: &MeshBuffers) -> Result<f64> {
            NativeKernel.surface_area(mesh)
        }
        fn volume(&self, mesh: &MeshBuffers) -> Result<f64> {
            NativeKernel.volume(mesh)
        }
        fn convex_hull_volume(&self, _mesh: &MeshBuffers) -> Result<f64> {
            Err(anyhow!("qhull exploded"))
        }
        fn connected_components(&self, mesh: &MeshBuffers) -> Result<usize> {
            NativeKernel.connected_components(mesh)
        }
        fn non_manifold_edges(&self, mesh: &MeshBuffers) -> Result<Vec<EdgeKey>> {
            NativeKernel.non_manifold_edges(mesh)
        }
        fn bounding_box(&self, mesh: &MeshBuffers) -> Result<BoundingBox> {
            NativeKernel.bounding_box(mesh)
        }
    }

    #[test]
    fn test_kernel_failure_is_local() {
        let mesh = Primitive::cube(Vector3::new(2.0, 2.0, 2.0), true).to_mesh();
        let report = Analyzer::with_kernel(BrokenHull).analyze(&mesh).unwrap();

        assert_eq!(report.convex_hull_volume, 0.0);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("convex_hull_volume"));
        assert!(report.warnings[0].contains("qhull exploded"));

        // Everything else still computed
        assert!(report.watertight);
        assert_eq!(report.euler_characteristic, 2);
        assert_eq!(report.sharp_edge_count, 12);
        assert!((report.volume.unwrap() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_precomputed_primitives_win() {
        let mesh = Primitive::cube(Vector3::new(2.0, 2.0, 2.0), true)
            .to_mesh()
            .with_primitives(MeshPrimitives {
                convex_hull_volume: Some(42.0),
                connected_components: Some(3),
                ..Default::default()
            });
        let report = Analyzer::with_kernel(BrokenHull).analyze(&mesh).unwrap();

        assert_eq!(report.convex_hull_volume, 42.0);
        assert_eq!(report.connected_components, 3);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_cancelled_pass() {
        let mesh = Primitive::sphere(1.0, 32).to_mesh();
        let token = CancelToken::new();
        token.cancel();
        let result = Analyzer::new().analyze_with_cancel(&mesh, &token);
        assert!(matches!(result, Err(AnalysisError::Cancelled)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mesh = Primitive::tetrahedron(1.0).to_mesh();
        let analyzer = Analyzer::new().with_config(AnalysisConfig::default().with_sharp_angle(-5.0));
        assert!(matches!(
            analyzer.analyze(&mesh),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_non_finite_vertex_degrades_gracefully() {
        let mesh = MeshBuffers::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, f64::NAN, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let report = Analyzer::new().analyze(&mesh).unwrap();
        assert!(report.is_degraded());
        assert_eq!(report.average_edge_length, 0.0);
        assert_eq!(report.triangles, 1);
        assert_eq!(report.euler_characteristic, 1);
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let mesh = Primitive::torus(3.0, 1.0, 32, 16).to_mesh();
        let parallel = Analyzer::new().analyze(&mesh).unwrap();
        let sequential = Analyzer::new()
            .with_config(AnalysisConfig::default().with_parallel(false))
            .analyze(&mesh)
            .unwrap();
        assert_eq!(parallel, sequential);
    }
}
