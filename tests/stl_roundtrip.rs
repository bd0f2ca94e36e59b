// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL file in, logged report out

use anyhow::Result;
use approx::assert_relative_eq;
use nalgebra::Vector3;
use scanalyzer::cli::{discover_meshes, Runner};
use scanalyzer::io::{load_stl, ReportLog};
use scanalyzer::{analyze, Analyzer, MeshBuffers, Primitive};
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;

fn write_stl(mesh: &MeshBuffers, path: &Path) -> Result<()> {
    let to_f32 = |p: &nalgebra::Point3<f64>| stl_io::Vertex::new([p.x as f32, p.y as f32, p.z as f32]);
    let triangles: Vec<stl_io::Triangle> = mesh
        .triangles
        .iter()
        .map(|t| {
            let [a, b, c] = mesh.corners(t);
            let n = (b - a).cross(&(c - a)).normalize();
            stl_io::Triangle {
                normal: stl_io::Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [to_f32(&a), to_f32(&b), to_f32(&c)],
            }
        })
        .collect();

    let mut file = File::create(path)?;
    stl_io::write_stl(&mut file, triangles.iter())?;
    Ok(())
}

#[test]
fn test_cube_survives_stl_roundtrip() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("cube.stl");
    let original = Primitive::cube(Vector3::new(10.0, 10.0, 10.0), true).to_mesh();
    write_stl(&original, &path)?;

    let loaded = load_stl(&path)?;
    // Shared corners are welded back together
    assert_eq!(loaded.vertex_count(), 8);
    assert_eq!(loaded.triangle_count(), 12);

    let report = analyze(&loaded)?;
    assert!(report.watertight);
    assert_eq!(report.euler_characteristic, 2);
    assert_eq!(report.genus_estimate, Some(0));
    assert_eq!(report.sharp_edge_count, 12);
    assert_relative_eq!(report.surface_area, 600.0, epsilon = 1e-6);
    assert_relative_eq!(report.volume.unwrap_or_default(), 1000.0, epsilon = 1e-6);
    assert_relative_eq!(report.approx_thickness, 10.0, epsilon = 1e-6);

    Ok(())
}

#[test]
fn test_runner_logs_each_report() -> Result<()> {
    let dir = TempDir::new()?;
    let scans = dir.path().join("scans");
    std::fs::create_dir_all(scans.join("batch"))?;
    write_stl(&Primitive::tetrahedron(1.0).to_mesh(), &scans.join("a_tetra.stl"))?;
    write_stl(&Primitive::torus(3.0, 1.0, 24, 12).to_mesh(), &scans.join("batch").join("b_torus.stl"))?;

    let log = ReportLog::new(dir.path().join("logs").join("reports.jsonl"));
    let runner = Runner::new(Analyzer::new()).with_log(log.clone());

    let files = discover_meshes(&[scans]);
    assert_eq!(files.len(), 2);
    for file in &files {
        runner.run(file)?;
    }

    let records = log.read_all()?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].mesh_name, "a_tetra");
    assert_eq!(records[0].report.genus_estimate, Some(0));
    assert_eq!(records[1].mesh_name, "b_torus");
    assert_eq!(records[1].report.genus_estimate, Some(1));
    assert!(records[0].timestamp <= records[1].timestamp);

    Ok(())
}

#[test]
fn test_runner_reports_unreadable_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("broken.stl");
    std::fs::write(&path, "not an stl file")?;

    let err = match Runner::new(Analyzer::new()).run(&path) {
        Ok(_) => panic!("garbage input should not analyze"),
        Err(err) => err,
    };
    assert!(format!("{:#}", err).contains("broken.stl"));
    Ok(())
}
