// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL mesh loader

use crate::geometry::MeshBuffers;
use anyhow::{bail, Context, Result};
use nalgebra::Point3;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

/// Load a mesh file, choosing the reader from its extension.
///
/// Only STL is readable. PLY and OBJ are rejected with a clear error rather
/// than being fed to the STL parser; files without an extension are tried
/// as STL.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<MeshBuffers> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        None | Some("stl") => load_stl(path),
        Some(other) => bail!("Unsupported mesh format '.{}' for {:?}, expected .stl", other, path),
    }
}

/// Load an ASCII or binary STL file into welded mesh buffers
pub fn load_stl(path: impl AsRef<Path>) -> Result<MeshBuffers> {
    let path = path.as_ref();
    let mut file = File::open(path).with_context(|| format!("Failed to open STL file: {:?}", path))?;
    read_stl_from(&mut file).with_context(|| format!("Failed to load STL file: {:?}", path))
}

/// Read STL data from any seekable reader.
///
/// `stl_io` merges bit-identical corner positions, so triangles that touch
/// in the file share vertex indices here.
pub fn read_stl_from<R: Read + Seek>(reader: &mut R) -> Result<MeshBuffers> {
    let stl = stl_io::read_stl(reader).context("Failed to read STL data")?;

    if stl.faces.is_empty() {
        bail!("File loaded but contains no triangles");
    }

    let vertices = stl
        .vertices
        .iter()
        .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
        .collect();
    let triangles = stl.faces.iter().map(|face| face.vertices).collect();

    Ok(MeshBuffers::new(vertices, triangles))
}
