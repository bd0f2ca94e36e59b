// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Closed reference meshes with known topology
//!
//! All generators share vertices between neighbouring triangles and wind
//! every triangle outward, so edge incidence and normals behave like a
//! welded scan.

use super::MeshBuffers;
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Reference shapes
pub enum Primitive {
    Cube { size: Vector3<f64>, center: bool },
    Sphere { r: f64, segments: u32 },
    Torus { major: f64, minor: f64, rings: u32, sides: u32 },
    Tetrahedron { scale: f64 },
}

impl Primitive {
    pub fn cube(size: Vector3<f64>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    /// UV sphere with single pole vertices (genus 0)
    pub fn sphere(r: f64, segments: u32) -> Self {
        let segments = if segments >= 3 { segments } else { 32 };
        Self::Sphere { r, segments }
    }

    /// Ring torus around the z axis (genus 1)
    pub fn torus(major: f64, minor: f64, rings: u32, sides: u32) -> Self {
        Self::Torus {
            major,
            minor,
            rings: rings.max(3),
            sides: sides.max(3),
        }
    }

    /// Regular tetrahedron inscribed in the cube `[-scale, scale]^3`
    pub fn tetrahedron(scale: f64) -> Self {
        Self::Tetrahedron { scale }
    }

    pub fn to_mesh(&self) -> MeshBuffers {
        match self {
            Self::Cube { size, center } => generate_cube_mesh(*size, *center),
            Self::Sphere { r, segments } => generate_sphere_mesh(*r, *segments),
            Self::Torus {
                major,
                minor,
                rings,
                sides,
            } => generate_torus_mesh(*major, *minor, *rings, *sides),
            Self::Tetrahedron { scale } => generate_tetrahedron_mesh(*scale),
        }
    }
}

fn generate_cube_mesh(size: Vector3<f64>, center: bool) -> MeshBuffers {
    let min = if center { -size / 2.0 } else { Vector3::zeros() };
    let max = min + size;

    let vertices = vec![
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
    ];

    let triangles = vec![
        // Front (z+)
        [4, 5, 6],
        [4, 6, 7],
        // Back (z-)
        [1, 0, 3],
        [1, 3, 2],
        // Right (x+)
        [5, 1, 2],
        [5, 2, 6],
        // Left (x-)
        [0, 4, 7],
        [0, 7, 3],
        // Top (y+)
        [7, 6, 2],
        [7, 2, 3],
        // Bottom (y-)
        [0, 1, 5],
        [0, 5, 4],
    ];

    MeshBuffers::new(vertices, triangles)
}

fn generate_sphere_mesh(radius: f64, segments: u32) -> MeshBuffers {
    let stacks = segments as usize;
    let slices = segments as usize;

    let mut vertices = Vec::with_capacity(2 + (stacks - 1) * slices);
    vertices.push(Point3::new(0.0, radius, 0.0));

    for i in 1..stacks {
        let phi = PI * i as f64 / stacks as f64;
        let y = radius * phi.cos();
        let r = radius * phi.sin();

        for j in 0..slices {
            let theta = 2.0 * PI * j as f64 / slices as f64;
            vertices.push(Point3::new(r * theta.cos(), y, r * theta.sin()));
        }
    }

    let south = vertices.len();
    vertices.push(Point3::new(0.0, -radius, 0.0));

    let ring = |i: usize, j: usize| 1 + (i - 1) * slices + (j % slices);
    let mut triangles = Vec::with_capacity(2 * slices * (stacks - 1));

    // North cap
    for j in 0..slices {
        triangles.push([ring(1, j), 0, ring(1, j + 1)]);
    }

    // Body quads between ring i (upper) and ring i + 1 (lower)
    for i in 1..stacks - 1 {
        for j in 0..slices {
            let (u0, u1) = (ring(i, j), ring(i, j + 1));
            let (l0, l1) = (ring(i + 1, j), ring(i + 1, j + 1));
            triangles.push([l0, u0, l1]);
            triangles.push([u0, u1, l1]);
        }
    }

    // South cap
    for j in 0..slices {
        triangles.push([south, ring(stacks - 1, j), ring(stacks - 1, j + 1)]);
    }

    MeshBuffers::new(vertices, triangles)
}

fn generate_torus_mesh(major: f64, minor: f64, rings: u32, sides: u32) -> MeshBuffers {
    let rings = rings as usize;
    let sides = sides as usize;

    let mut vertices = Vec::with_capacity(rings * sides);
    for i in 0..rings {
        let u = 2.0 * PI * i as f64 / rings as f64;
        for j in 0..sides {
            let v = 2.0 * PI * j as f64 / sides as f64;
            let tube = major + minor * v.cos();
            vertices.push(Point3::new(tube * u.cos(), tube * u.sin(), minor * v.sin()));
        }
    }

    let index = |i: usize, j: usize| (i % rings) * sides + (j % sides);
    let mut triangles = Vec::with_capacity(2 * rings * sides);
    for i in 0..rings {
        for j in 0..sides {
            let p00 = index(i, j);
            let p10 = index(i + 1, j);
            let p01 = index(i, j + 1);
            let p11 = index(i + 1, j + 1);
            triangles.push([p00, p10, p11]);
            triangles.push([p00, p11, p01]);
        }
    }

    MeshBuffers::new(vertices, triangles)
}

fn generate_tetrahedron_mesh(scale: f64) -> MeshBuffers {
    let vertices = vec![
        Point3::new(scale, scale, scale),
        Point3::new(scale, -scale, -scale),
        Point3::new(-scale, scale, -scale),
        Point3::new(-scale, -scale, scale),
    ];
    let triangles = vec![[1, 3, 2], [0, 2, 3], [0, 3, 1], [0, 1, 2]];

    MeshBuffers::new(vertices, triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EdgeIncidence;

    fn euler(mesh: &MeshBuffers) -> i64 {
        let edges = EdgeIncidence::build(&mesh.triangles).edge_count();
        mesh.vertex_count() as i64 - edges as i64 + mesh.triangle_count() as i64
    }

    #[test]
    fn test_cube_generation() {
        let mesh = generate_cube_mesh(Vector3::new(10.0, 10.0, 10.0), false);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(EdgeIncidence::build(&mesh.triangles).is_closed());
        assert_eq!(euler(&mesh), 2);
    }

    #[test]
    fn test_sphere_is_closed() {
        let mesh = generate_sphere_mesh(5.0, 16);
        assert!(mesh.validate().is_ok());
        assert!(EdgeIncidence::build(&mesh.triangles).is_closed());
        assert_eq!(mesh.vertex_count(), 2 + 15 * 16);
        assert_eq!(euler(&mesh), 2);
    }

    #[test]
    fn test_torus_is_closed() {
        let mesh = generate_torus_mesh(4.0, 1.0, 24, 12);
        assert!(mesh.validate().is_ok());
        assert!(EdgeIncidence::build(&mesh.triangles).is_closed());
        assert_eq!(mesh.triangle_count(), 2 * 24 * 12);
        assert_eq!(euler(&mesh), 0);
    }

    #[test]
    fn test_tetrahedron_winding_points_outward() {
        let mesh = generate_tetrahedron_mesh(1.0);
        for t in &mesh.triangles {
            let [a, b, c] = mesh.corners(t);
            let normal = (b - a).cross(&(c - a));
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            assert!(normal.dot(&centroid) > 0.0);
        }
    }
}
