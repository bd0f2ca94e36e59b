// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh buffers, edge structures and reference shapes

mod adjacency;
mod bbox;
mod mesh;
pub mod primitives;

pub use adjacency::{triangle_edges, vertex_adjacency, EdgeIncidence, EdgeKey};
pub use bbox::BoundingBox;
pub use mesh::{MeshBuffers, MeshPrimitives};
pub use primitives::Primitive;
