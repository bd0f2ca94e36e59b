// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O collaborators - mesh loading and report history
//!
//! Nothing in the analysis engine calls into this module. Loaders hand
//! [`MeshBuffers`](crate::geometry::MeshBuffers) to the engine and the
//! history log records the reports it returns.

pub mod history;
mod loader;

pub use history::{HistoryRecord, ReportLog};
pub use loader::{load_mesh, load_stl, read_stl_from};
