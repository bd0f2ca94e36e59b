// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Load, analyse and optionally log mesh files

use crate::analyzer::Analyzer;
use crate::io::{load_mesh, ReportLog};
use crate::report::AnalysisReport;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Result of analysing one file
pub struct RunResult {
    pub path: PathBuf,
    pub report: AnalysisReport,
    pub duration: Duration,
}

/// Runner for file-based analysis passes
pub struct Runner {
    analyzer: Analyzer,
    log: Option<ReportLog>,
}

impl Runner {
    pub fn new(analyzer: Analyzer) -> Self {
        Self { analyzer, log: None }
    }

    /// Append every report to `log`
    pub fn with_log(mut self, log: ReportLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Load `path` and run one analysis pass over it
    pub fn run(&self, path: &Path) -> Result<RunResult> {
        let start = Instant::now();

        let mesh = load_mesh(path)?;
        let report = self
            .analyzer
            .analyze(&mesh)
            .with_context(|| format!("Failed to analyze {:?}", path))?;

        let duration = start.elapsed();

        if let Some(log) = &self.log {
            log.append(&mesh_name(path), &report)?;
        }

        Ok(RunResult {
            path: path.to_path_buf(),
            report,
            duration,
        })
    }
}

/// File name without extension, used to label a mesh in the report log
pub fn mesh_name(path: &Path) -> String {
    path.file_stem()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Expand directories into the `.stl` files below them, sorted.
///
/// Plain file arguments are kept whatever their extension.
pub fn discover_meshes(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut files: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|path| is_stl(path))
                .collect();
            files.sort();
            found.extend(files);
        } else {
            found.push(input.clone());
        }
    }

    found
}

fn is_stl(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("stl"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_meshes() -> Result<()> {
        let dir = TempDir::new()?;
        std::fs::create_dir(dir.path().join("nested"))?;
        std::fs::write(dir.path().join("b.stl"), "")?;
        std::fs::write(dir.path().join("nested").join("a.STL"), "")?;
        std::fs::write(dir.path().join("notes.txt"), "")?;

        let found = discover_meshes(&[dir.path().to_path_buf(), PathBuf::from("single.obj")]);
        assert_eq!(
            found,
            vec![
                dir.path().join("b.stl"),
                dir.path().join("nested").join("a.STL"),
                PathBuf::from("single.obj"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_run_rejects_unsupported_format() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("scan.ply");
        std::fs::write(&path, "ply\n")?;
        let err = match Runner::new(Analyzer::new()).run(&path) {
            Ok(_) => panic!("PLY input should be rejected"),
            Err(err) => err,
        };
        assert!(format!("{:#}", err).contains("Unsupported mesh format '.ply'"));
        Ok(())
    }

    #[test]
    fn test_mesh_name() {
        assert_eq!(mesh_name(Path::new("/scans/bunny.stl")), "bunny");
        assert_eq!(mesh_name(Path::new("scan.v2.STL")), "scan.v2");
        assert_eq!(mesh_name(Path::new("noext")), "noext");
    }
}
