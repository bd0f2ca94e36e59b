// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Append-only log of analysis reports (one JSON object per line)

use crate::report::AnalysisReport;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// One recorded pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    pub mesh_name: String,
    pub report: AnalysisReport,
}

/// JSON-lines report log
#[derive(Debug, Clone)]
pub struct ReportLog {
    path: PathBuf,
}

impl ReportLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `report` under `mesh_name`, stamped with the current time
    pub fn append(&self, mesh_name: &str, report: &AnalysisReport) -> Result<HistoryRecord> {
        let record = HistoryRecord {
            timestamp: Utc::now(),
            mesh_name: mesh_name.to_string(),
            report: report.clone(),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {:?}", parent))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open report log: {:?}", self.path))?;

        let line = serde_json::to_string(&record).context("Failed to serialize report")?;
        writeln!(file, "{}", line)
            .with_context(|| format!("Failed to write report log: {:?}", self.path))?;

        Ok(record)
    }

    /// All records in file order; a missing log reads as empty
    pub fn read_all(&self) -> Result<Vec<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open report log: {:?}", self.path))?;

        BufReader::new(file)
            .lines()
            .enumerate()
            .filter(|(_, line)| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
            .map(|(number, line)| {
                let line = line.context("Failed to read report log")?;
                serde_json::from_str(&line)
                    .with_context(|| format!("Malformed record on line {}", number + 1))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_and_read_back() -> Result<()> {
        let dir = TempDir::new()?;
        let log = ReportLog::new(dir.path().join("logs").join("history.jsonl"));
        assert!(log.read_all()?.is_empty());

        let mut report = AnalysisReport::empty();
        report.vertices = 8;
        log.append("cube.stl", &report)?;
        log.append("empty.stl", &AnalysisReport::empty())?;

        let records = log.read_all()?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].mesh_name, "cube.stl");
        assert_eq!(records[0].report.vertices, 8);
        assert_eq!(records[1].mesh_name, "empty.stl");
        assert!(records[0].timestamp <= records[1].timestamp);
        Ok(())
    }

    #[test]
    fn test_malformed_line_is_an_error() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("history.jsonl");
        std::fs::write(&path, "{not json}\n")?;
        assert!(ReportLog::new(path).read_all().is_err());
        Ok(())
    }
}
