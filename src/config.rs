// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Analysis configuration

use crate::error::AnalysisError;
use crate::metrics::DEFAULT_SHARP_ANGLE_DEGREES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of elements between two cancel polls
pub const DEFAULT_CANCEL_CHECK_INTERVAL: usize = 4096;

const CONFIG_FILE: &str = "scanalyzer.toml";

/// Settings for one analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Dihedral angle above which an interior edge counts as sharp
    pub sharp_angle_degrees: f64,
    /// Triangles or vertices processed between cancellation checks
    pub cancel_check_interval: usize,
    /// Run components on the rayon pool
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sharp_angle_degrees: DEFAULT_SHARP_ANGLE_DEGREES,
            cancel_check_interval: DEFAULT_CANCEL_CHECK_INTERVAL,
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    pub fn with_sharp_angle(mut self, degrees: f64) -> Self {
        self.sharp_angle_degrees = degrees;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: AnalysisConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `scanalyzer.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        let config = config.with_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SCANALYZER_*` overrides looked up through `var`
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(angle) = var("SCANALYZER_SHARP_ANGLE") {
            self.sharp_angle_degrees = angle
                .trim()
                .parse()
                .with_context(|| format!("Invalid SCANALYZER_SHARP_ANGLE: {}", angle))?;
        }

        if let Some(interval) = var("SCANALYZER_CANCEL_INTERVAL") {
            self.cancel_check_interval = interval
                .trim()
                .parse()
                .with_context(|| format!("Invalid SCANALYZER_CANCEL_INTERVAL: {}", interval))?;
        }

        if let Some(parallel) = var("SCANALYZER_PARALLEL") {
            self.parallel = parse_flag(&parallel)
                .with_context(|| format!("Invalid SCANALYZER_PARALLEL: {}", parallel))?;
        }

        Ok(self)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(0.0..=180.0).contains(&self.sharp_angle_degrees) {
            return Err(AnalysisError::InvalidConfig(format!(
                "sharp_angle_degrees must be within [0, 180], got {}",
                self.sharp_angle_degrees
            )));
        }
        if self.cancel_check_interval == 0 {
            return Err(AnalysisError::InvalidConfig(
                "cancel_check_interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Boolean environment value: true/false, 1/0, yes/no, on/off
fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {:?}", other),
    }
}
