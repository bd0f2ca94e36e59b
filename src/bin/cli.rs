// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scanalyzer CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use scanalyzer::cli::{discover_meshes, Reporter, Runner};
use scanalyzer::io::ReportLog;
use scanalyzer::{AnalysisConfig, Analyzer};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scanalyzer")]
#[command(about = "Scanalyzer - shape-quality and topology metrics for triangle meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze STL files (directories are searched recursively)
    Analyze {
        /// Input STL file(s) or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Print one JSON report per line instead of formatted text
        #[arg(long)]
        json: bool,

        /// Dihedral angle (degrees) above which an edge is sharp
        #[arg(long)]
        sharp_angle: Option<f64>,

        /// Append every report to this JSON-lines file
        #[arg(long, value_name = "FILE")]
        log: Option<PathBuf>,

        /// Configuration file (defaults to ./scanalyzer.toml if present)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Run metric components on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            inputs,
            json,
            sharp_angle,
            log,
            config,
            sequential,
        } => {
            let mut config = match config {
                Some(path) => AnalysisConfig::from_file(path)?,
                None => AnalysisConfig::load()?,
            };
            if let Some(degrees) = sharp_angle {
                config.sharp_angle_degrees = degrees;
            }
            if sequential {
                config.parallel = false;
            }
            config.validate()?;

            analyze_command(&inputs, config, log, json)?;
        }
        Commands::Version => {
            println!("Scanalyzer v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "warn" })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn analyze_command(
    inputs: &[PathBuf],
    config: AnalysisConfig,
    log: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let files = discover_meshes(inputs);
    if files.is_empty() {
        Reporter::report_error("No STL files found");
        std::process::exit(1);
    }

    let mut runner = Runner::new(Analyzer::new().with_config(config));
    if let Some(path) = log {
        if !json {
            Reporter::report_info(&format!("Logging reports to {}", path.display()));
        }
        runner = runner.with_log(ReportLog::new(path));
    }

    let mut failed = 0;
    for file in &files {
        match runner.run(file) {
            Ok(result) => {
                if json {
                    println!("{}", result.report.to_json_line()?);
                } else {
                    Reporter::report_analysis(
                        &file.display().to_string(),
                        &result.report,
                        result.duration,
                    );
                }
            }
            Err(e) => {
                failed += 1;
                Reporter::report_error(&format!("{}: {:#}", file.display(), e));
            }
        }
    }

    if !json {
        Reporter::report_summary(files.len() - failed, failed);
    }

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
