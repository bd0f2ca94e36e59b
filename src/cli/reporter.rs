// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::report::AnalysisReport;
use colored::*;
use std::time::Duration;

/// Aspect ratio above which triangle quality is flagged
const POOR_ASPECT_RATIO: f64 = 2.0;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report one analysed mesh with colors
    pub fn report_analysis(file: &str, report: &AnalysisReport, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Mesh:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        if report.watertight {
            println!("{} {}", "✅".green(), "Watertight".green().bold());
        } else {
            println!("{} {}", "⚠️ ".yellow(), "Not watertight".yellow().bold());
        }

        println!("\n{}", "Geometry:".bold());
        Self::print_field("Vertices", report.vertices.to_string().cyan());
        Self::print_field("Triangles", report.triangles.to_string().cyan());
        Self::print_field("Surface area", format!("{:.4}", report.surface_area).cyan());
        Self::print_field(
            "Volume",
            report
                .volume
                .map_or_else(|| "n/a".bright_black(), |v| format!("{:.4}", v).cyan()),
        );
        Self::print_field("Hull volume", format!("{:.4}", report.convex_hull_volume).cyan());
        Self::print_field("Approx. thickness", format!("{:.4}", report.approx_thickness).cyan());

        println!("\n{}", "Quality:".bold());
        Self::print_field("Avg edge length", format!("{:.4}", report.average_edge_length).cyan());
        let ratio = format!("{:.3}", report.average_triangle_aspect_ratio);
        Self::print_field(
            "Avg aspect ratio",
            if report.average_triangle_aspect_ratio > POOR_ASPECT_RATIO {
                ratio.red()
            } else {
                ratio.green()
            },
        );
        Self::print_field(
            "Curvature proxy",
            format!(
                "{:.3} / {:.3} / {:.3}",
                report.min_curvature, report.average_curvature, report.max_curvature
            )
            .cyan(),
        );

        println!("\n{}", "Topology:".bold());
        Self::print_field("Euler characteristic", report.euler_characteristic.to_string().cyan());
        Self::print_field(
            "Genus estimate",
            report
                .genus_estimate
                .map_or_else(|| "n/a".bright_black(), |g| g.to_string().cyan()),
        );
        Self::print_field("Components", report.connected_components.to_string().cyan());
        Self::print_field(
            "Non-manifold edges",
            Self::count(report.non_manifold_edge_count),
        );
        Self::print_field("Sharp edges", report.sharp_edge_count.to_string().cyan());

        for warning in &report.warnings {
            Self::report_warning(warning);
        }

        println!(
            "\n  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Summary line after a batch
    pub fn report_summary(analysed: usize, failed: usize) {
        let failed_str = if failed > 0 {
            failed.to_string().red()
        } else {
            failed.to_string().green()
        };
        println!(
            "\n{} {} {} {}",
            "Analysed:".bold(),
            analysed.to_string().cyan(),
            "Failed:".bold(),
            failed_str
        );
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("  {} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    fn print_field(name: &str, value: ColoredString) {
        println!("  {} {}", format!("{}:", name).bright_black(), value);
    }

    fn count(value: usize) -> ColoredString {
        if value == 0 {
            value.to_string().green()
        } else {
            value.to_string().red()
        }
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }
}
