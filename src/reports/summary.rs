//! Summary report generator for shell output.
//!
//! Joins the pre-rendered change sections with a header and a footer that
//! says where (or whether) results were saved.

use super::section::ansi_color;
use super::{RenderedBlock, ReportError, ReportFormat, ReportGenerator, RunReport};

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, report: &RunReport, blocks: &[RenderedBlock]) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        let who = match report.profile.as_ref().and_then(|p| p.full_name.as_deref()) {
            Some(name) if !name.trim().is_empty() => format!("@{} ({name})", report.target),
            _ => format!("@{}", report.target),
        };
        lines.push(format!(
            "{}  {}",
            self.color("Instagram Tracker Report", "bold"),
            self.color(&format!("{who} \u{2013} {}", report.timestamp), "dim")
        ));
        lines.push(self.color("\u{2500}".repeat(40).as_str(), "dim"));

        for warning in &report.warnings {
            lines.push(format!("{} {warning}", self.color("warning:", "yellow")));
        }

        for block in blocks {
            lines.push(String::new());
            lines.push(block.display.clone());
        }

        lines.push(String::new());
        if report.dry_run {
            lines.push(self.color("Dry run mode: no files saved.", "yellow"));
        } else {
            if let Some(path) = &report.changelog {
                lines.push(format!(
                    "{}  {}",
                    self.color("Log saved to:", "cyan"),
                    path.display()
                ));
            }
            lines.push(format!(
                "{} Data saved to '{}/' at {}",
                self.color("Tracking complete!", "green"),
                report.data_dir.display(),
                report.timestamp
            ));
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(dry_run: bool) -> RunReport {
        RunReport {
            target: "target".to_string(),
            profile: None,
            timestamp: "2024-03-09_07-05-01".to_string(),
            dry_run,
            data_dir: PathBuf::from("instagram_tracking"),
            categories: vec![],
            warnings: vec!["could not fetch following".to_string()],
            snapshots: vec![],
            changelog: (!dry_run).then(|| {
                PathBuf::from("instagram_tracking/history/2024-03-09_07-05-01_target.md")
            }),
        }
    }

    fn blocks() -> Vec<RenderedBlock> {
        vec![RenderedBlock {
            display: "FOLLOWERS CHANGES".to_string(),
            log_lines: vec![],
        }]
    }

    #[test]
    fn test_dry_run_footer() {
        let out = SummaryReporter::new()
            .no_color()
            .generate(&report(true), &blocks())
            .unwrap();
        assert!(out.contains("@target"));
        assert!(out.contains("FOLLOWERS CHANGES"));
        assert!(out.contains("warning: could not fetch following"));
        assert!(out.ends_with("Dry run mode: no files saved."));
    }

    #[test]
    fn test_saved_footer() {
        let out = SummaryReporter::new()
            .no_color()
            .generate(&report(false), &blocks())
            .unwrap();
        assert!(out.contains("Log saved to:  instagram_tracking/history/2024-03-09_07-05-01_target.md"));
        assert!(out.ends_with("Tracking complete! Data saved to 'instagram_tracking/' at 2024-03-09_07-05-01"));
    }

    #[test]
    fn test_no_color_has_no_escapes() {
        let out = SummaryReporter::new()
            .no_color()
            .generate(&report(false), &blocks())
            .unwrap();
        assert!(!out.contains('\x1b'));
    }
}
