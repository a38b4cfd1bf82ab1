//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for the run report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable summary with profile links
    #[default]
    Summary,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Summary => write!(f, "summary"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// A rendered block of output: terminal text plus changelog lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBlock {
    /// Text for the terminal
    pub display: String,
    /// Markdown lines for the changelog
    pub log_lines: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format_display() {
        assert_eq!(ReportFormat::Summary.to_string(), "summary");
        assert_eq!(ReportFormat::Json.to_string(), "json");
        assert_eq!(ReportFormat::default(), ReportFormat::Summary);
    }
}
