//! Output formatting

pub mod human;
pub mod json;

use crate::trace::TraceReport;
use serde::{Deserialize, Serialize};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Format a trace report for stdout
pub fn format_report(report: &TraceReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => human::format(report),
        OutputFormat::Json => json::format(report),
    }
}
