//! Human-readable output formatting

use crate::trace::{Finding, TraceReport};

/// Format findings for human consumption, one line each, then a summary
pub fn format(report: &TraceReport) -> String {
    let mut output = String::new();

    for finding in &report.findings {
        output.push_str(&format_finding(finding));
        output.push('\n');
    }

    if report.findings.is_empty() {
        output.push_str(&format!(
            "No keyword matches across {} root files ({} types visited)\n",
            report.stats.roots, report.stats.types_visited
        ));
    } else {
        output.push_str(&format!(
            "\nFound {} matches across {} root files ({} types visited)\n",
            report.findings.len(),
            report.stats.roots,
            report.stats.types_visited
        ));
    }

    output
}

/// `Keyword 'k' found in field 'f' of T`, plus the chain for transitive hits
pub fn format_finding(finding: &Finding) -> String {
    let mut line = format!(
        "Keyword '{}' found in field '{}' of {}",
        finding.keyword, finding.field_name, finding.matched_type
    );
    if !finding.is_direct() {
        line.push_str(&format!(" (via {})", finding.path_trace));
    }
    line
}

/// One line per unreadable or missing file, for stderr
pub fn format_diagnostics(report: &TraceReport) -> String {
    report
        .diagnostics
        .iter()
        .map(|d| format!("error: {}\n", d.message))
        .collect()
}
