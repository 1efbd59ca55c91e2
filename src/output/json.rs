//! JSON output formatting

use crate::trace::TraceReport;

/// Format the report as JSON
pub fn format(report: &TraceReport) -> String {
    serde_json::to_string_pretty(report)
        .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize report: {}"}}"#, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{Finding, TraceStats};
    use chrono::Utc;
    use std::path::PathBuf;

    #[test]
    fn test_json_shape() {
        let report = TraceReport {
            generated_at: Utc::now(),
            keywords: vec!["hierarchy".to_string()],
            findings: vec![Finding {
                keyword: "hierarchy".to_string(),
                field_name: "hierarchyId".to_string(),
                matched_type: "OrderDetail".to_string(),
                file: PathBuf::from("src/OrderDetail.java"),
                path_trace: ["OrderRequest", "OrderDetail"].into_iter().collect(),
            }],
            diagnostics: vec![],
            stats: TraceStats::default(),
        };

        let value: serde_json::Value = serde_json::from_str(&format(&report)).unwrap();
        let finding = &value["findings"][0];
        assert_eq!(finding["field_name"], "hierarchyId");
        assert_eq!(
            finding["path_trace"],
            serde_json::json!(["OrderRequest", "OrderDetail"])
        );
        assert_eq!(value["stats"]["roots"], 0);
    }
}
