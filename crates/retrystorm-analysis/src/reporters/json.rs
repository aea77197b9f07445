//! JSON reporter: structured JSON output.

use serde_json::json;

use super::Reporter;
use crate::findings::FindingReport;

/// JSON reporter for machine-readable output.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &FindingReport) -> Result<String, String> {
        let findings: Vec<serde_json::Value> = report
            .findings
            .iter()
            .map(|f| {
                json!({
                    "id": f.id,
                    "kind": f.kind,
                    "severity": f.severity,
                    "subject": f.subject,
                    "message": f.message,
                    "evidence": f.evidence,
                })
            })
            .collect();

        let output = json!({
            "summary": {
                "errors": report.summary.errors,
                "warnings": report.summary.warnings,
                "total": report.summary.total(),
            },
            "findings": findings,
        });

        serde_json::to_string_pretty(&output).map_err(|e| e.to_string())
    }
}
