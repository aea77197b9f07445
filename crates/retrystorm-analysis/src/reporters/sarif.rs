//! SARIF 2.1.0 reporter for code-scanning integrations.

use serde_json::{json, Value};

use retrystorm_core::constants::{TOOL_NAME, VERSION};

use super::Reporter;
use crate::findings::{FindingKind, FindingReport};

/// SARIF 2.1.0 reporter.
pub struct SarifReporter {
    pub tool_name: String,
    pub tool_version: String,
    /// URI of the topology file every result is located in.
    pub artifact_uri: String,
}

impl SarifReporter {
    pub fn new(artifact_uri: impl Into<String>) -> Self {
        Self {
            tool_name: TOOL_NAME.to_string(),
            tool_version: VERSION.to_string(),
            artifact_uri: artifact_uri.into(),
        }
    }

    /// One rule per finding kind present, in kind order.
    fn build_rules(&self, report: &FindingReport) -> Vec<Value> {
        FindingKind::all()
            .iter()
            .filter(|kind| report.findings.iter().any(|f| f.kind == **kind))
            .map(|kind| {
                json!({
                    "id": kind.rule_id(),
                    "name": kind.title().replace(' ', ""),
                    "shortDescription": { "text": kind.title() },
                    "fullDescription": { "text": kind.description() },
                    "defaultConfiguration": { "level": kind.severity().sarif_level() }
                })
            })
            .collect()
    }

    fn build_results(&self, report: &FindingReport) -> Vec<Value> {
        report
            .findings
            .iter()
            .map(|finding| {
                json!({
                    "ruleId": finding.kind.rule_id(),
                    "level": finding.severity.sarif_level(),
                    "message": { "text": finding.message },
                    "locations": [{
                        "physicalLocation": {
                            "artifactLocation": { "uri": self.artifact_uri }
                        },
                        "logicalLocations": [{
                            "name": finding.subject.to_string(),
                            "fullyQualifiedName": finding.id,
                        }]
                    }],
                    "partialFingerprints": {
                        "retrystormFindingId/v1": finding.fingerprint
                    },
                    "properties": {
                        "subject": finding.subject,
                        "evidence": finding.evidence,
                    }
                })
            })
            .collect()
    }
}

impl Reporter for SarifReporter {
    fn name(&self) -> &'static str {
        "sarif"
    }

    fn generate(&self, report: &FindingReport) -> Result<String, String> {
        let sarif = json!({
            "$schema": "https://json.schemastore.org/sarif-2.1.0.json",
            "version": "2.1.0",
            "runs": [{
                "tool": {
                    "driver": {
                        "name": self.tool_name,
                        "version": self.tool_version,
                        "rules": self.build_rules(report)
                    }
                },
                "results": self.build_results(report)
            }]
        });

        serde_json::to_string_pretty(&sarif).map_err(|e| e.to_string())
    }
}
