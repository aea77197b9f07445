//! Reporters: output formats for finding reports.
//!
//! 3 formats: human-readable text, JSON, SARIF 2.1.0.

pub mod console;
pub mod json;
pub mod sarif;

use crate::findings::FindingReport;

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, report: &FindingReport) -> Result<String, String>;
}

/// Create a reporter by format name. `artifact_uri` names the topology file
/// in formats that carry locations; `use_color` only affects text output.
pub fn create_reporter(
    format: &str,
    artifact_uri: &str,
    use_color: bool,
) -> Option<Box<dyn Reporter>> {
    match format {
        "text" => Some(Box::new(console::ConsoleReporter::new(use_color))),
        "json" => Some(Box::new(json::JsonReporter)),
        "sarif" => Some(Box::new(sarif::SarifReporter::new(artifact_uri))),
        _ => None,
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    &["text", "json", "sarif"]
}
