//! Console reporter: human-readable output with optional color codes.

use super::Reporter;
use crate::findings::{FindingReport, Severity};

/// Console reporter for human-readable terminal output.
pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn marker(&self, severity: &Severity) -> &'static str {
        match severity {
            Severity::Error => "✗",
            Severity::Warning => "⚠",
        }
    }

    fn color_start(&self, severity: &Severity) -> &'static str {
        if !self.use_color {
            return "";
        }
        match severity {
            Severity::Error => "\x1b[31m",   // red
            Severity::Warning => "\x1b[33m", // yellow
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn generate(&self, report: &FindingReport) -> Result<String, String> {
        if report.is_empty() {
            return Ok("✓ No resilience issues found.\n".to_string());
        }

        let mut output = format!("Found {} issue(s):\n\n", report.len());
        for finding in &report.findings {
            output.push_str(&format!(
                "  {}{} {}{} [{}] {}\n",
                self.color_start(&finding.severity),
                self.marker(&finding.severity),
                finding.severity,
                self.color_end(),
                finding.kind.rule_id(),
                finding.message,
            ));
        }

        let summary = &report.summary;
        output.push_str(&format!(
            "\n─── Summary: {} error(s), {} warning(s) ───\n",
            summary.errors, summary.warnings
        ));
        Ok(output)
    }
}
