//! Reporter output tests: text, JSON, SARIF.

use retrystorm_analysis::reporters::{available_formats, create_reporter, Reporter};
use retrystorm_analysis::reporters::console::ConsoleReporter;
use retrystorm_analysis::reporters::json::JsonReporter;
use retrystorm_analysis::reporters::sarif::SarifReporter;
use retrystorm_analysis::{analyze, load_topology_str, AnalysisOptions, FindingReport};

fn sample_report() -> FindingReport {
    let topology = load_topology_str(
        r#"
services:
  gateway:
    timeout: 1s
    retry: 4
    calls: [backend]
  backend:
    timeout: 2s
    retry: 5
"#,
    )
    .unwrap();
    analyze(&topology, &AnalysisOptions::new(10)).unwrap().report
}

#[test]
fn test_console_empty_report() {
    let output = ConsoleReporter::new(false)
        .generate(&FindingReport::default())
        .unwrap();
    assert_eq!(output, "✓ No resilience issues found.\n");
}

#[test]
fn test_console_lists_findings_and_summary() {
    let output = ConsoleReporter::new(false).generate(&sample_report()).unwrap();
    assert!(output.starts_with("Found 3 issue(s):"), "{output}");
    assert!(output.contains("✗ error [retry-amplification] Retry amplification 20x"));
    assert!(output.contains("⚠ warning [timeout-inversion]"));
    assert!(output.contains("⚠ warning [circuit-breaker-gap] 'gateway' calls [backend]"));
    assert!(output.contains("Summary: 1 error(s), 2 warning(s)"));
    assert!(!output.contains("\x1b["));
}

#[test]
fn test_console_color_codes() {
    let output = ConsoleReporter::default().generate(&sample_report()).unwrap();
    assert!(output.contains("\x1b[31m"));
    assert!(output.contains("\x1b[33m"));
    assert!(output.contains("\x1b[0m"));
}

#[test]
fn test_json_structure() {
    let output = JsonReporter.generate(&sample_report()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["summary"]["errors"], 1);
    assert_eq!(value["summary"]["warnings"], 2);
    assert_eq!(value["summary"]["total"], 3);

    let findings = value["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 3);
    let first = &findings[0];
    assert_eq!(first["kind"], "retry-amplification");
    assert_eq!(first["severity"], "error");
    assert_eq!(first["subject"]["type"], "path");
    assert_eq!(first["subject"]["services"][1], "backend");
    assert_eq!(first["evidence"]["type"], "amplification");
    assert_eq!(first["evidence"]["factor"], 20);

    let inversion = &findings[1];
    assert_eq!(inversion["subject"]["type"], "edge");
    assert_eq!(inversion["subject"]["caller"], "gateway");
    assert_eq!(inversion["evidence"]["callee_timeout_ms"], 2000.0);

    assert_eq!(findings[2]["subject"]["type"], "service");
    assert_eq!(
        findings[2]["evidence"]["unprotected_targets"][0],
        "backend"
    );
}

#[test]
fn test_json_empty_report() {
    let output = JsonReporter.generate(&FindingReport::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["summary"]["total"], 0);
    assert!(value["findings"].as_array().unwrap().is_empty());
}

#[test]
fn test_sarif_structure() {
    let report = sample_report();
    let output = SarifReporter::new("topology.yaml").generate(&report).unwrap();
    let sarif: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(sarif["version"], "2.1.0");
    assert!(sarif["$schema"].as_str().unwrap().contains("sarif-2.1.0"));

    let run = &sarif["runs"][0];
    assert_eq!(run["tool"]["driver"]["name"], "retrystorm");
    let rules = run["tool"]["driver"]["rules"].as_array().unwrap();
    let rule_ids: Vec<&str> = rules.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(
        rule_ids,
        vec!["retry-amplification", "timeout-inversion", "circuit-breaker-gap"]
    );
    assert_eq!(rules[0]["defaultConfiguration"]["level"], "error");

    let results = run["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    let first = &results[0];
    assert_eq!(first["ruleId"], "retry-amplification");
    assert_eq!(first["level"], "error");
    assert_eq!(
        first["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
        "topology.yaml"
    );
    assert_eq!(
        first["locations"][0]["logicalLocations"][0]["name"],
        "gateway -> backend"
    );
    assert_eq!(
        first["partialFingerprints"]["retrystormFindingId/v1"],
        report.findings[0].fingerprint.as_str()
    );
    assert_eq!(results[1]["level"], "warning");
}

#[test]
fn test_sarif_rules_only_for_present_kinds() {
    let topology = load_topology_str(
        r#"
services:
  a: { calls: [b] }
  b: {}
"#,
    )
    .unwrap();
    let report = analyze(&topology, &AnalysisOptions::default()).unwrap().report;
    let output = SarifReporter::new("t.yaml").generate(&report).unwrap();
    let sarif: serde_json::Value = serde_json::from_str(&output).unwrap();
    let rules = sarif["runs"][0]["tool"]["driver"]["rules"].as_array().unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0]["id"], "circuit-breaker-gap");
}

#[test]
fn test_create_reporter_by_name() {
    for format in available_formats() {
        let reporter = create_reporter(format, "t.yaml", false).unwrap();
        assert_eq!(reporter.name(), *format);
    }
    assert!(create_reporter("xml", "t.yaml", false).is_none());
}

#[test]
fn test_reporters_are_deterministic() {
    let report = sample_report();
    for format in available_formats() {
        let reporter = create_reporter(format, "t.yaml", false).unwrap();
        assert_eq!(
            reporter.generate(&report).unwrap(),
            reporter.generate(&report).unwrap()
        );
    }
}
