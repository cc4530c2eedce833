//! Integration tests for the esgx binary on plain-text reports.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ACME_REPORT: &str = "ACME Group Sustainability Report\n\
Scope 1 Emissions: 4,500 tCO2e\n\
Board Diversity: 30%\n\
\u{000c}\
Workforce\n\
| Total Employees | 1,250 | employees |\n\
We are aligned with TCFD.\n";

const GLOBEX_REPORT: &str = "FY 2022 in review.\n\
Total Energy Consumption 82.5 GWh, of which Renewable Energy Share 41 %.\n";

/// Workspace with an empty (all defaults) config file.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), "{}").unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Command pinned to this workspace's config file.
    fn cli(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_esgx"));
        cmd.arg("-c").arg(self.dir.path().join("config.json"));
        cmd
    }
}

#[test]
fn test_process_json_summary() {
    let ws = Workspace::new();
    let input = ws.file("ACME_2024_ESG_Report.txt", ACME_REPORT);

    ws.cli()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""company_name": "ACME""#))
        .stdout(predicate::str::contains(r#""report_year": 2024"#))
        .stdout(predicate::str::contains(r#""scope1_emissions": 4500.0"#))
        .stdout(predicate::str::contains(r#""board_diversity": 30.0"#))
        .stdout(predicate::str::contains(r#""total_employees": 1250.0"#))
        .stdout(predicate::str::contains(r#""tcfd_aligned": true"#));
}

#[test]
fn test_process_csv_rows() {
    let ws = Workspace::new();
    let input = ws.file("ACME_2024_ESG_Report.txt", ACME_REPORT);

    ws.cli()
        .args(["process", "-f", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "company_name,report_year,metric_name,unit,value,year,source_page,source_file,category,json_key",
        ))
        .stdout(predicate::str::contains("ACME,2024,Total Employees,employees,1250,2024,2,"))
        .stdout(predicate::str::contains("TCFD Alignment,boolean,true,2024,2,"));
}

#[test]
fn test_process_writes_output_file() {
    let ws = Workspace::new();
    let input = ws.file("ACME_2024_ESG_Report.txt", ACME_REPORT);
    let output = ws.path().join("rows.json");

    ws.cli()
        .args(["process", "-f", "rows", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let rows: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["json_key"], "scope1_emissions");
    assert_eq!(rows[0]["unit"], "tCO2e");
    assert_eq!(rows[0]["source_page"], 1);
}

#[test]
fn test_process_blank_document_needs_ocr() {
    let ws = Workspace::new();
    let input = ws.file("scan.txt", "  \n\u{000c}\n");

    ws.cli()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs OCR"));
}

#[test]
fn test_process_without_metrics_succeeds() {
    let ws = Workspace::new();
    let input = ws.file("letter.txt", "Dear shareholders, thank you.");

    ws.cli()
        .args(["process", "-f", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("No metrics found."))
        .stderr(predicate::str::contains("No metrics found in"));
}

#[test]
fn test_process_missing_and_unsupported_inputs() {
    let ws = Workspace::new();

    ws.cli()
        .arg("process")
        .arg(ws.path().join("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));

    let docx = ws.file("report.docx", "binary");
    ws.cli()
        .arg("process")
        .arg(&docx)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported document format"));
}

#[test]
fn test_process_with_custom_metrics() {
    let ws = Workspace::new();
    let metrics = ws.file(
        "metrics.json",
        r#"{"metrics": [{
            "canonical_name": "Solar Capacity",
            "json_key": "solar_capacity",
            "category": "environmental",
            "aliases": ["installed solar"],
            "unit_hints": ["MW"]
        }]}"#,
    );
    let input = ws.file("Initech_2023.txt", "Installed  solar: 12.5 MW across sites.");

    ws.cli()
        .arg("-m")
        .arg(&metrics)
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""solar_capacity": 12.5"#))
        .stdout(predicate::str::contains("scope1_emissions").not());
}

#[test]
fn test_batch_writes_summaries_and_combined_csv() {
    let ws = Workspace::new();
    let docs = ws.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("ACME_2024_ESG_Report.txt"), ACME_REPORT).unwrap();
    fs::write(docs.join("Globex_Sustainability.txt"), GLOBEX_REPORT).unwrap();
    fs::write(docs.join("scan.txt"), "\u{000c}").unwrap();
    fs::write(docs.join("notes.md"), "Scope 1 Emissions 1 tCO2e").unwrap();
    let out = ws.path().join("out");

    ws.cli()
        .arg("batch")
        .arg(format!("{}/*", docs.display()))
        .arg("-o")
        .arg(&out)
        .args(["-j", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"))
        .stdout(predicate::str::contains("OCR needed"));

    assert!(out.join("ACME_2024_extracted.json").exists());
    assert!(out.join("Globex_2022_extracted.json").exists());

    let csv = fs::read_to_string(out.join("metrics_extracted.csv")).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 1 + 4 + 2);
    assert!(lines[1].starts_with("ACME,2024,Scope 1 Emissions,"));
    assert!(lines[5].starts_with("Globex,2022,Energy Consumption,GWh,82.5,"));
}

#[test]
fn test_batch_without_metrics() {
    let ws = Workspace::new();
    ws.file("memo.txt", "Nothing measurable.");
    let out = ws.path().join("out");

    ws.cli()
        .arg("batch")
        .arg(format!("{}/*.txt", ws.path().display()))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("No metrics found"));

    assert!(!out.join("metrics_extracted.csv").exists());
}

#[test]
fn test_batch_no_matching_files() {
    let ws = Workspace::new();

    ws.cli()
        .arg("batch")
        .arg(format!("{}/*.pdf", ws.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn test_metrics_list_and_check() {
    let ws = Workspace::new();

    ws.cli()
        .args(["metrics", "list", "--category", "governance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("board_diversity"))
        .stdout(predicate::str::contains("tcfd_aligned"))
        .stdout(predicate::str::contains("scope1_emissions").not());

    let broken = ws.file(
        "broken.json",
        r#"{"metrics": [{"canonical_name": "X", "json_key": "x", "category": "social", "aliases": []}]}"#,
    );
    ws.cli()
        .args(["metrics", "check"])
        .arg(&broken)
        .assert()
        .failure();

    let exported = ws.path().join("exported.json");
    ws.cli()
        .args(["metrics", "export", "-o"])
        .arg(&exported)
        .assert()
        .success();
    ws.cli()
        .args(["metrics", "check"])
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("21 metrics (16 numeric, 5 disclosure)"));
}

#[test]
fn test_config_set_and_get() {
    let ws = Workspace::new();

    ws.cli()
        .args(["config", "set", "extraction.window_chars", "80"])
        .assert()
        .success();

    ws.cli()
        .args(["config", "get", "extraction.window_chars"])
        .assert()
        .success()
        .stdout(predicate::str::diff("80\n"));

    ws.cli()
        .args(["config", "get", "extraction.unknown"])
        .assert()
        .failure();
}
