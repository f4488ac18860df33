mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use regex::Regex;
use std::path::PathBuf;
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    input: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("quiz");
        std::fs::create_dir(&input).unwrap();
        common::write_csv_dir(&input, &common::sample_snapshot());
        Self { dir, input }
    }
}

fn processed_count(stdout: &str) -> Option<usize> {
    let re = Regex::new(r"Processed (\d+) students").unwrap();
    re.captures(stdout).and_then(|c| c[1].parse().ok())
}

#[test]
fn test_cli_generate_reports_count_and_path() {
    let ctx = TestContext::new();
    let output = ctx.dir.path().join("out.xlsx");

    let result = cargo_bin_cmd!("scoreforge")
        .arg("generate")
        .arg(&ctx.input)
        .arg("--output")
        .arg(&output)
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(processed_count(&stdout), Some(3));
    assert!(stdout.contains("out.xlsx"));
    assert!(output.exists());
}

#[test]
fn test_cli_generate_default_output_name() {
    let ctx = TestContext::new();
    let result = cargo_bin_cmd!("scoreforge")
        .args(["generate", "--debug"])
        .arg(&ctx.input)
        .output()
        .unwrap();

    assert!(result.status.success());
    assert!(ctx.dir.path().join("quiz_出力.xlsx").exists());
}

#[test]
fn test_cli_check_prints_tables_without_writing() {
    let ctx = TestContext::new();
    let result = cargo_bin_cmd!("scoreforge")
        .arg("check")
        .arg(&ctx.input)
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(result.status.success());
    for name in ["田中", "佐藤", "鈴木", "語彙", "文法"] {
        assert!(stdout.contains(name), "missing '{}' in:\n{}", name, stdout);
    }

    // The 田中 row: 7 of 10 points, 70%, rating 3.
    let row = Regex::new(r"\|\s*田中\s*\|\s*7\.0/10\.0\s*\|\s*70\.0\s*\|\s*3\s*\|").unwrap();
    assert!(row.is_match(&stdout), "stdout:\n{}", stdout);
    assert!(stdout.contains("Checked 3 students"));
    assert!(!ctx.dir.path().join("quiz_出力.xlsx").exists());
}

#[test]
fn test_cli_check_json_output() {
    let ctx = TestContext::new();
    let result = cargo_bin_cmd!("scoreforge")
        .args(["check", "--json", "--student", "佐藤"])
        .arg(&ctx.input)
        .output()
        .unwrap();

    assert!(result.status.success());
    let value: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    let students = value["students"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["name"], "佐藤");
    assert_eq!(students[0]["total_score"], 10.0);
    assert_eq!(value["averages"]["entries"][0][0], "語彙");
}

#[test]
fn test_cli_config_file_and_flag_override() {
    let ctx = TestContext::new();
    std::fs::rename(
        ctx.input.join(format!("{}.csv", common::RUBRIC_SHEET)),
        ctx.input.join("points.csv"),
    )
    .unwrap();
    let config_path = ctx.dir.path().join("layout.json");
    std::fs::write(
        &config_path,
        r#"{ "sheets": { "rubric_sheet_hints": "points" }, "answers": { "answers_stride": 2 } }"#,
    )
    .unwrap();

    let result = cargo_bin_cmd!("scoreforge")
        .args(["check", "--json", "--answers-stride", "3", "--config"])
        .arg(&config_path)
        .arg(&ctx.input)
        .output()
        .unwrap();

    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    let value: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(value["students"][0]["total_score"], 7.0);
}

#[test]
fn test_cli_missing_rubric_fails_with_message() {
    let ctx = TestContext::new();
    std::fs::remove_file(ctx.input.join(format!("{}.csv", common::RUBRIC_SHEET))).unwrap();
    let output = ctx.dir.path().join("out.xlsx");

    let result = cargo_bin_cmd!("scoreforge")
        .arg("generate")
        .arg(&ctx.input)
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Required rubric sheet not found"), "stderr: {}", stderr);
    assert!(!output.exists());
}

#[test]
fn test_cli_rejects_zero_stride() {
    let ctx = TestContext::new();
    let result = cargo_bin_cmd!("scoreforge")
        .args(["check", "--answers-stride", "0"])
        .arg(&ctx.input)
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("--answers-stride"));
}
