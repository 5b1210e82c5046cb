//! CLI behavior tests against the built binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixture_path, load_fixture};

/// chatburst command isolated from the user's config file
fn chatburst(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chatburst").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(temp.path().join("config.toml"));
    cmd
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout is JSON")
}

#[test]
fn analyze_prints_report_json() {
    let temp = TempDir::new().unwrap();
    let output = chatburst(&temp)
        .arg("analyze")
        .arg(fixture_path("iso.txt"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = stdout_json(&output);
    assert_eq!(json["totalMessages"], 5);
    assert_eq!(json["eventsDetected"], 1);
    assert_eq!(json["events"][0]["tags"][0], "payment");
}

#[test]
fn analyze_rejects_low_quality_with_exit_2() {
    let temp = TempDir::new().unwrap();
    let output = chatburst(&temp)
        .arg("analyze")
        .arg(fixture_path("low_quality.txt"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("parse quality gate"))
        .get_output()
        .stdout
        .clone();

    let json = stdout_json(&output);
    assert_eq!(json["parseSuccessRate"], 0.25);
    assert_eq!(json["failedLines"][0], "1: Chat export");
}

#[test]
fn analyze_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    chatburst(&temp)
        .arg("analyze")
        .arg(temp.path().join("missing.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn analyze_several_files_keeps_input_order() {
    let temp = TempDir::new().unwrap();
    let output = chatburst(&temp)
        .arg("analyze")
        .arg(fixture_path("iso.txt"))
        .arg(fixture_path("bracketed.txt"))
        .arg(fixture_path("dashed.txt"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = stdout_json(&output);
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["events"][0]["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Payment - 2024-07-01",
            "Birthday - 2024-03-12",
            "Meeting - 1989-02-01"
        ]
    );
}

#[test]
fn analyze_several_files_reports_missing_one() {
    let temp = TempDir::new().unwrap();
    let output = chatburst(&temp)
        .arg("analyze")
        .arg(fixture_path("iso.txt"))
        .arg(temp.path().join("missing.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.txt"))
        .get_output()
        .stdout
        .clone();

    assert_eq!(stdout_json(&output).as_array().unwrap().len(), 1);
}

#[test]
fn analyze_writes_out_dir_and_batches() {
    let temp = TempDir::new().unwrap();
    let out_dir = temp.path().join("out");
    let batch_dir = temp.path().join("batches");

    chatburst(&temp)
        .arg("analyze")
        .arg(fixture_path("bracketed.txt"))
        .arg("--out-dir")
        .arg(&out_dir)
        .arg("--batch-dir")
        .arg(&batch_dir)
        .arg("--batch-size")
        .arg("4")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join("bracketed.json")).unwrap())
            .unwrap();
    assert_eq!(report["totalMessages"], 7);

    assert!(batch_dir.join("messages-0001.jsonl").exists());
    assert!(batch_dir.join("messages-0002.jsonl").exists());
    assert!(!batch_dir.join("messages-0003.jsonl").exists());
    assert!(batch_dir.join("events.json").exists());
}

#[test]
fn analyze_refuses_inputs_sharing_an_output_name() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("a").join("chat.txt");
    let second = temp.path().join("b").join("chat.txt");
    fs::create_dir_all(first.parent().unwrap()).unwrap();
    fs::create_dir_all(second.parent().unwrap()).unwrap();
    fs::write(&first, load_fixture("iso.txt")).unwrap();
    fs::write(&second, load_fixture("dashed.txt")).unwrap();
    let out_dir = temp.path().join("out");

    chatburst(&temp)
        .arg("analyze")
        .arg(&first)
        .arg(&second)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("share the name 'chat'"));
    assert!(!out_dir.exists());

    let batch_dir = temp.path().join("batches");
    chatburst(&temp)
        .arg("analyze")
        .arg(&first)
        .arg(&second)
        .arg("--batch-dir")
        .arg(&batch_dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("share the name 'chat'"));
    assert!(!batch_dir.exists());
}

#[test]
fn analyze_export_failure_keeps_other_results() {
    let temp = TempDir::new().unwrap();
    let blocked = temp.path().join("not-a-dir");
    fs::write(&blocked, "occupied").unwrap();

    let output = chatburst(&temp)
        .arg("analyze")
        .arg(fixture_path("low_quality.txt"))
        .arg(fixture_path("bracketed.txt"))
        .arg("--batch-dir")
        .arg(&blocked)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error: bracketed.txt"))
        .get_output()
        .stdout
        .clone();

    let documents = stdout_json(&output);
    let documents = documents.as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["parseSuccessRate"], 0.25);
}

#[test]
fn analyze_overrides_change_segmentation() {
    let temp = TempDir::new().unwrap();
    let output = chatburst(&temp)
        .args(["analyze", "--min-burst", "2", "--timezone", "Europe/Rome"])
        .arg(fixture_path("bracketed.txt"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = stdout_json(&output);
    assert_eq!(json["eventsDetected"], 2);
    assert_eq!(json["events"][1]["tags"][0], "travel");
    assert_eq!(json["timezone"], "Europe/Rome");
}

#[test]
fn analyze_invalid_override_fails() {
    let temp = TempDir::new().unwrap();
    chatburst(&temp)
        .args(["analyze", "--min-burst", "0"])
        .arg(fixture_path("iso.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid option"));
}

#[test]
fn config_file_settings_apply() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("config.toml"),
        "[segmentation]\nmin_burst_messages = 6\n",
    )
    .unwrap();

    let output = chatburst(&temp)
        .arg("analyze")
        .arg(fixture_path("iso.txt"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(stdout_json(&output)["eventsDetected"], 0);
}

#[test]
fn parse_prints_json_lines() {
    let temp = TempDir::new().unwrap();
    let output = chatburst(&temp)
        .arg("parse")
        .arg(fixture_path("bracketed.txt"))
        .assert()
        .success()
        .stderr(predicate::str::contains("success rate 100.0%"))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.lines().count(), 7);
    let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
    assert_eq!(first["author"], "Alice");
}

#[test]
fn preview_json_lists_months() {
    let temp = TempDir::new().unwrap();
    let output = chatburst(&temp)
        .args(["preview", "--json"])
        .arg(fixture_path("dashed.txt"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = stdout_json(&output);
    assert_eq!(json[0]["label"], "February 1989");
    assert_eq!(json[0]["count"], 6);
}

#[test]
fn config_init_show_and_path() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");

    chatburst(&temp)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(config_path.exists());

    chatburst(&temp)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    chatburst(&temp)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[segmentation]"))
        .stdout(predicate::str::contains("max_gap_minutes = 10"));

    chatburst(&temp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(path_str(&config_path)));
}

#[test]
fn completions_generate_for_bash() {
    let temp = TempDir::new().unwrap();
    chatburst(&temp)
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chatburst"));
}

#[test]
fn analyze_reads_zip_exports() {
    let temp = TempDir::new().unwrap();
    let zip_path = temp.path().join("export.zip");
    crate::helpers::write_zip(&zip_path, &[("chat.txt", load_fixture("iso.txt").as_str())]);

    let output = chatburst(&temp)
        .arg("analyze")
        .arg(&zip_path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(stdout_json(&output)["totalMessages"], 5);
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}
