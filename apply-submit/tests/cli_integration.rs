//! CLI integration tests for apply-submit

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to escape path for TOML on Windows
fn escape_path_for_toml(path: &str) -> String {
    path.replace('\\', "\\\\")
}

/// Temp dir with a config file pointing storage and exports inside it
fn setup_test_env() -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    let db_path = temp_dir.path().join("data").join("storage.db");

    let config_content = format!(
        r#"
[storage]
path = "{}"

[export]
directory = "{}"
"#,
        escape_path_for_toml(&db_path.to_string_lossy()),
        escape_path_for_toml(&temp_dir.path().to_string_lossy())
    );
    fs::write(&config_path, config_content).unwrap();

    (temp_dir, config_path.to_string_lossy().to_string())
}

fn submit_cmd(config_path: &str) -> Command {
    let mut cmd = Command::cargo_bin("apply-submit").unwrap();
    cmd.env("APPLYFORM_CONFIG", config_path)
        .env_remove("APPLYFORM_SUBMIT_ENDPOINT")
        .env_remove("RUST_LOG");
    cmd
}

fn required_args() -> Vec<&'static str> {
    vec![
        "--work-area", "Bangkok",
        "--role1", "Barista",
        "--first-name", "Somchai",
        "--last-name", "Jaidee",
        "--dob", "2000-06-15",
        "--phone", "0812345678",
        "--email", "somchai@example.com",
    ]
}

#[test]
fn test_help_flag_output() {
    Command::cargo_bin("apply-submit")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Submit a job application"))
        .stdout(predicate::str::contains("--work-area"))
        .stdout(predicate::str::contains("--resume"))
        .stdout(predicate::str::contains("--interactive"))
        .stdout(predicate::str::contains("--endpoint"));
}

#[test]
fn test_missing_required_field_exits_with_code_3() {
    let (_temp_dir, config_path) = setup_test_env();

    submit_cmd(&config_path)
        .args(["--work-area", "Bangkok", "--role1", "Barista"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("กรุณากรอก: ชื่อ"))
        .stderr(predicate::str::contains("Missing required field: firstName"));
}

#[test]
fn test_successful_submission_prints_status() {
    let (_temp_dir, config_path) = setup_test_env();

    submit_cmd(&config_path)
        .args(required_args())
        .assert()
        .success()
        .stdout(predicate::str::contains("ส่งใบสมัครเรียบร้อย"));
}

#[test]
fn test_json_output_contains_record() {
    let (_temp_dir, config_path) = setup_test_env();

    let output = submit_cmd(&config_path)
        .args(required_args())
        .args(["--nickname", "  Chai  ", "--resume", "/tmp/docs/cv.pdf", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["firstName"], "Somchai");
    assert_eq!(record["nickname"], "Chai");
    assert_eq!(record["resumeName"], "cv.pdf");
    assert!(record["age"].as_str().unwrap().parse::<u32>().unwrap() >= 24);
    assert!(record["submittedAt"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn test_invalid_format_is_invalid_input() {
    let (_temp_dir, config_path) = setup_test_env();

    submit_cmd(&config_path)
        .args(required_args())
        .args(["--format", "xml"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_unreachable_endpoint_still_succeeds() {
    let (_temp_dir, config_path) = setup_test_env();

    submit_cmd(&config_path)
        .args(required_args())
        .args(["--endpoint", "http://127.0.0.1:9/applications"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ส่งใบสมัครเรียบร้อย"))
        .stderr(predicate::str::contains("Failed posting to endpoint"));
}

#[test]
fn test_interactive_keeps_area_and_role_between_applications() {
    let (_temp_dir, config_path) = setup_test_env();

    // First applicant fills everything; second only changes personal fields
    // and accepts the kept work area and roles by pressing Enter.
    let first = [
        "Phuket", "Cook", "", "Anong", "Suksan", "", "1995-02-10", "", "", "anong@example.com",
        "0811111111", "", "", "", "", "", "",
    ];
    let second = [
        "", "", "", "Boonmee", "Wongsa", "", "1990-10-10", "", "", "boonmee@example.com",
        "0822222222", "", "", "", "", "", "",
    ];
    let mut input = first.join("\n");
    input.push_str("\ny\n");
    input.push_str(&second.join("\n"));
    input.push_str("\nn\n");

    submit_cmd(&config_path)
        .args(["--interactive", "--format", "json"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"firstName\":\"Anong\""))
        .stdout(predicate::str::contains("\"firstName\":\"Boonmee\""))
        .stdout(predicate::str::contains("Work area [Phuket]"))
        .stdout(predicate::str::contains("\"workArea\":\"Phuket\"").count(2));
}

#[test]
fn test_interactive_blank_work_area_finishes_session() {
    let (_temp_dir, config_path) = setup_test_env();

    submit_cmd(&config_path)
        .arg("--interactive")
        .write_stdin("\n".repeat(40))
        .assert()
        .success()
        .stdout(predicate::str::contains("Work area").count(1))
        .stdout(predicate::str::contains("Role (1st choice)").not())
        .stderr(predicate::str::contains("กรุณากรอก").not());
}

#[test]
fn test_interactive_dash_clears_kept_field() {
    let (_temp_dir, config_path) = setup_test_env();

    let first = [
        "Phuket", "Cook", "Cashier", "Anong", "Suksan", "", "1995-02-10", "", "",
        "anong@example.com", "0811111111", "", "", "", "", "", "",
    ];
    let second = [
        "", "", "-", "Boonmee", "Wongsa", "", "1990-10-10", "", "", "boonmee@example.com",
        "0822222222", "", "", "", "", "", "",
    ];
    let mut input = first.join("\n");
    input.push_str("\ny\n");
    input.push_str(&second.join("\n"));
    input.push_str("\nn\n");

    submit_cmd(&config_path)
        .args(["--interactive", "--format", "json"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Role (2nd choice) [Cashier]"))
        .stdout(predicate::str::contains("\"role2\":\"Cashier\"").count(1))
        .stdout(predicate::str::contains("\"role2\":\"\"").count(1))
        .stdout(predicate::str::contains("\"workArea\":\"Phuket\"").count(2));
}
