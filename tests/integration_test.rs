/// Integration tests for the router-arena CLI over a fixture data directory
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const LEADERBOARD_JSON: &str = r#"[
    {
        "Router Name": "carrot",
        "Arena Score": 63.87,
        "Optimal Selection Score": 2.68,
        "Optimal Cost Score": 6.7697,
        "Optimal Acc. Score": 78.63,
        "Robustness Score": 93.6,
        "Latency Score": 1.4993,
        "Accuracy": 67.21,
        "Cost per 1k": 2.06
    },
    {
        "Router Name": "routellm",
        "Arena Score": 48.07,
        "Optimal Selection Score": 99.72,
        "Optimal Cost Score": 99.6314,
        "Optimal Acc. Score": 68.76,
        "Robustness Score": 99.8,
        "Latency Score": 0.4016,
        "Accuracy": 47.04,
        "Cost per 1k": 0.27
    },
    {
        "Router Name": "gpt5",
        "Arena Score": 64.32,
        "Optimal Selection Score": null,
        "Optimal Cost Score": null,
        "Optimal Acc. Score": null,
        "Robustness Score": null,
        "Latency Score": null,
        "Accuracy": 73.96,
        "Cost per 1k": 10.02
    }
]"#;

const METADATA_YAML: &str = r#"
carrot:
  name: CARROT
  type: open-source
  description: Cost-aware routing with dual contrastive learning
  affiliation: UMich
  modelPool:
    - GPT-4
    - Claude-3
gpt5:
  name: GPT-5
  type: closed-source
  description: Internal routing for the GPT model family
  affiliation: OpenAI
  modelPool:
    - GPT-5
    - GPT-4
"#;

fn write_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("leaderboard.json"), LEADERBOARD_JSON).unwrap();
    fs::write(dir.path().join("routers.yaml"), METADATA_YAML).unwrap();
    dir
}

/// Test the ranked leaderboard table
#[test]
fn test_leaderboard_text_output() {
    let dir = write_fixture();
    let mut cmd = Command::cargo_bin("router-arena").unwrap();

    cmd.arg("leaderboard")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ROUTER ARENA LEADERBOARD"))
        .stdout(predicate::str::contains("CARROT"))
        .stdout(predicate::str::contains("GPT-5"));
}

/// Test type filtering
#[test]
fn test_leaderboard_type_filter() {
    let dir = write_fixture();
    let mut cmd = Command::cargo_bin("router-arena").unwrap();

    cmd.arg("leaderboard")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--router-type")
        .arg("closed-source")
        .assert()
        .success()
        .stdout(predicate::str::contains("GPT-5"))
        .stdout(predicate::str::contains("CARROT").not());
}

/// Test markdown report output
#[test]
fn test_leaderboard_markdown_format() {
    let dir = write_fixture();
    let mut cmd = Command::cargo_bin("router-arena").unwrap();

    cmd.arg("leaderboard")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--format")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("| Rank | Router |"));
}

/// Test a comparison run over synthesized category entries
#[test]
fn test_compare_spider_output() {
    let dir = write_fixture();
    let mut cmd = Command::cargo_bin("router-arena").unwrap();

    cmd.arg("compare")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--routers")
        .arg("carrot,routellm")
        .assert()
        .success()
        .stdout(predicate::str::contains("Spider axes"));
}

/// Deferral view under the cost metric must auto-revert, never crash
#[test]
fn test_compare_deferral_cost_reverts() {
    let dir = write_fixture();
    let mut cmd = Command::cargo_bin("router-arena").unwrap();

    cmd.arg("compare")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--routers")
        .arg("carrot")
        .arg("--metric")
        .arg("cost")
        .arg("--view")
        .arg("deferral")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deferral curve").not());
}

/// Deferral view with a valid metric plots selected and background points
#[test]
fn test_compare_deferral_output() {
    let dir = write_fixture();
    let mut cmd = Command::cargo_bin("router-arena").unwrap();

    cmd.arg("compare")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--routers")
        .arg("carrot")
        .arg("--view")
        .arg("deferral")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deferral curve"))
        .stdout(predicate::str::contains("CARROT"));
}

/// Unknown routers are a clean error, not a panic
#[test]
fn test_compare_unknown_router_fails() {
    let dir = write_fixture();
    let mut cmd = Command::cargo_bin("router-arena").unwrap();

    cmd.arg("compare")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--routers")
        .arg("ghost")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown router id"));
}

/// Test ad-hoc scoring (needs no data directory)
#[test]
fn test_score_command() {
    let mut cmd = Command::cargo_bin("router-arena").unwrap();

    cmd.arg("score")
        .arg("--accuracy")
        .arg("70")
        .arg("--cost")
        .arg("0.0044")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cost efficiency: 100.00"));
}

/// Test the info summary
#[test]
fn test_info_command() {
    let dir = write_fixture();
    let mut cmd = Command::cargo_bin("router-arena").unwrap();

    cmd.arg("info")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Routers: 3"))
        .stdout(predicate::str::contains("Top ranked:"));
}

/// Missing data directory is a descriptive failure
#[test]
fn test_missing_data_dir_fails() {
    let mut cmd = Command::cargo_bin("router-arena").unwrap();

    cmd.arg("leaderboard")
        .arg("--data-dir")
        .arg("/nonexistent/path")
        .assert()
        .failure();
}
