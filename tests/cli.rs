use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("cbviz").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cbviz"))
        .stdout(predicate::str::contains("annotate"));
}

#[test]
fn lists_builtin_presets() {
    let mut cmd = Command::cargo_bin("cbviz").unwrap();
    cmd.arg("presets");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("jinjie_matrix_time"))
        .stdout(predicate::str::contains("矩阵大小"));
}

#[test]
fn annotate_prints_snapped_landmarks_as_json() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("jichu_matrix.csv");
    let mut body = String::from("矩阵大小,加速比\n");
    for i in 1..=40 {
        body.push_str(&format!("{},{}\n", i * 50, 1.0 + (i % 5) as f64 * 0.5));
    }
    fs::write(&csv, body).unwrap();

    let mut cmd = Command::cargo_bin("cbviz").unwrap();
    cmd.args(["annotate", "--preset", "jichu_matrix", "--csv"]).arg(&csv);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let lines: Vec<f64> = v["annotations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["line_x"].as_f64().unwrap())
        .collect();
    assert_eq!(lines, [250.0, 1000.0, 1400.0]);
    assert_eq!(v["bands"].as_array().unwrap().len(), 3);
}

#[test]
fn render_with_missing_inputs_succeeds() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("cbviz").unwrap();
    cmd.arg("render")
        .arg("--dir")
        .arg(dir.path())
        .arg("--out-dir")
        .arg(dir.path().join("out"))
        .args(["--only", "jichu_sum"]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("0 rendered, 1 missing, 0 failed"));
}

#[test]
fn unknown_preset_is_an_error() {
    let mut cmd = Command::cargo_bin("cbviz").unwrap();
    cmd.args(["render", "--only", "nope"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown chart `nope`"));
}
