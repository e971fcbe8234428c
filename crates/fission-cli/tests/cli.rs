// ─────────────────────────────────────────────────────────────────────
// Fission Chain — Command Line Integration Tests
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

const PROMPT: &str = "Enter the mass of Uranium-235 in grams: ";

fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn fission(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fission"))
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("spawn fission")
}

fn fission_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_fission"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn fission");
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for fission")
}

fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).expect("utf-8 stdout")
}

// ── Text report ─────────────────────────────────────────────────────

#[test]
fn zero_mass_prints_four_report_lines() {
    let out = fission(&["--mass", "0", "--mode", "sequential", "--seed", "1"]);
    assert!(out.status.success());
    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4, "{text}");
    assert_eq!(lines[0], "Uranium-235 atoms: 0.00e0");
    assert_eq!(lines[1], "Uranium-235 atoms fissioned: 0.00e0");
    assert_eq!(lines[2], "Total energy released: 0.00e0 J");
    assert!(lines[3].starts_with("Execution time: "));
    assert!(lines[3].ends_with(" s"));
}

#[test]
fn prompted_mass_is_read_from_stdin() {
    let out = fission_with_stdin(&["--seed", "5", "--threads", "2"], "  1e-18\n");
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with(PROMPT), "{text}");
    // 1e-18 g is about 2562 atoms
    assert!(text.contains("Uranium-235 atoms: 2.56e3"), "{text}");
}

#[test]
fn same_seed_same_totals_across_modes() {
    let seq = fission(&["--mass", "1e-17", "--seed", "11", "--mode", "sequential", "--json"]);
    let par = fission(&["--mass", "1e-17", "--seed", "11", "--threads", "3", "--json"]);
    assert!(seq.status.success() && par.status.success());
    let a: serde_json::Value = serde_json::from_slice(&seq.stdout).unwrap();
    let b: serde_json::Value = serde_json::from_slice(&par.stdout).unwrap();
    assert_eq!(a["fissioned_atoms"], b["fissioned_atoms"]);
    assert_eq!(a["history"], b["history"]);
    assert_eq!(a["mode"]["kind"], "sequential");
}

// ── JSON report ─────────────────────────────────────────────────────

#[test]
fn json_report_is_machine_readable() {
    let out = fission(&["--mass", "0", "--seed", "1", "--json"]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["fissioned_atoms"], 0);
    assert_eq!(v["termination"], "exhausted");
    assert_eq!(v["policy"], "carry-forward-all");
    assert!(v["elapsed_seconds"].as_f64().unwrap() >= 0.0);
}

#[test]
fn json_with_prompted_mass_keeps_stdout_parseable() {
    let out = fission_with_stdin(&["--seed", "1", "--mode", "sequential", "--json"], "0\n");
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["termination"], "exhausted");
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains(PROMPT), "{err}");
}

#[test]
fn unseeded_run_reports_a_replayable_seed() {
    let first = fission(&["--mass", "1e-17", "--mode", "sequential", "--json"]);
    assert!(first.status.success());
    let a: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    let seed = a["seed"].as_u64().expect("seed in report").to_string();

    let replay = fission(&["--mass", "1e-17", "--mode", "sequential", "--json", "--seed", seed.as_str()]);
    let b: serde_json::Value = serde_json::from_slice(&replay.stdout).unwrap();
    assert_eq!(a["history"], b["history"]);
    assert_eq!(a["fissioned_atoms"], b["fissioned_atoms"]);
}

#[test]
fn config_file_sets_policy() {
    let cfg = project_root().join("configs").join("subcritical.json");
    let out = fission(&[
        "--config",
        cfg.to_str().unwrap(),
        "--mass",
        "1e-16",
        "--seed",
        "3",
        "--json",
    ]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["policy"], "subtract-current-generation");
    assert_eq!(v["mode"]["kind"], "sequential");
}

// ── Failures ────────────────────────────────────────────────────────

#[test]
fn negative_mass_exits_with_failure() {
    let out = fission(&["--mass", "-1"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let err = String::from_utf8_lossy(&out.stderr);
    assert_eq!(err.matches("Invalid input").count(), 1, "{err}");
}

#[test]
fn non_numeric_stdin_exits_with_failure() {
    let out = fission_with_stdin(&[], "abc\n");
    assert_eq!(out.status.code(), Some(1));
    assert!(!stdout(&out).contains("Uranium-235 atoms:"));
}

#[test]
fn empty_stdin_exits_with_failure() {
    let out = fission_with_stdin(&[], "");
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn missing_config_exits_with_failure() {
    let out = fission(&["--config", "/nonexistent/run.json", "--mass", "1"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn zero_threads_exits_with_failure() {
    let out = fission(&["--threads", "0", "--mass", "1"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn threads_with_sequential_mode_exits_with_failure() {
    let out = fission(&["--mode", "sequential", "--threads", "4", "--mass", "1"]);
    assert_eq!(out.status.code(), Some(1));
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("--threads"), "{err}");
}
