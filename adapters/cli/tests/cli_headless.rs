use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_maze-chase"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch maze-chase")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is utf-8")
}

#[test]
fn headless_run_prints_board_and_final_score() {
    let output = run_cli(&["--headless", "--seed", "7", "--moves", "RRRR"]);
    assert!(output.status.success(), "headless run failed: {output:?}");

    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.first(), Some(&"###################"));
    assert!(lines.iter().any(|line| line.contains('P') || line.contains('X')));
    assert!(lines
        .last()
        .is_some_and(|line| line.starts_with("Final Score: ")));
}

#[test]
fn headless_runs_with_the_same_seed_match() {
    let args = ["--headless", "--seed", "99", "--moves", "RRRRDDLL..RRRR", "--max-ticks", "40"];

    let first = run_cli(&args);
    let second = run_cli(&args);

    assert!(first.status.success());
    assert_eq!(stdout_of(&first), stdout_of(&second));
}

#[test]
fn json_report_describes_the_session() {
    let output = run_cli(&["--headless", "--seed", "5", "--moves", "R.R", "--json"]);
    assert!(output.status.success(), "headless run failed: {output:?}");

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is a single JSON document");
    assert_eq!(report["seed"], 5);
    assert!(report["ticks"].as_u64().is_some_and(|ticks| ticks <= 3));
    assert!(report["score"].as_u64().is_some());
    assert_eq!(report["adversaries"].as_array().map(Vec::len), Some(2));
}

#[test]
fn unknown_move_letter_is_rejected() {
    let output = run_cli(&["--headless", "--moves", "RZ"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid move script"), "stderr: {stderr}");
}

#[test]
fn moves_require_headless_mode() {
    let output = run_cli(&["--moves", "RR"]);

    assert!(!output.status.success());
}

fn stderr_with_log_filter(filter: &str, extra: &[&str]) -> String {
    let mut args = vec!["--headless", "--seed", "3", "--moves", "RRR"];
    args.extend_from_slice(extra);
    let output = Command::new(env!("CARGO_BIN_EXE_maze-chase"))
        .args(&args)
        .env("RUST_LOG", filter)
        .output()
        .expect("failed to launch maze-chase");
    assert!(output.status.success(), "headless run failed: {output:?}");
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn rust_log_controls_the_log_level() {
    let debug = stderr_with_log_filter("debug", &[]);
    assert!(debug.contains("DEBUG"), "stderr: {debug}");

    let quiet = stderr_with_log_filter("error", &[]);
    assert!(!quiet.contains("INFO"), "stderr: {quiet}");
    assert!(!quiet.contains("DEBUG"), "stderr: {quiet}");
}

#[test]
fn verbose_flag_overrides_rust_log() {
    let stderr = stderr_with_log_filter("error", &["--verbose"]);

    assert!(stderr.contains("DEBUG"), "stderr: {stderr}");
}
