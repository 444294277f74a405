use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_coh3-explorer")
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn unique_temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("coh3-explorer-{name}-{stamp}.csv"))
}

fn run(args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .env("COH3_EXPLORER_DATA_DIR", fixtures_dir())
        .env("COH3_EXPLORER_CONFIG", fixtures_dir().join("config.yaml"))
        .env("RUST_LOG", "warn")
        .output()
        .expect("binary should run")
}

#[test]
fn squads_command_emits_json() {
    let output = run(&["squads", "dak"]);
    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("squads should emit json");
    assert_eq!(payload["faction"], "afrika_korps");
    assert_eq!(payload["squads"][0]["time_cost"]["popcap"], 4.0);
}

#[test]
fn squads_command_prints_table() {
    let output = run(&["squads", "german", "--table"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert!(lines.next().unwrap().starts_with("id\tunit_type\tmanpower"));
    assert!(stdout.contains("grenadier_ger\tinfantry\t260"));
}

#[test]
fn squad_command_reports_unknown_unit() {
    let output = run(&["squad", "ghost_us"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unit Not Found"));
}

#[test]
fn export_command_writes_csv() {
    let path = unique_temp_path("export");
    let output = run(&["export", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    let csv = fs::read_to_string(&path).expect("export should write a file");
    assert_eq!(csv.lines().count(), 8);
    assert!(csv.contains("panzerschreck_ak,afrika_korps,infantry,Panzerschreck Squad,0.0,60.0,120.0,4.0,40.0"));
    let _ = fs::remove_file(path);
}

#[test]
fn missing_operand_returns_usage() {
    let output = run(&["buildings"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage"));
}

#[test]
fn unknown_command_returns_usage() {
    let output = run(&["simulate"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn unreadable_data_exits_with_failure() {
    let output = Command::new(bin())
        .args(["diagnostics"])
        .env("COH3_EXPLORER_DATA_DIR", "/nonexistent/coh3-data")
        .env("COH3_EXPLORER_CONFIG", fixtures_dir().join("config.yaml"))
        .output()
        .expect("binary should run");
    assert_eq!(output.status.code(), Some(1));
}
