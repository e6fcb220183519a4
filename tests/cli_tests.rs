//! CLI integration tests
//!
//! Runs the built `transit-agent` binary inside temporary directories so no
//! `.env`, `transit.toml` or memory file from the checkout leaks in.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_cli(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_transit-agent"))
        .arg("--no-color")
        .args(args)
        .current_dir(dir)
        .env_remove("GEMINI_API_KEY")
        .env_remove("OTP_BASE_URL")
        .env_remove("MEMORY_FILE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute transit-agent")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["--help"], dir.path());

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Alexandria"));
    for command in ["chat", "serve", "ask", "status", "geocode", "memory", "init"] {
        assert!(text.contains(command), "help is missing {}", command);
    }
}

#[test]
fn test_version_command() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["--version"], dir.path());

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_command_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["teleport"], dir.path());
    assert!(!output.status.success());
}

// =============================================================================
// Init
// =============================================================================

#[test]
fn test_init_creates_files() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["init"], dir.path());

    assert!(output.status.success());
    let env = fs::read_to_string(dir.path().join(".env")).unwrap();
    assert!(env.contains("GEMINI_API_KEY="));
    let toml = fs::read_to_string(dir.path().join("transit.toml")).unwrap();
    assert!(toml.contains("[otp]"));
}

#[test]
fn test_init_twice_needs_force() {
    let dir = TempDir::new().unwrap();
    assert!(run_cli(&["init"], dir.path()).status.success());

    let second = run_cli(&["init"], dir.path());
    assert!(!second.status.success());
    assert!(stdout(&second).contains("--force"));

    assert!(run_cli(&["init", "--force"], dir.path()).status.success());
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_config_hides_api_key() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_transit-agent"))
        .args(["--no-color", "config"])
        .current_dir(dir.path())
        .env("GEMINI_API_KEY", "sk-very-secret-value")
        .output()
        .unwrap();

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("not found, using defaults"));
    assert!(text.contains("GEMINI_API_KEY: set"));
    assert!(!text.contains("sk-very-secret-value"));
}

#[test]
fn test_config_validate_rejects_bad_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("transit.toml"), "[server]\nport = \"not a number\"\n").unwrap();

    let output = run_cli(&["config", "--validate"], dir.path());
    assert!(!output.status.success());
}

#[test]
fn test_configured_log_level_applies_to_commands() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("transit.toml");

    fs::write(&config, "[server]\nlog_level = \"info\"\n").unwrap();
    let output = run_cli(&["geocode", "Victoria"], dir.path());
    assert!(output.status.success());
    assert!(stderr(&output).contains("Transit agent initialized"));

    fs::write(&config, "[server]\nlog_level = \"warn\"\n").unwrap();
    let output = run_cli(&["geocode", "Victoria"], dir.path());
    assert!(output.status.success());
    assert!(!stderr(&output).contains("Transit agent initialized"));

    // --verbose still wins
    let output = run_cli(&["--verbose", "geocode", "Victoria"], dir.path());
    assert!(stderr(&output).contains("Transit agent initialized"));
}

// =============================================================================
// Lookups
// =============================================================================

#[test]
fn test_geocode_known_place() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["geocode", "Victoria"], dir.path());

    assert!(output.status.success());
    assert!(stdout(&output).contains("Victoria Station"));
}

#[test]
fn test_geocode_unknown_place() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["geocode", "Xyzzyville"], dir.path());

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_stops_search() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["stops", "gaber", "--limit", "3"], dir.path());

    assert!(output.status.success());
    assert!(stdout(&output).contains("Sidi Gaber"));
}

// =============================================================================
// Memory
// =============================================================================

#[test]
fn test_memory_favorites_round_trip() {
    let dir = TempDir::new().unwrap();

    let added = run_cli(
        &["memory", "add-favorite", "Work", "31.2001", "29.9187"],
        dir.path(),
    );
    assert!(added.status.success());
    assert!(dir.path().join("user_memory.json").exists());

    let listed = run_cli(&["memory", "favorites"], dir.path());
    assert!(stdout(&listed).contains("Work"));

    let removed = run_cli(&["memory", "remove-favorite", "work"], dir.path());
    assert!(stdout(&removed).contains("Removed favorite"));
}

#[test]
fn test_ask_json_without_otp() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("transit.toml"),
        "[otp]\nbase_url = \"http://127.0.0.1:1\"\ntimeout_secs = 2\nstatus_timeout_secs = 1\n",
    )
    .unwrap();

    let output = run_cli(&["ask", "--json", "from Victoria to Sidi Gaber"], dir.path());
    assert!(output.status.success());

    let reply: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reply["source"], "fallback");
    assert_eq!(reply["from"]["name"], "Victoria Station");
}

#[test]
fn test_ask_rejects_bad_departure_time() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["ask", "--depart", "noon", "from Victoria to Sidi Gaber"], dir.path());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--depart"));
}

#[test]
fn test_ask_unanswerable_exit_code() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["ask", "hello", "there"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}
