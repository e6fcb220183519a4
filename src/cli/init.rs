//! Init command implementation
//!
//! Writes `.env` and `transit.toml` for a new deployment.

use super::output::Output;
use crate::utils::toml_config::PLACEHOLDER_API_KEY;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug, PartialEq)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// Both files already exist and `--force` was not given
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing Alexandria Transit Assistant");

    let base_path = &config.path;
    let env_path = base_path.join(".env");
    let toml_path = base_path.join("transit.toml");

    if env_path.exists() && toml_path.exists() && !config.force {
        output.warning(".env and transit.toml already exist!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    if !base_path.exists() {
        if let Err(e) = fs::create_dir_all(base_path) {
            output.error(&format!("Failed to create {}: {}", base_path.display(), e));
            return InitResult::Error(e.to_string());
        }
        output.created_dir(&base_path.display().to_string());
    }

    output.subheader("Creating configuration files");

    let files = [
        (&env_path, ".env", "env", generate_env()),
        (&toml_path, "transit.toml", "config", generate_transit_toml()),
    ];
    for (path, label, kind, content) in files {
        match write_file(path, &content, config.force) {
            Ok(true) => output.created(kind, label),
            Ok(false) => output.skipped(label, "already exists"),
            Err(e) => {
                output.error(&format!("Failed to create {}: {}", label, e));
                return InitResult::Error(e.to_string());
            }
        }
    }

    output.complete("Project initialized successfully!");

    output.header("Next Steps");
    output.newline();
    output.info("1. Add your Gemini API key to .env (optional, enables LLM extraction)");
    output.newline();
    output.info("2. Start OpenTripPlanner with the Alexandria graph:");
    output.command("java -Xmx2G -jar otp.jar --load ./graphs --serve");
    output.newline();
    output.info("3. Start the assistant:");
    output.command("transit-agent chat");
    output.command("transit-agent serve");
    output.newline();

    output.hint("The web interface listens on http://0.0.0.0:5000 by default");

    InitResult::Success
}

/// Returns whether the file was written
fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    fs::write(path, content)?;
    Ok(true)
}

fn generate_env() -> String {
    format!(
        r#"# Alexandria Transit Assistant environment
# Generated by: transit-agent init

# Google Gemini key for LLM location extraction (optional)
GEMINI_API_KEY={PLACEHOLDER_API_KEY}

# OpenTripPlanner server
OTP_BASE_URL=http://localhost:8080

# User memory file
MEMORY_FILE=user_memory.json

# Log filter (trace, debug, info, warn, error)
RUST_LOG=info
"#
    )
}

fn generate_transit_toml() -> String {
    r#"# Alexandria Transit Assistant Configuration
# ==========================================
# Generated by: transit-agent init
#
# OTP_BASE_URL and MEMORY_FILE in the environment override the values below.
# Changes to this file are picked up by `transit-agent serve` without a restart.

[server]
host = "0.0.0.0"
port = 5000
log_level = "info"

[otp]
base_url = "http://localhost:8080"
router = "default"
timeout_secs = 20
status_timeout_secs = 5
num_itineraries = 3
mode = "TRANSIT,WALK"
max_walk_distance = 2000

[llm]
# Used only when the rule-based extractors find no locations
enabled = true
api_key_env = "GEMINI_API_KEY"
model = "gemini-1.5-flash"
temperature = 0.1
max_tokens = 256
timeout_secs = 15

[memory]
file = "user_memory.json"
max_recent = 20
max_history = 50
retention_days = 30

[geocoder]
# GTFS stops.txt to load in addition to the built-in catalog
# gtfs_stops_path = "gtfs/stops.txt"
include_builtin = true
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::toml_config::TransitConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generated_toml_parses() {
        let config: TransitConfig = toml::from_str(&generate_transit_toml()).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.otp.base_url, "http://localhost:8080");
        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generate_env() {
        let env = generate_env();
        assert!(env.contains("GEMINI_API_KEY=your_gemini_api_key_here"));
        assert!(env.contains("OTP_BASE_URL=http://localhost:8080"));
        assert!(env.contains("MEMORY_FILE=user_memory.json"));
    }

    #[test]
    fn test_write_file_skips_existing_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f.txt");
        fs::write(&path, "original").unwrap();

        assert!(!write_file(&path, "new", false).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");

        assert!(write_file(&path, "new", true).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_run_creates_files() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("deploy");
        let result = run(
            InitConfig {
                path: target.clone(),
                force: false,
            },
            &Output::no_color(),
        );

        assert_eq!(result, InitResult::Success);
        assert!(target.join(".env").exists());
        assert!(target.join("transit.toml").exists());
    }

    #[test]
    fn test_run_already_exists_without_force() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env"), "KEEP=1").unwrap();
        fs::write(dir.path().join("transit.toml"), "").unwrap();

        let result = run(
            InitConfig {
                path: dir.path().to_path_buf(),
                force: false,
            },
            &Output::no_color(),
        );
        assert_eq!(result, InitResult::AlreadyExists);
        assert_eq!(fs::read_to_string(dir.path().join(".env")).unwrap(), "KEEP=1");
    }

    #[test]
    fn test_run_keeps_existing_env() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env"), "KEEP=1").unwrap();

        let result = run(
            InitConfig {
                path: dir.path().to_path_buf(),
                force: false,
            },
            &Output::no_color(),
        );
        assert_eq!(result, InitResult::Success);
        assert_eq!(fs::read_to_string(dir.path().join(".env")).unwrap(), "KEEP=1");
        assert!(dir.path().join("transit.toml").exists());
    }

    #[test]
    fn test_run_force_overwrites() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env"), "KEEP=1").unwrap();
        fs::write(dir.path().join("transit.toml"), "").unwrap();

        let result = run(
            InitConfig {
                path: dir.path().to_path_buf(),
                force: true,
            },
            &Output::no_color(),
        );
        assert_eq!(result, InitResult::Success);
        assert!(fs::read_to_string(dir.path().join(".env"))
            .unwrap()
            .contains("OTP_BASE_URL"));
    }
}
