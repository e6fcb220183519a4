//! TOML-based configuration for the transit assistant
//!
//! Settings live in an optional `transit.toml`. A missing file means
//! defaults; the environment variables `OTP_BASE_URL` and `MEMORY_FILE`
//! override the file, and the Gemini key is read from the variable named by
//! `llm.api_key_env`.
//!
//! # Hot Reloading
//!
//! Configuration changes are automatically detected and applied at runtime.
//! Use `TransitConfigManager` for thread-safe access to the current configuration.

use arc_swap::ArcSwap;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Environment variable overriding `otp.base_url`
pub const OTP_BASE_URL_ENV: &str = "OTP_BASE_URL";
/// Environment variable overriding `memory.file`
pub const MEMORY_FILE_ENV: &str = "MEMORY_FILE";
/// Value written to `.env` by `init` until the user sets a real key
pub const PLACEHOLDER_API_KEY: &str = "your_gemini_api_key_here";

/// Root configuration structure loaded from transit.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub otp: OtpConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub geocoder: GeocoderConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

// ============= OpenTripPlanner Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpConfig {
    #[serde(default = "default_otp_base_url")]
    pub base_url: String,

    /// Router id in `/otp/routers/{router}`
    #[serde(default = "default_router")]
    pub router: String,

    /// Timeout for trip planning requests
    #[serde(default = "default_otp_timeout")]
    pub timeout_secs: u64,

    /// Timeout for the router status probe
    #[serde(default = "default_status_timeout")]
    pub status_timeout_secs: u64,

    #[serde(default = "default_num_itineraries")]
    pub num_itineraries: u32,

    /// Comma-separated OTP mode list
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Walk distance cap in meters when no user preference applies
    #[serde(default = "default_max_walk_distance")]
    pub max_walk_distance: u32,
}

pub(crate) fn default_otp_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_router() -> String {
    "default".to_string()
}

fn default_otp_timeout() -> u64 {
    20
}

fn default_status_timeout() -> u64 {
    5
}

fn default_num_itineraries() -> u32 {
    3
}

fn default_mode() -> String {
    "TRANSIT,WALK".to_string()
}

fn default_max_walk_distance() -> u32 {
    2000
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            base_url: default_otp_base_url(),
            router: default_router(),
            timeout_secs: default_otp_timeout(),
            status_timeout_secs: default_status_timeout(),
            num_itineraries: default_num_itineraries(),
            mode: default_mode(),
            max_walk_distance: default_max_walk_distance(),
        }
    }
}

// ============= LLM Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Use the LLM as a fallback for location extraction
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Environment variable containing the Gemini API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_gemini_base")]
    pub base_url: String,

    #[serde(default = "default_gemini_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_llm_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_gemini_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_llm_max_tokens() -> u32 {
    256
}

fn default_llm_timeout() -> u64 {
    15
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: default_api_key_env(),
            base_url: default_gemini_base(),
            model: default_gemini_model(),
            temperature: default_temperature(),
            max_tokens: default_llm_max_tokens(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

impl LlmConfig {
    /// API key from the configured environment variable, if set to
    /// something other than the `init` placeholder
    pub fn api_key(&self) -> Option<String> {
        non_empty_env(&self.api_key_env).filter(|k| k != PLACEHOLDER_API_KEY)
    }
}

// ============= Memory Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_memory_file")]
    pub file: PathBuf,

    #[serde(default = "default_max_recent")]
    pub max_recent: usize,

    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Age in days after which `clear-old` drops entries
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
}

fn default_memory_file() -> PathBuf {
    PathBuf::from("user_memory.json")
}

fn default_max_recent() -> usize {
    20
}

fn default_max_history() -> usize {
    50
}

fn default_retention_days() -> i64 {
    30
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            file: default_memory_file(),
            max_recent: default_max_recent(),
            max_history: default_max_history(),
            retention_days: default_retention_days(),
        }
    }
}

// ============= Geocoder Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Optional GTFS `stops.txt` merged into the catalog
    #[serde(default)]
    pub gtfs_stops_path: Option<PathBuf>,

    /// Include the built-in Alexandria stop catalog
    #[serde(default = "default_true")]
    pub include_builtin: bool,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            gtfs_stops_path: None,
            include_builtin: true,
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Configuration warnings that don't prevent operation but may indicate issues
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub kind: ConfigWarningKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarningKind {
    MissingApiKey,
    EmptyStopCatalog,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid URL for {field}: {url}")]
    InvalidUrl { field: &'static str, url: String },

    #[error("GTFS stops file does not exist: {0}")]
    MissingStopsFile(PathBuf),

    #[error("Watch error: {0}")]
    WatchError(#[from] notify::Error),
}

impl TransitConfig {
    /// Load configuration from a TOML file, then apply environment overrides.
    ///
    /// A missing file is not an error: defaults are used.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str::<TransitConfig>(&content)?
        } else {
            info!(path = %path.display(), "No configuration file, using defaults");
            TransitConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply `OTP_BASE_URL` and `MEMORY_FILE` from the environment
    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = non_empty_env(OTP_BASE_URL_ENV) {
            self.otp.base_url = url;
        }
        if let Some(file) = non_empty_env(MEMORY_FILE_ENV) {
            self.memory.file = PathBuf::from(file);
        }
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }

        validate_http_url("otp.base_url", &self.otp.base_url)?;
        if self.llm.enabled {
            validate_http_url("llm.base_url", &self.llm.base_url)?;
        }

        if self.otp.timeout_secs == 0 || self.otp.status_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "otp timeouts must be greater than zero".to_string(),
            ));
        }
        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "llm.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if !(1..=10).contains(&self.otp.num_itineraries) {
            return Err(ConfigError::ValidationError(format!(
                "otp.num_itineraries must be between 1 and 10 (got {})",
                self.otp.num_itineraries
            )));
        }
        if self.otp.mode.split(',').all(|m| m.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "otp.mode must list at least one mode".to_string(),
            ));
        }

        if self.memory.max_recent == 0 || self.memory.max_history == 0 {
            return Err(ConfigError::ValidationError(
                "memory caps must be greater than zero".to_string(),
            ));
        }
        if self.memory.retention_days <= 0 {
            return Err(ConfigError::ValidationError(
                "memory.retention_days must be positive".to_string(),
            ));
        }

        if let Some(ref stops) = self.geocoder.gtfs_stops_path {
            if !stops.exists() {
                return Err(ConfigError::MissingStopsFile(stops.clone()));
            }
        }

        Ok(())
    }

    /// Validate configuration with warnings for degraded setups
    ///
    /// Returns Ok with warnings, or Err if validation fails
    pub fn validate_with_warnings(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        self.validate()?;

        let mut warnings = Vec::new();

        if self.llm.enabled && self.llm.api_key().is_none() {
            warnings.push(ConfigWarning {
                kind: ConfigWarningKind::MissingApiKey,
                message: format!(
                    "LLM is enabled but '{}' is not set; location extraction will be rule-based only",
                    self.llm.api_key_env
                ),
            });
        }

        if !self.geocoder.include_builtin && self.geocoder.gtfs_stops_path.is_none() {
            warnings.push(ConfigWarning {
                kind: ConfigWarningKind::EmptyStopCatalog,
                message: "Built-in stops are disabled and no GTFS stops file is configured; \
                          no place can be geocoded"
                    .to_string(),
            });
        }

        Ok(warnings)
    }

    /// Whether an LLM client can be built from this configuration
    pub fn llm_configured(&self) -> bool {
        self.llm.enabled && self.llm.api_key().is_some()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_http_url(field: &'static str, url: &str) -> Result<(), ConfigError> {
    let parsed = reqwest::Url::parse(url).map_err(|_| ConfigError::InvalidUrl {
        field,
        url: url.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            field,
            url: url.to_string(),
        }),
    }
}

// ============= Hot Reloading Configuration Manager =============

/// How long the config file must go without events before it is reloaded
pub const RELOAD_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Thread-safe configuration manager with hot reloading support
pub struct TransitConfigManager {
    config: Arc<ArcSwap<TransitConfig>>,
    config_path: PathBuf,
    watcher: RwLock<Option<RecommendedWatcher>>,
}

impl TransitConfigManager {
    /// Create a new configuration manager and load the initial config
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        // Convert to absolute path for reliable file watching
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(ConfigError::ReadError)?
                .join(path)
        };

        let config = TransitConfig::load(&path)?;

        Ok(Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: path,
            watcher: RwLock::new(None),
        })
    }

    /// Get the current configuration (lockless read)
    pub fn config(&self) -> Arc<TransitConfig> {
        self.config.load_full()
    }

    /// Path the configuration was loaded from
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Manually reload the configuration from disk
    pub fn reload(&self) -> Result<(), ConfigError> {
        info!("Reloading configuration from {:?}", self.config_path);

        let new_config = TransitConfig::load(&self.config_path)?;
        self.config.store(Arc::new(new_config));

        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Start watching for configuration file changes
    ///
    /// A burst of file events is coalesced into one reload, taken once the
    /// file has been quiet for [`RELOAD_QUIET_PERIOD`].
    pub fn start_watching(&self) -> Result<(), ConfigError> {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();

        let config_path = self.config_path.clone();
        let config_arc = Arc::clone(&self.config);
        let file_name = config_path.file_name().map(|n| n.to_os_string());

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if touches_config && (event.kind.is_modify() || event.kind.is_create()) {
                        // Coalesced in the receiver
                        let _ = tx.send(());
                    }
                }
                Err(e) => {
                    error!("Config watcher error: {:?}", e);
                }
            }
        })?;

        // Watch the config file's parent directory
        if let Some(parent) = self.config_path.parent() {
            watcher.watch(parent, RecursiveMode::NonRecursive)?;
        }

        *self.watcher.write() = Some(watcher);

        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                // Every event restarts the quiet period
                loop {
                    match tokio::time::timeout(RELOAD_QUIET_PERIOD, rx.recv()).await {
                        Ok(Some(())) => continue,
                        Ok(None) => return,
                        Err(_) => break,
                    }
                }

                match TransitConfig::load(&config_path) {
                    Ok(new_config) => {
                        config_arc.store(Arc::new(new_config));
                        info!("Configuration hot-reloaded successfully");
                    }
                    Err(e) => {
                        warn!(
                            "Failed to hot-reload config: {}. Keeping previous config.",
                            e
                        );
                    }
                }
            }
        });

        info!("Configuration hot-reload watcher started");
        Ok(())
    }

    /// Stop watching for configuration changes
    pub fn stop_watching(&self) {
        *self.watcher.write() = None;
        info!("Configuration hot-reload watcher stopped");
    }

    /// Create a config manager directly from a config (useful for testing)
    /// This won't have file watching capabilities.
    pub fn from_config(config: TransitConfig) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: PathBuf::from("transit.toml"),
            watcher: RwLock::new(None),
        }
    }
}

impl Clone for TransitConfigManager {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            config_path: self.config_path.clone(),
            watcher: RwLock::new(None), // Watcher is not cloned
        }
    }
}
