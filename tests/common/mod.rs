//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod mocks;

use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use transit::memory::MemoryLimits;
use transit::utils::toml_config::TransitConfig;
use transit::{Geocoder, MemoryStore, TransitAgent, TransitConfigManager};

/// Address nothing listens on
pub const UNREACHABLE_OTP: &str = "http://127.0.0.1:1";

/// Configuration pointing at `otp_url` with short timeouts
pub fn test_config(otp_url: &str, memory_file: &std::path::Path) -> TransitConfig {
    let mut config = TransitConfig::default();
    config.otp.base_url = otp_url.to_string();
    config.otp.timeout_secs = 3;
    config.otp.status_timeout_secs = 2;
    config.memory.file = memory_file.to_path_buf();
    config
}

/// Agent over the built-in catalog with memory in `dir`
pub fn test_agent(otp_url: &str, dir: &TempDir) -> TransitAgent {
    let memory_file = dir.path().join("memory.json");
    let config = test_config(otp_url, &memory_file);

    TransitAgent::new(
        Arc::new(TransitConfigManager::from_config(config)),
        Arc::new(Geocoder::builtin()),
        Arc::new(MemoryStore::open(memory_file, MemoryLimits::default())),
    )
}

/// OTP `plan` response with a direct bus trip and a tram + bus alternative
pub fn plan_fixture() -> Value {
    json!({
        "requestParameters": {},
        "plan": {
            "date": 1_717_236_000_000_i64,
            "itineraries": [
                {
                    "duration": 1500,
                    "walkTime": 420,
                    "startTime": 1_717_236_000_000_i64,
                    "endTime": 1_717_237_500_000_i64,
                    "legs": [
                        {
                            "mode": "WALK",
                            "duration": 240,
                            "distance": 310.0,
                            "from": { "name": "Origin" },
                            "to": { "name": "Victoria Station" }
                        },
                        {
                            "mode": "BUS",
                            "transitLeg": true,
                            "duration": 1080,
                            "distance": 5200.0,
                            "route": "12",
                            "headsign": "Raml",
                            "agencyName": "Alexandria Passenger Transport Authority",
                            "from": { "name": "Victoria Station" },
                            "to": { "name": "Sidi Gaber Station" }
                        },
                        {
                            "mode": "WALK",
                            "duration": 180,
                            "distance": 190.0,
                            "from": { "name": "Sidi Gaber Station" },
                            "to": { "name": "Destination" }
                        }
                    ]
                },
                {
                    "duration": 2100,
                    "walkTime": 300,
                    "legs": [
                        {
                            "mode": "TRAM",
                            "duration": 1200,
                            "distance": 4000.0,
                            "routeShortName": "2",
                            "from": { "name": "Victoria" },
                            "to": { "name": "San Stefano" }
                        },
                        {
                            "mode": "BUS",
                            "duration": 600,
                            "distance": 2100.0,
                            "route": "3",
                            "from": { "name": "San Stefano" },
                            "to": { "name": "Sidi Gaber Station" }
                        }
                    ]
                }
            ]
        }
    })
}
