//! One-shot subcommands

use super::output::Output;
use super::MemoryCommands;
use crate::agent::{SystemStatus, TransitAgent};
use crate::memory::{MemoryStore, PreferencesUpdate};
use crate::otp::Departure;
use crate::types::ReplySource;
use crate::utils::toml_config::TransitConfig;
use uuid::Uuid;

/// Widths of the id, latitude and longitude columns in `stops`
const STOP_COLUMNS: [usize; 3] = [8, 10, 10];

/// Print a [`SystemStatus`] as key/value lines
pub fn print_status(status: &SystemStatus, output: &Output) {
    output.header("System Status");
    output.kv("OTP server", &status.otp_url);
    output.kv("OTP status", status.otp.label());
    if let Some(message) = status.otp.message() {
        output.kv("OTP detail", message);
    }
    output.kv("Stops loaded", &status.geocoder_stops.to_string());
    output.kv("Memory file", &status.memory_file.display().to_string());
    output.kv(
        "Memory loaded",
        if status.memory_loaded { "yes" } else { "no (new file)" },
    );
    output.kv(
        "LLM extraction",
        status.llm_model.as_deref().unwrap_or("disabled"),
    );

    if status.is_healthy() {
        output.success("All systems operational");
    } else {
        output.warning("OTP is not available; replies will use basic route information");
    }
}

pub async fn status(agent: &TransitAgent, output: &Output) {
    let status = agent.check_system_status().await;
    print_status(&status, output);
}

/// Answer one question. Returns `false` when no trip could be described.
pub async fn ask(
    agent: &TransitAgent,
    query: &str,
    departure: Departure,
    json: bool,
    output: &Output,
) -> anyhow::Result<bool> {
    let reply = agent.process_query_at(query, departure).await;
    let answered = matches!(reply.source, ReplySource::Otp | ReplySource::Fallback);

    if json {
        let response = reply.into_query_response(query.to_string(), Uuid::new_v4().to_string());
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        output.answer(&reply.text);
    }
    Ok(answered)
}

/// Returns `false` when the place is unknown
pub fn geocode(agent: &TransitAgent, name: &str, output: &Output) -> bool {
    match agent.geocoder().geocode(name) {
        Some(found) => {
            output.header(&found.stop.name);
            output.kv("Stop ID", &found.stop.stop_id);
            output.kv("Latitude", &format!("{:.6}", found.stop.lat));
            output.kv("Longitude", &format!("{:.6}", found.stop.lon));
            output.kv("Match", &format!("{:?} ({})", found.kind, found.matched));
            true
        }
        None => {
            output.error(&format!("Location not found: {}", name));
            let suggestions = agent.geocoder().search_stops(name, 5);
            if !suggestions.is_empty() {
                output.subheader("Did you mean");
                for stop in suggestions {
                    output.list_item(&stop.name);
                }
            }
            false
        }
    }
}

pub fn stops(agent: &TransitAgent, query: Option<&str>, limit: usize, output: &Output) {
    let geocoder = agent.geocoder();
    let found: Vec<_> = match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => geocoder.search_stops(q, limit),
        None => geocoder.all_stops().iter().take(limit).collect(),
    };

    if found.is_empty() {
        output.warning("No matching stops");
        return;
    }

    output.table_header(&["ID", "Latitude", "Longitude", "Name"], &STOP_COLUMNS);
    for stop in &found {
        let lat = format!("{:.5}", stop.lat);
        let lon = format!("{:.5}", stop.lon);
        output.table_row(
            &[stop.stop_id.as_str(), &lat, &lon, stop.name.as_str()],
            &STOP_COLUMNS,
        );
    }
    output.newline();
    output.info(&format!("{} of {} stops", found.len(), geocoder.len()));
}

pub fn memory(
    store: &MemoryStore,
    command: MemoryCommands,
    retention_days: i64,
    output: &Output,
) -> anyhow::Result<()> {
    match command {
        MemoryCommands::Recent { limit } => {
            output.header("Recent Places");
            let recent = store.recent_locations(limit);
            if recent.is_empty() {
                output.info("No recent places yet");
            }
            for r in recent {
                output.list_item(&format!(
                    "{} ({:.4}, {:.4}) used {}x, last {}",
                    r.name,
                    r.lat,
                    r.lon,
                    r.usage_count,
                    r.timestamp.format("%Y-%m-%d %H:%M")
                ));
            }
        }
        MemoryCommands::Favorites => {
            output.header("Favorites");
            let favorites = store.favorites();
            if favorites.is_empty() {
                output.info("No favorites saved");
            }
            for f in favorites {
                output.list_item(&format!("{} ({:.4}, {:.4})", f.name, f.lat, f.lon));
            }
        }
        MemoryCommands::History { limit } => {
            output.header("Search History");
            let history = store.search_history(limit);
            if history.is_empty() {
                output.info("No searches yet");
            }
            for entry in history {
                output.list_item(&format!(
                    "[{}] {} → {}: {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.from_location,
                    entry.to_location,
                    entry.query
                ));
            }
        }
        MemoryCommands::Prefs => print_preferences(store, output),
        MemoryCommands::SetPrefs {
            modes,
            max_walk,
            max_transfers,
            language,
            wheelchair,
        } => {
            let update = PreferencesUpdate {
                preferred_transit_modes: modes,
                max_walking_distance: max_walk,
                max_transfers,
                language,
                wheelchair_accessible: wheelchair,
            };
            if update.is_empty() {
                output.warning("Nothing to change; pass at least one option");
                output.hint("transit-agent memory set-prefs --help");
                return Ok(());
            }
            store.update_preferences(update)?;
            output.success("Preferences updated");
            print_preferences(store, output);
        }
        MemoryCommands::AddFavorite { name, lat, lon } => {
            if store.add_favorite(&name, lat, lon)? {
                output.success(&format!("Added favorite: {}", name));
            } else {
                output.warning("A favorite already exists at these coordinates");
            }
        }
        MemoryCommands::RemoveFavorite { name } => {
            if store.remove_favorite(&name)? {
                output.success(&format!("Removed favorite: {}", name));
            } else {
                output.warning(&format!("No favorite named {}", name));
            }
        }
        MemoryCommands::ClearOld { days } => {
            let days = days.unwrap_or(retention_days);
            let cleared = store.clear_old_data(days)?;
            output.success(&format!(
                "Removed {} recent places and {} searches older than {} days",
                cleared.recent_locations, cleared.searches, days
            ));
        }
    }
    Ok(())
}

fn print_preferences(store: &MemoryStore, output: &Output) {
    let prefs = store.preferences();
    output.header("Preferences");
    output.kv("Transit modes", &prefs.preferred_transit_modes.join(", "));
    output.kv("Max walking distance", &format!("{} m", prefs.max_walking_distance));
    output.kv("Max transfers", &prefs.max_transfers.to_string());
    output.kv("Language", &prefs.language);
    output.kv(
        "Wheelchair accessible",
        if prefs.wheelchair_accessible { "yes" } else { "no" },
    );
}

/// Print the effective configuration. The API key itself is never shown.
pub fn show_config(config: &TransitConfig, source: &str, output: &Output) {
    output.header("Configuration");
    output.kv("File", source);

    output.subheader("Server");
    output.kv("Address", &format!("{}:{}", config.server.host, config.server.port));
    output.kv("Log level", &config.server.log_level);

    output.subheader("OpenTripPlanner");
    output.kv("Base URL", &config.otp.base_url);
    output.kv("Router", &config.otp.router);
    output.kv("Mode", &config.otp.mode);
    output.kv("Itineraries", &config.otp.num_itineraries.to_string());
    output.kv("Timeout", &format!("{}s", config.otp.timeout_secs));

    output.subheader("LLM");
    output.kv("Enabled", &config.llm.enabled.to_string());
    output.kv("Model", &config.llm.model);
    output.kv(
        &config.llm.api_key_env,
        if config.llm.api_key().is_some() { "set" } else { "not set" },
    );

    output.subheader("Memory");
    output.kv("File", &config.memory.file.display().to_string());
    output.kv("Max recent", &config.memory.max_recent.to_string());
    output.kv("Max history", &config.memory.max_history.to_string());
    output.kv("Retention", &format!("{} days", config.memory.retention_days));

    output.subheader("Geocoder");
    output.kv("Built-in stops", &config.geocoder.include_builtin.to_string());
    output.kv(
        "GTFS stops",
        &config
            .geocoder
            .gtfs_stops_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string()),
    );
}
