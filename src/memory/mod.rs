//! Persistent user memory: recent places, favorites, preferences and
//! search history.
//!
//! Everything lives in one JSON document on disk:
//!
//! ```json
//! {
//!   "recent_locations": [...],
//!   "user_preferences": {...},
//!   "favorite_locations": [...],
//!   "search_history": [...]
//! }
//! ```
//!
//! Every mutation rewrites the file atomically (temp file, then rename).
//! Timestamps are written as RFC 3339; naive ISO-8601 timestamps from older
//! files are read as UTC.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use utoipa::ToSchema;

use crate::types::Language;
use crate::utils::toml_config::MemoryConfig;

/// Two places closer than this on both axes (degrees) are the same place
pub const SAME_PLACE_EPSILON: f64 = 0.001;

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("Failed to write memory file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize memory: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid value: {0}")]
    Invalid(String),
}

// ============= Stored Records =============

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RecentLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(with = "flexible_timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
    #[serde(default = "default_usage_count")]
    pub usage_count: u32,
}

fn default_usage_count() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FavoriteLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(with = "flexible_timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SearchEntry {
    pub query: String,
    pub from_location: String,
    pub to_location: String,
    #[serde(with = "flexible_timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(default)]
pub struct UserPreferences {
    pub preferred_transit_modes: Vec<String>,
    /// Meters
    pub max_walking_distance: u32,
    pub max_transfers: u32,
    /// `en` or `ar`
    pub language: String,
    pub wheelchair_accessible: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            preferred_transit_modes: vec!["TRANSIT".to_string(), "BUS".to_string()],
            max_walking_distance: 1000,
            max_transfers: 2,
            language: "en".to_string(),
            wheelchair_accessible: false,
        }
    }
}

impl UserPreferences {
    pub fn language(&self) -> Language {
        Language::from_code(&self.language)
    }
}

/// Partial preference update: `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PreferencesUpdate {
    pub preferred_transit_modes: Option<Vec<String>>,
    pub max_walking_distance: Option<u32>,
    pub max_transfers: Option<u32>,
    pub language: Option<String>,
    pub wheelchair_accessible: Option<bool>,
}

impl PreferencesUpdate {
    pub fn is_empty(&self) -> bool {
        self.preferred_transit_modes.is_none()
            && self.max_walking_distance.is_none()
            && self.max_transfers.is_none()
            && self.language.is_none()
            && self.wheelchair_accessible.is_none()
    }
}

/// The on-disk document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MemoryData {
    pub recent_locations: Vec<RecentLocation>,
    pub user_preferences: UserPreferences,
    pub favorite_locations: Vec<FavoriteLocation>,
    pub search_history: Vec<SearchEntry>,
}

/// Caps on the bounded lists
#[derive(Debug, Clone, Copy)]
pub struct MemoryLimits {
    pub max_recent: usize,
    pub max_history: usize,
}

impl Default for MemoryLimits {
    fn default() -> Self {
        Self {
            max_recent: 20,
            max_history: 50,
        }
    }
}

impl From<&MemoryConfig> for MemoryLimits {
    fn from(config: &MemoryConfig) -> Self {
        Self {
            max_recent: config.max_recent,
            max_history: config.max_history,
        }
    }
}

/// Counts returned by [`MemoryStore::clear_old_data`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ClearedCounts {
    pub recent_locations: usize,
    pub searches: usize,
}

fn same_place(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> bool {
    (lat_a - lat_b).abs() < SAME_PLACE_EPSILON && (lon_a - lon_b).abs() < SAME_PLACE_EPSILON
}

fn truncate_front<T>(items: &mut Vec<T>, cap: usize) {
    if items.len() > cap {
        items.drain(..items.len() - cap);
    }
}

// ============= Store =============

/// File-backed memory store, safe to share between tasks
pub struct MemoryStore {
    path: PathBuf,
    limits: MemoryLimits,
    data: RwLock<MemoryData>,
    /// Held for the whole read-modify-write so writes land in order
    writer: Mutex<()>,
    loaded_from_disk: bool,
}

impl MemoryStore {
    /// Open the memory file.
    ///
    /// A missing file starts empty. An unreadable or corrupt file is logged
    /// and replaced by defaults on the next write.
    pub fn open<P: AsRef<Path>>(path: P, limits: MemoryLimits) -> Self {
        let path = path.as_ref().to_path_buf();

        let (data, loaded_from_disk) = if path.exists() {
            match std::fs::read_to_string(&path)
                .map_err(MemoryError::from)
                .and_then(|s| serde_json::from_str::<MemoryData>(&s).map_err(MemoryError::from))
            {
                Ok(mut data) => {
                    // Older files may exceed the current caps
                    truncate_front(&mut data.recent_locations, limits.max_recent);
                    truncate_front(&mut data.search_history, limits.max_history);
                    info!(path = %path.display(), "Loaded user memory");
                    (data, true)
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Failed to load memory, using defaults");
                    (MemoryData::default(), false)
                }
            }
        } else {
            debug!(path = %path.display(), "No memory file yet, starting empty");
            (MemoryData::default(), false)
        };

        Self {
            path,
            limits,
            data: RwLock::new(data),
            writer: Mutex::new(()),
            loaded_from_disk,
        }
    }

    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::open(&config.file, MemoryLimits::from(config))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn loaded_from_disk(&self) -> bool {
        self.loaded_from_disk
    }

    /// Copy of the whole document
    pub fn snapshot(&self) -> MemoryData {
        self.data.read().clone()
    }

    /// Apply `f` to a copy, persist it, then publish it.
    ///
    /// On a failed write the in-memory document is left unchanged, so reads
    /// always agree with the file. Readers are not blocked during file I/O.
    fn mutate<R>(&self, f: impl FnOnce(&mut MemoryData) -> R) -> Result<R, MemoryError> {
        let _writer = self.writer.lock();
        let mut next = self.data.read().clone();
        let result = f(&mut next);
        self.persist(&next)?;
        *self.data.write() = next;
        Ok(result)
    }

    fn persist(&self, data: &MemoryData) -> Result<(), MemoryError> {
        let json = serde_json::to_string_pretty(data)?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "memory.json".to_string());
        let tmp = dir.join(format!(".{}.tmp", file_name));

        {
            let mut file = std::fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    // ---------- recent locations ----------

    /// Record a visit. A known place gets its count bumped; a new one is
    /// appended and the list trimmed to the newest `max_recent`.
    pub fn add_recent_location(&self, name: &str, lat: f64, lon: f64) -> Result<(), MemoryError> {
        let max_recent = self.limits.max_recent;
        self.mutate(|data| {
            let now = Utc::now();
            if let Some(existing) = data
                .recent_locations
                .iter_mut()
                .find(|l| same_place(l.lat, l.lon, lat, lon))
            {
                existing.timestamp = now;
                existing.usage_count += 1;
                return;
            }

            data.recent_locations.push(RecentLocation {
                name: name.to_string(),
                lat,
                lon,
                timestamp: now,
                usage_count: 1,
            });
            truncate_front(&mut data.recent_locations, max_recent);
        })
    }

    /// Most used first, ties broken by most recent
    pub fn recent_locations(&self, limit: usize) -> Vec<RecentLocation> {
        let mut locations = self.data.read().recent_locations.clone();
        locations.sort_by(|a, b| {
            b.usage_count
                .cmp(&a.usage_count)
                .then(b.timestamp.cmp(&a.timestamp))
        });
        locations.truncate(limit);
        locations
    }

    // ---------- favorites ----------

    /// Returns `false` (and writes nothing) when a favorite already exists
    /// at these coordinates.
    pub fn add_favorite(&self, name: &str, lat: f64, lon: f64) -> Result<bool, MemoryError> {
        if name.trim().is_empty() {
            return Err(MemoryError::Invalid("favorite name is empty".to_string()));
        }
        if self
            .data
            .read()
            .favorite_locations
            .iter()
            .any(|f| same_place(f.lat, f.lon, lat, lon))
        {
            return Ok(false);
        }

        self.mutate(|data| {
            // re-check under the write lock
            if data
                .favorite_locations
                .iter()
                .any(|f| same_place(f.lat, f.lon, lat, lon))
            {
                return false;
            }
            data.favorite_locations.push(FavoriteLocation {
                name: name.trim().to_string(),
                lat,
                lon,
                added_at: Utc::now(),
            });
            true
        })
    }

    pub fn favorites(&self) -> Vec<FavoriteLocation> {
        self.data.read().favorite_locations.clone()
    }

    /// Remove favorites whose name matches (case-insensitive).
    /// Returns whether anything was removed.
    pub fn remove_favorite(&self, name: &str) -> Result<bool, MemoryError> {
        let needle = name.trim().to_lowercase();
        if !self
            .data
            .read()
            .favorite_locations
            .iter()
            .any(|f| f.name.to_lowercase() == needle)
        {
            return Ok(false);
        }

        self.mutate(|data| {
            let before = data.favorite_locations.len();
            data.favorite_locations
                .retain(|f| f.name.to_lowercase() != needle);
            before != data.favorite_locations.len()
        })
    }

    // ---------- preferences ----------

    pub fn preferences(&self) -> UserPreferences {
        self.data.read().user_preferences.clone()
    }

    /// Change only the provided fields; returns the resulting preferences
    pub fn update_preferences(
        &self,
        update: PreferencesUpdate,
    ) -> Result<UserPreferences, MemoryError> {
        if let Some(ref lang) = update.language {
            let lang = lang.trim().to_lowercase();
            if lang != "en" && lang != "ar" {
                return Err(MemoryError::Invalid(format!(
                    "language must be 'en' or 'ar' (got '{}')",
                    lang
                )));
            }
        }
        if let Some(ref modes) = update.preferred_transit_modes {
            if modes.iter().all(|m| m.trim().is_empty()) {
                return Err(MemoryError::Invalid(
                    "preferred_transit_modes must not be empty".to_string(),
                ));
            }
        }

        self.mutate(|data| {
            let prefs = &mut data.user_preferences;
            if let Some(modes) = update.preferred_transit_modes {
                prefs.preferred_transit_modes = modes
                    .into_iter()
                    .map(|m| m.trim().to_uppercase())
                    .filter(|m| !m.is_empty())
                    .collect();
            }
            if let Some(distance) = update.max_walking_distance {
                prefs.max_walking_distance = distance;
            }
            if let Some(transfers) = update.max_transfers {
                prefs.max_transfers = transfers;
            }
            if let Some(language) = update.language {
                prefs.language = language.trim().to_lowercase();
            }
            if let Some(wheelchair) = update.wheelchair_accessible {
                prefs.wheelchair_accessible = wheelchair;
            }
            prefs.clone()
        })
    }

    // ---------- search history ----------

    pub fn add_search(&self, query: &str, from: &str, to: &str) -> Result<(), MemoryError> {
        let max_history = self.limits.max_history;
        self.mutate(|data| {
            data.search_history.push(SearchEntry {
                query: query.to_string(),
                from_location: from.to_string(),
                to_location: to.to_string(),
                timestamp: Utc::now(),
            });
            truncate_front(&mut data.search_history, max_history);
        })
    }

    /// The newest `limit` searches, oldest first
    pub fn search_history(&self, limit: usize) -> Vec<SearchEntry> {
        let data = self.data.read();
        let start = data.search_history.len().saturating_sub(limit);
        data.search_history[start..].to_vec()
    }

    // ---------- retention ----------

    /// Drop recent locations and searches older than `days`. Favorites and
    /// preferences are kept.
    pub fn clear_old_data(&self, days: i64) -> Result<ClearedCounts, MemoryError> {
        let cutoff = Utc::now() - Duration::days(days);
        self.mutate(|data| {
            let recent_before = data.recent_locations.len();
            let history_before = data.search_history.len();

            data.recent_locations.retain(|l| l.timestamp > cutoff);
            data.search_history.retain(|s| s.timestamp > cutoff);

            ClearedCounts {
                recent_locations: recent_before - data.recent_locations.len(),
                searches: history_before - data.search_history.len(),
            }
        })
    }
}

/// Serde adapter writing RFC 3339 and also reading naive ISO-8601 as UTC.
mod flexible_timestamp {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }
}
