//! Place-name resolution against the Alexandria stop catalog.
//!
//! Every stop carries a set of aliases (English words, Arabic translations,
//! district names). Lookups compare normalized match keys so that Arabic
//! spelling variants and letter case do not matter.

pub mod aliases;
pub mod gtfs;
pub mod stops;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::nlu::normalize::match_key;
use crate::utils::toml_config::GeocoderConfig;

pub use aliases::generate_aliases;
pub use gtfs::{load_gtfs_stops, GtfsError};
pub use stops::ALEXANDRIA_STOPS;

/// Minimum alias length (in characters) for containment matching
const MIN_PARTIAL_LEN: usize = 3;

/// A transit stop with its search aliases
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TransitStop {
    pub stop_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub aliases: Vec<String>,
}

impl TransitStop {
    /// Create a stop and generate its aliases from the name
    pub fn new(stop_id: impl Into<String>, name: impl Into<String>, lat: f64, lon: f64) -> Self {
        let name = name.into();
        let aliases = generate_aliases(&name);
        Self {
            stop_id: stop_id.into(),
            name,
            lat,
            lon,
            aliases,
        }
    }
}

/// How a geocode result was found
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The query equals an alias
    Exact,
    /// The query contains an alias or is contained in one
    Partial,
    /// An Arabic district name was found inside the query
    District,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeocodeMatch {
    pub stop: TransitStop,
    pub kind: MatchKind,
    /// Alias (or district pattern) that produced the match
    pub matched: String,
}

/// A stop mentioned somewhere inside a free-text query
#[derive(Debug, Clone)]
pub struct Mention {
    /// Byte offset of the alias in the normalized query
    pub position: usize,
    /// Alias as found in the query
    pub alias: String,
    pub stop_index: usize,
}

/// Alias index over a stop catalog
#[derive(Debug, Clone)]
pub struct Geocoder {
    stops: Vec<TransitStop>,
    /// Match key -> indices into `stops`, catalog order
    index: HashMap<String, Vec<usize>>,
}

impl Default for Geocoder {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Geocoder {
    /// Build a geocoder over an arbitrary stop list
    pub fn new(stops: Vec<TransitStop>) -> Self {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, stop) in stops.iter().enumerate() {
            for alias in &stop.aliases {
                let key = match_key(alias);
                if key.is_empty() {
                    continue;
                }
                let entry = index.entry(key).or_default();
                if !entry.contains(&i) {
                    entry.push(i);
                }
            }
        }
        Self { stops, index }
    }

    /// Geocoder over the built-in Alexandria catalog
    pub fn builtin() -> Self {
        Self::new(builtin_stops())
    }

    /// Build the catalog described by the configuration.
    ///
    /// A GTFS file that fails to load is logged and skipped so the built-in
    /// catalog stays usable.
    pub fn from_config(config: &GeocoderConfig) -> Self {
        let mut stops = if config.include_builtin {
            builtin_stops()
        } else {
            Vec::new()
        };

        if let Some(ref path) = config.gtfs_stops_path {
            match load_gtfs_stops(path) {
                Ok(extra) => {
                    info!(path = %path.display(), count = extra.len(), "Merged GTFS stops");
                    stops.extend(extra);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to load GTFS stops"),
            }
        }

        Self::new(stops)
    }

    pub fn all_stops(&self) -> &[TransitStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TransitStop> {
        self.stops.get(index)
    }

    /// Resolve a place name to a single stop.
    ///
    /// Tries an exact alias hit, then containment against distinctive
    /// aliases (longest wins), then Arabic district names inside the query.
    pub fn geocode(&self, name: &str) -> Option<GeocodeMatch> {
        let key = match_key(name);
        if key.is_empty() {
            return None;
        }

        if let Some(indices) = self.index.get(&key) {
            return self
                .best_of(indices.iter().copied())
                .map(|i| self.build_match(i, MatchKind::Exact, &key));
        }

        if key.chars().count() >= MIN_PARTIAL_LEN {
            let mut best_len = 0;
            let mut best_alias: Option<&str> = None;
            let mut candidates: Vec<usize> = Vec::new();

            for (alias, indices) in &self.index {
                if !is_distinctive(alias) {
                    continue;
                }
                if !(key.contains(alias.as_str()) || alias.contains(key.as_str())) {
                    continue;
                }
                let len = alias.chars().count();
                if len > best_len {
                    best_len = len;
                    best_alias = Some(alias);
                    candidates.clear();
                }
                if len == best_len {
                    candidates.extend(indices.iter().copied());
                    // keep the lexicographically smallest alias for stable output
                    if best_alias.is_some_and(|b| alias.as_str() < b) {
                        best_alias = Some(alias);
                    }
                }
            }

            if let (Some(alias), Some(i)) = (best_alias, self.best_of(candidates.into_iter())) {
                return Some(self.build_match(i, MatchKind::Partial, alias));
            }
        }

        for (arabic, english) in aliases::DISTRICT_PATTERNS {
            if !key.contains(&match_key(arabic)) {
                continue;
            }
            let english = english.to_lowercase();
            let hits = self
                .stops
                .iter()
                .enumerate()
                .filter(|(_, s)| s.name.to_lowercase().contains(&english))
                .map(|(i, _)| i);
            if let Some(i) = self.best_of(hits) {
                return Some(self.build_match(i, MatchKind::District, arabic));
            }
        }

        None
    }

    /// Stops related to a query: an alias is contained in the query or the
    /// query is contained in an alias. Catalog order, no duplicates.
    pub fn search_stops(&self, query: &str, limit: usize) -> Vec<&TransitStop> {
        let key = match_key(query);
        if key.is_empty() || limit == 0 {
            return Vec::new();
        }

        self.stops
            .iter()
            .filter(|stop| {
                stop.aliases.iter().any(|alias| {
                    let alias = match_key(alias);
                    alias.contains(key.as_str())
                        || (is_distinctive(&alias) && key.contains(alias.as_str()))
                })
            })
            .take(limit)
            .collect()
    }

    /// Stops whose aliases appear in `text`, ordered by position.
    ///
    /// At each position the longest alias wins and overlapping matches are
    /// discarded, so "sidi gaber station" yields one mention, not three.
    pub fn mentions(&self, text: &str) -> Vec<Mention> {
        let key = match_key(text);
        let mut found: Vec<(usize, usize, &str)> = Vec::new();

        for alias in self.index.keys() {
            if !is_distinctive(alias) {
                continue;
            }
            for (pos, _) in key.match_indices(alias.as_str()) {
                if is_word_bounded(&key, pos, alias.len()) {
                    found.push((pos, alias.len(), alias.as_str()));
                }
            }
        }

        // position ascending, then longer alias first
        found.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)).then(a.2.cmp(b.2)));

        let mut mentions = Vec::new();
        let mut covered_until = 0;
        for (pos, len, alias) in found {
            if pos < covered_until {
                continue;
            }
            let Some(stop_index) = self
                .index
                .get(alias)
                .and_then(|indices| self.best_of(indices.iter().copied()))
            else {
                continue;
            };
            covered_until = pos + len;
            mentions.push(Mention {
                position: pos,
                alias: alias.to_string(),
                stop_index,
            });
        }

        mentions
    }

    /// Pick the preferred stop: "Station" names, then "Square" names, then
    /// the shorter name, then catalog order.
    fn best_of(&self, indices: impl Iterator<Item = usize>) -> Option<usize> {
        indices.min_by_key(|&i| {
            let name = &self.stops[i].name;
            let lower = name.to_lowercase();
            (
                !lower.contains("station"),
                !lower.contains("square"),
                name.chars().count(),
                i,
            )
        })
    }

    fn build_match(&self, index: usize, kind: MatchKind, matched: &str) -> GeocodeMatch {
        GeocodeMatch {
            stop: self.stops[index].clone(),
            kind,
            matched: matched.to_string(),
        }
    }
}

fn builtin_stops() -> Vec<TransitStop> {
    ALEXANDRIA_STOPS
        .iter()
        .map(|(id, name, lat, lon)| TransitStop::new(*id, *name, *lat, *lon))
        .collect()
}

/// Long enough and specific enough to be matched inside other text
fn is_distinctive(key: &str) -> bool {
    key.chars().count() >= MIN_PARTIAL_LEN && !aliases::is_filler(key)
}

/// Arabic glues prepositions (ل، لل، ب، و) onto the next word, so a match may
/// start right after one of those letters. Otherwise both ends must sit on a
/// word boundary.
fn is_word_bounded(text: &str, pos: usize, len: usize) -> bool {
    let before_ok = text[..pos].chars().next_back().map_or(true, |c| {
        !c.is_alphanumeric() || matches!(c, 'ل' | 'ب' | 'و')
    });
    let after_ok = text[pos + len..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geocoder() -> Geocoder {
        Geocoder::builtin()
    }

    #[test]
    fn test_catalog_size() {
        assert_eq!(geocoder().len(), 223);
    }

    #[test]
    fn test_exact_english_prefers_station() {
        let m = geocoder().geocode("Victoria").unwrap();
        assert_eq!(m.kind, MatchKind::Exact);
        assert_eq!(m.stop.name, "Victoria Station");
        assert_eq!(m.stop.stop_id, "261");
    }

    #[test]
    fn test_exact_full_name_case_insensitive() {
        let m = geocoder().geocode("raml station").unwrap();
        assert_eq!(m.stop.name, "Raml Station");
    }

    #[test]
    fn test_arabic_alias() {
        let g = geocoder();
        let m = g.geocode("سيدي جابر").unwrap();
        assert_eq!(m.stop.name, "Sidi Gaber Station");

        // alef maqsura spelling resolves the same way
        let m = g.geocode("سيدى جابر").unwrap();
        assert_eq!(m.stop.name, "Sidi Gaber Station");
    }

    #[test]
    fn test_seyouf_prefers_square() {
        let m = geocoder().geocode("السيوف").unwrap();
        assert_eq!(m.stop.name, "Al Seyouf Square");
    }

    #[test]
    fn test_partial_match() {
        let m = geocoder().geocode("Victoria Station please").unwrap();
        assert_eq!(m.kind, MatchKind::Partial);
        assert_eq!(m.stop.name, "Victoria Station");
    }

    #[test]
    fn test_filler_words_do_not_match() {
        assert!(geocoder().geocode("the station").is_none());
        assert!(geocoder().geocode("xyzzy nowhere").is_none());
        assert!(geocoder().geocode("   ").is_none());
    }

    #[test]
    fn test_search_stops() {
        let g = geocoder();
        let results = g.search_stops("seyouf", 50);
        assert!(results.len() >= 4);
        assert!(results.iter().all(|s| s.name.to_lowercase().contains("seyouf")));

        let limited = g.search_stops("seyouf", 2);
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].name, results[0].name);
    }

    #[test]
    fn test_mentions_in_order() {
        let g = geocoder();
        let mentions = g.mentions("I'm at Smouha and need Montazah");
        let names: Vec<&str> = mentions
            .iter()
            .map(|m| g.get(m.stop_index).unwrap().name.as_str())
            .collect();
        assert!(names.len() >= 2);
        assert!(names[0].contains("Smouha"));
        assert!(names[1].contains("Montazah"));
    }

    #[test]
    fn test_mentions_glued_arabic_preposition() {
        let g = geocoder();
        let mentions = g.mentions("الفلكي لسيدي جابر");
        assert_eq!(mentions.len(), 2);
        assert_eq!(g.get(mentions[1].stop_index).unwrap().name, "Sidi Gaber Station");
    }

    #[test]
    fn test_from_config_with_gtfs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stops.txt");
        std::fs::write(&path, "stop_id,stop_name,stop_lat,stop_lon\nX1,Kafr Abdo,31.22,29.95\n")
            .unwrap();

        let config = GeocoderConfig {
            gtfs_stops_path: Some(path),
            include_builtin: false,
        };
        let g = Geocoder::from_config(&config);
        assert_eq!(g.len(), 1);
        assert_eq!(g.geocode("kafr abdo").unwrap().stop.stop_id, "X1");
    }
}
