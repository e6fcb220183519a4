//! Query pipeline: language → locations → stops → memory → trip plan → reply.

pub mod format;

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::geocoding::Geocoder;
use crate::llm::{LLMClient, LLMClientFactory};
use crate::memory::{MemoryStore, UserPreferences};
use crate::nlu::{detect_language, extract_locations, ExtractionMethod, LlmLocationExtractor};
use crate::otp::{Departure, Itinerary, OtpClient, OtpStatus, PlanRequest};
use crate::types::{Language, QueryResponse, ReplySource, ResolvedPlace, Result, StatusResponse};
use crate::utils::toml_config::{OtpConfig, TransitConfigManager};

/// Everything produced for one query
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub text: String,
    pub language: Language,
    pub source: ReplySource,
    pub from: Option<ResolvedPlace>,
    pub to: Option<ResolvedPlace>,
    pub itineraries: Vec<Itinerary>,
    /// `None` when no locations were extracted
    pub extraction: Option<ExtractionMethod>,
}

impl AgentReply {
    fn message(text: String, language: Language, source: ReplySource) -> Self {
        Self {
            text,
            language,
            source,
            from: None,
            to: None,
            itineraries: Vec::new(),
            extraction: None,
        }
    }

    pub fn into_query_response(self, query: String, request_id: String) -> QueryResponse {
        QueryResponse {
            success: true,
            query,
            response: self.text,
            language: self.language,
            source: self.source,
            from: self.from,
            to: self.to,
            itineraries: self.itineraries,
            request_id,
        }
    }
}

/// Health of the components the agent depends on
#[derive(Debug, Clone)]
pub struct SystemStatus {
    pub otp: OtpStatus,
    pub otp_url: String,
    pub geocoder_stops: usize,
    /// An existing memory file was read at startup
    pub memory_loaded: bool,
    pub memory_file: PathBuf,
    pub llm_model: Option<String>,
}

impl SystemStatus {
    pub fn is_healthy(&self) -> bool {
        self.otp.is_online()
    }
}

impl From<SystemStatus> for StatusResponse {
    fn from(status: SystemStatus) -> Self {
        StatusResponse {
            status: if status.is_healthy() {
                "healthy".to_string()
            } else {
                "degraded".to_string()
            },
            otp_status: status.otp.is_online(),
            otp_url: status.otp_url,
            otp_detail: status.otp.message().map(str::to_string),
            geocoder_stops: status.geocoder_stops,
            memory_loaded: status.memory_loaded,
            llm_configured: status.llm_model.is_some(),
        }
    }
}

/// Transit assistant for Alexandria.
///
/// Cheap to share behind an `Arc`; configuration is read on every query so
/// hot reloads of `[otp]` apply without a restart.
pub struct TransitAgent {
    config: Arc<TransitConfigManager>,
    geocoder: Arc<Geocoder>,
    memory: Arc<MemoryStore>,
    http: Client,
    extractor: Option<LlmLocationExtractor>,
}

impl TransitAgent {
    pub fn new(
        config: Arc<TransitConfigManager>,
        geocoder: Arc<Geocoder>,
        memory: Arc<MemoryStore>,
    ) -> Self {
        Self {
            config,
            geocoder,
            memory,
            http: Client::new(),
            extractor: None,
        }
    }

    /// Use `llm` when the rule-based extractors find nothing
    pub fn with_llm(mut self, llm: Arc<dyn LLMClient>) -> Self {
        self.extractor = Some(LlmLocationExtractor::new(llm));
        self
    }

    /// Build the geocoder, memory store and optional LLM from the current
    /// configuration
    pub fn from_config(config: Arc<TransitConfigManager>) -> Result<Self> {
        let current = config.config();
        let geocoder = Arc::new(Geocoder::from_config(&current.geocoder));
        let memory = Arc::new(MemoryStore::from_config(&current.memory));
        let llm = LLMClientFactory::from_config(&current.llm).create_default()?;

        info!(
            stops = geocoder.len(),
            memory_file = %memory.path().display(),
            llm = llm.as_ref().map(|c| c.model_name()).unwrap_or("disabled"),
            "Transit agent initialized"
        );

        let agent = Self::new(config, geocoder, memory);
        Ok(match llm {
            Some(llm) => agent.with_llm(llm),
            None => agent,
        })
    }

    pub fn geocoder(&self) -> &Arc<Geocoder> {
        &self.geocoder
    }

    pub fn memory(&self) -> &Arc<MemoryStore> {
        &self.memory
    }

    pub fn config(&self) -> &Arc<TransitConfigManager> {
        &self.config
    }

    /// OTP client for the current `[otp]` section
    pub fn otp_client(&self) -> OtpClient {
        OtpClient::from_config(self.http.clone(), &self.config.config().otp)
    }

    /// Answer a natural-language transit question, departing now
    pub async fn process_query(&self, query: &str) -> AgentReply {
        self.process_query_at(query, Departure::default()).await
    }

    /// Answer a transit question for a given departure date and time
    pub async fn process_query_at(&self, query: &str, departure: Departure) -> AgentReply {
        let prefs = self.memory.preferences();
        let language = detect_language(query, prefs.language());
        info!(language = %language, "Processing query");

        let pair = match extract_locations(query, &self.geocoder) {
            Some(pair) => Some(pair),
            None => self.extract_with_llm(query).await,
        };

        let Some(pair) = pair else {
            debug!("No locations extracted");
            return AgentReply::message(
                format::clarification(language),
                language,
                ReplySource::Clarification,
            );
        };
        debug!(from = %pair.from, to = %pair.to, method = ?pair.method, "Locations extracted");

        let Some(from) = self.resolve(&[pair.from.as_str()]) else {
            info!(place = %pair.from, "Origin not found");
            let mut reply = AgentReply::message(
                format::not_found(&pair.from, language),
                language,
                ReplySource::NotFound,
            );
            reply.extraction = Some(pair.method);
            return reply;
        };

        let to_candidates: Vec<&str> = pair.to_candidates().collect();
        let Some(to) = self.resolve(&to_candidates) else {
            info!(place = %pair.to, "Destination not found");
            let mut reply = AgentReply::message(
                format::not_found(&pair.to, language),
                language,
                ReplySource::NotFound,
            );
            reply.from = Some(from);
            reply.extraction = Some(pair.method);
            return reply;
        };

        self.remember(query, &from, &to).await;

        let otp = self.config.config().otp.clone();
        let request = plan_request(&from, &to, &prefs, &otp).depart_at(departure);
        let client = OtpClient::from_config(self.http.clone(), &otp);

        let (text, source, itineraries) = match client.plan_trip(&request).await {
            Ok(itineraries) if !itineraries.is_empty() => {
                let itineraries = within_transfer_limit(itineraries, prefs.max_transfers);
                (
                    format::trip_plan(&itineraries, &from, &to, language),
                    ReplySource::Otp,
                    itineraries,
                )
            }
            Ok(_) => (
                format::fallback(&from, &to, language),
                ReplySource::Fallback,
                Vec::new(),
            ),
            Err(e) => {
                warn!(error = %e, "Trip planning failed, using fallback reply");
                (
                    format::fallback(&from, &to, language),
                    ReplySource::Fallback,
                    Vec::new(),
                )
            }
        };

        AgentReply {
            text,
            language,
            source,
            from: Some(from),
            to: Some(to),
            itineraries,
            extraction: Some(pair.method),
        }
    }

    /// Probe OTP and report on the local components
    pub async fn check_system_status(&self) -> SystemStatus {
        let client = self.otp_client();
        let otp = client.check_status().await;
        if !otp.is_online() {
            warn!(status = otp.label(), "OTP server not available");
        }

        SystemStatus {
            otp,
            otp_url: client.base_url().to_string(),
            geocoder_stops: self.geocoder.len(),
            memory_loaded: self.memory.loaded_from_disk(),
            memory_file: self.memory.path().to_path_buf(),
            llm_model: self
                .extractor
                .as_ref()
                .map(|e| e.model_name().to_string()),
        }
    }

    async fn extract_with_llm(&self, query: &str) -> Option<crate::nlu::LocationPair> {
        let extractor = self.extractor.as_ref()?;
        match extractor.extract(query).await {
            Ok(pair) => pair,
            Err(e) => {
                warn!(error = %e, "LLM location extraction failed");
                None
            }
        }
    }

    /// First candidate that geocodes, then first candidate with a search hit
    fn resolve(&self, candidates: &[&str]) -> Option<ResolvedPlace> {
        let candidates: Vec<&str> = candidates
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();

        let found = candidates
            .iter()
            .find_map(|&c| self.geocoder.geocode(c).map(|m| (c, m.stop)))
            .or_else(|| {
                candidates.iter().find_map(|&c| {
                    self.geocoder
                        .search_stops(c, 1)
                        .into_iter()
                        .next()
                        .map(|stop| (c, stop.clone()))
                })
            })?;

        let (query, stop) = found;
        Some(ResolvedPlace {
            query: query.to_string(),
            name: stop.name,
            lat: stop.lat,
            lon: stop.lon,
            stop_id: stop.stop_id,
        })
    }

    /// Record both places and the search; file writes run off the async workers
    async fn remember(&self, query: &str, from: &ResolvedPlace, to: &ResolvedPlace) {
        let memory = Arc::clone(&self.memory);
        let query = query.to_string();
        let (from, to) = (from.clone(), to.clone());

        let task = tokio::task::spawn_blocking(move || {
            for place in [&from, &to] {
                if let Err(e) = memory.add_recent_location(&place.name, place.lat, place.lon) {
                    warn!(error = %e, place = %place.name, "Failed to record recent location");
                }
            }
            if let Err(e) = memory.add_search(&query, &from.name, &to.name) {
                warn!(error = %e, "Failed to record search");
            }
        });

        if let Err(e) = task.await {
            warn!(error = %e, "Memory update task failed");
        }
    }
}

/// OTP mode list from the preferred modes, always including `WALK`.
///
/// Falls back to the configured mode string when no preference is set.
pub fn plan_modes(preferred: &[String], fallback: &str) -> String {
    let mut modes: Vec<String> = Vec::new();
    for mode in preferred
        .iter()
        .map(|m| m.trim().to_uppercase())
        .filter(|m| !m.is_empty())
    {
        if !modes.contains(&mode) {
            modes.push(mode);
        }
    }

    if modes.is_empty() {
        return fallback.to_string();
    }
    if !modes.iter().any(|m| m == "WALK") {
        modes.push("WALK".to_string());
    }
    modes.join(",")
}

fn plan_request(
    from: &ResolvedPlace,
    to: &ResolvedPlace,
    prefs: &UserPreferences,
    otp: &OtpConfig,
) -> PlanRequest {
    let mut request = PlanRequest::new((from.lat, from.lon), (to.lat, to.lon));
    request.mode = plan_modes(&prefs.preferred_transit_modes, &otp.mode);
    request.max_walk_distance = if prefs.max_walking_distance > 0 {
        prefs.max_walking_distance
    } else {
        otp.max_walk_distance
    };
    request.wheelchair = prefs.wheelchair_accessible;
    request.num_itineraries = otp.num_itineraries;
    request
}

/// Drop itineraries over the transfer limit unless none would remain
pub fn within_transfer_limit(itineraries: Vec<Itinerary>, max_transfers: u32) -> Vec<Itinerary> {
    let (kept, over): (Vec<_>, Vec<_>) = itineraries
        .into_iter()
        .partition(|i| i.transfers <= max_transfers);
    if kept.is_empty() {
        over
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryLimits;
    use crate::utils::toml_config::TransitConfig;

    fn agent(dir: &tempfile::TempDir) -> TransitAgent {
        let mut config = TransitConfig::default();
        // Nothing listens on port 1
        config.otp.base_url = "http://127.0.0.1:1".to_string();
        config.otp.timeout_secs = 2;
        config.otp.status_timeout_secs = 2;

        TransitAgent::new(
            Arc::new(TransitConfigManager::from_config(config)),
            Arc::new(Geocoder::builtin()),
            Arc::new(MemoryStore::open(
                dir.path().join("memory.json"),
                MemoryLimits::default(),
            )),
        )
    }

    fn itinerary(transfers: u32) -> Itinerary {
        Itinerary {
            total_duration_min: 20 + transfers,
            total_distance_km: 5.0,
            total_walking_time_min: 5,
            transfers,
            legs: Vec::new(),
            start_time: None,
            end_time: None,
        }
    }

    #[test]
    fn test_plan_modes() {
        let prefs = vec!["transit".to_string(), "BUS".to_string(), "BUS".to_string()];
        assert_eq!(plan_modes(&prefs, "TRANSIT,WALK"), "TRANSIT,BUS,WALK");
        assert_eq!(plan_modes(&[], "TRANSIT,WALK"), "TRANSIT,WALK");
        assert_eq!(
            plan_modes(&["WALK".to_string(), "TRAM".to_string()], "X"),
            "WALK,TRAM"
        );
    }

    #[test]
    fn test_transfer_limit() {
        let kept = within_transfer_limit(vec![itinerary(0), itinerary(3), itinerary(1)], 1);
        assert_eq!(kept.iter().map(|i| i.transfers).collect::<Vec<_>>(), vec![0, 1]);

        let all = within_transfer_limit(vec![itinerary(4), itinerary(3)], 2);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_plan_request_uses_preferences() {
        let from = ResolvedPlace {
            query: "a".into(),
            name: "A".into(),
            lat: 31.2,
            lon: 29.9,
            stop_id: "1".into(),
        };
        let to = ResolvedPlace {
            lat: 31.3,
            ..from.clone()
        };
        let prefs = UserPreferences {
            max_walking_distance: 600,
            wheelchair_accessible: true,
            ..Default::default()
        };
        let otp = OtpConfig {
            num_itineraries: 5,
            ..Default::default()
        };

        let request = plan_request(&from, &to, &prefs, &otp);
        assert_eq!(request.mode, "TRANSIT,BUS,WALK");
        assert_eq!(request.max_walk_distance, 600);
        assert!(request.wheelchair);
        assert_eq!(request.num_itineraries, 5);
        assert_eq!(request.to_lat, 31.3);
    }

    #[tokio::test]
    async fn test_clarification_when_no_locations() {
        let dir = tempfile::tempdir().unwrap();
        let agent = agent(&dir);

        let reply = agent.process_query("hello there").await;
        assert_eq!(reply.source, ReplySource::Clarification);
        assert_eq!(reply.language, Language::English);
        assert!(reply.text.starts_with("Please specify"));

        let reply = agent.process_query("مرحبا بيك").await;
        assert_eq!(reply.language, Language::Arabic);
        assert!(reply.text.starts_with("من فضلك"));
    }

    #[tokio::test]
    async fn test_not_found_names_place() {
        let dir = tempfile::tempdir().unwrap();
        let agent = agent(&dir);

        let reply = agent
            .process_query("from Xyzzyville to Sidi Gaber")
            .await;
        assert_eq!(reply.source, ReplySource::NotFound);
        assert!(reply.text.contains("**Xyzzyville**"));
        assert!(agent.memory().search_history(10).is_empty());
    }

    #[tokio::test]
    async fn test_fallback_when_otp_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let agent = agent(&dir);

        let reply = agent
            .process_query("عايز أروح من الفلكي لسيدي جابر")
            .await;
        assert_eq!(reply.source, ReplySource::Fallback);
        assert_eq!(reply.language, Language::Arabic);
        assert_eq!(reply.to.as_ref().map(|p| p.name.as_str()), Some("Sidi Gaber Station"));
        assert!(reply.text.contains("خطة الرحلة"));

        // Both places and the search were remembered
        assert_eq!(agent.memory().recent_locations(10).len(), 2);
        let history = agent.memory().search_history(10);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].to_location, "Sidi Gaber Station");
    }

    #[tokio::test]
    async fn test_status_reports_offline_otp() {
        let dir = tempfile::tempdir().unwrap();
        let agent = agent(&dir);

        let status = agent.check_system_status().await;
        assert!(!status.is_healthy());
        assert_eq!(status.otp.label(), "offline");
        assert_eq!(status.geocoder_stops, 223);
        assert!(status.llm_model.is_none());

        let response = StatusResponse::from(status);
        assert_eq!(response.status, "degraded");
        assert!(!response.otp_status);
    }
}
