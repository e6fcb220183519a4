use std::time::Duration;

use chrono::{NaiveDate, NaiveTime, ParseError};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::types::{planner_error_message, Itinerary, PlanResponse};
use crate::utils::toml_config::OtpConfig;

/// Errors from the trip planner
#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    #[error("OTP returned HTTP {status}")]
    Http { status: u16 },

    #[error("OTP planner error: {0}")]
    Planner(String),

    #[error("No itineraries found")]
    NoItineraries,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid OTP response: {0}")]
    Decode(String),
}

/// Result of probing the router endpoint
#[derive(Debug, Clone)]
pub enum OtpStatus {
    /// Router answered 200; its JSON description is kept
    Online(Value),
    /// Router answered with another status
    Error(String),
    /// Router could not be reached
    Offline(String),
}

impl OtpStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, OtpStatus::Online(_))
    }

    /// `online`, `error` or `offline`
    pub fn label(&self) -> &'static str {
        match self {
            OtpStatus::Online(_) => "online",
            OtpStatus::Error(_) => "error",
            OtpStatus::Offline(_) => "offline",
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            OtpStatus::Online(_) => None,
            OtpStatus::Error(m) | OtpStatus::Offline(m) => Some(m),
        }
    }
}

/// Requested departure; parts left unset mean "now" to the planner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Departure {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl Departure {
    pub fn is_now(&self) -> bool {
        self.date.is_none() && self.time.is_none()
    }
}

/// `HH:MM` or `HH:MM:SS`
pub fn parse_departure_time(value: &str) -> Result<NaiveTime, ParseError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
}

/// `YYYY-MM-DD`
pub fn parse_departure_date(value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
}

/// Trip planning parameters
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
    pub mode: String,
    pub max_walk_distance: u32,
    pub arrive_by: bool,
    pub num_itineraries: u32,
    pub wheelchair: bool,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl PlanRequest {
    /// Request between two points with the planner defaults
    pub fn new(from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            from_lat: from.0,
            from_lon: from.1,
            to_lat: to.0,
            to_lon: to.1,
            mode: "TRANSIT,WALK".to_string(),
            max_walk_distance: 2000,
            arrive_by: false,
            num_itineraries: 3,
            wheelchair: false,
            date: None,
            time: None,
        }
    }

    pub fn depart_at(mut self, departure: Departure) -> Self {
        self.date = departure.date;
        self.time = departure.time;
        self
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("fromPlace", format!("{},{}", self.from_lat, self.from_lon)),
            ("toPlace", format!("{},{}", self.to_lat, self.to_lon)),
            ("mode", self.mode.clone()),
            ("maxWalkDistance", self.max_walk_distance.to_string()),
            ("arriveBy", self.arrive_by.to_string()),
            ("numItineraries", self.num_itineraries.to_string()),
            ("wheelchair", self.wheelchair.to_string()),
        ];
        if let Some(date) = self.date {
            params.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(time) = self.time {
            params.push(("time", time.format("%H:%M").to_string()));
        }
        params
    }
}

/// HTTP client for an OpenTripPlanner router
#[derive(Debug, Clone)]
pub struct OtpClient {
    http: Client,
    base_url: String,
    router: String,
    plan_timeout: Duration,
    status_timeout: Duration,
}

impl OtpClient {
    /// Client for `base_url` with the `default` router and default timeouts
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            router: "default".to_string(),
            plan_timeout: Duration::from_secs(20),
            status_timeout: Duration::from_secs(5),
        }
    }

    /// Client sharing an existing connection pool, configured from `[otp]`
    pub fn from_config(http: Client, config: &OtpConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            router: config.router.clone(),
            plan_timeout: Duration::from_secs(config.timeout_secs),
            status_timeout: Duration::from_secs(config.status_timeout_secs),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn router_url(&self) -> String {
        format!("{}/otp/routers/{}", self.base_url, self.router)
    }

    /// Probe `GET /otp/routers/{router}`
    pub async fn check_status(&self) -> OtpStatus {
        let url = self.router_url();
        debug!(url = %url, "Checking OTP router status");

        let response = match self
            .http
            .get(&url)
            .timeout(self.status_timeout)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return OtpStatus::Offline(format!("Cannot connect to OTP server: {}", e));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            return OtpStatus::Error(format!("OTP server returned status {}", status.as_u16()));
        }

        // A 200 with a non-JSON body still means the router is up
        let info = response.json::<Value>().await.unwrap_or(Value::Null);
        OtpStatus::Online(info)
    }

    /// Convenience wrapper over [`check_status`](Self::check_status)
    pub async fn is_online(&self) -> bool {
        self.check_status().await.is_online()
    }

    /// Plan a trip and parse every returned itinerary
    pub async fn plan_trip(&self, request: &PlanRequest) -> Result<Vec<Itinerary>, OtpError> {
        let url = format!("{}/plan", self.router_url());
        info!(
            from = %format!("{:.5},{:.5}", request.from_lat, request.from_lon),
            to = %format!("{:.5},{:.5}", request.to_lat, request.to_lon),
            mode = %request.mode,
            "Requesting OTP trip plan"
        );

        let response = self
            .http
            .get(&url)
            .query(&request.query_params())
            .timeout(self.plan_timeout)
            .send()
            .await
            .map_err(|e| OtpError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "OTP plan request failed");
            return Err(OtpError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| OtpError::Network(e.to_string()))?;
        let parsed: PlanResponse =
            serde_json::from_str(&body).map_err(|e| OtpError::Decode(e.to_string()))?;

        if let Some(ref error) = parsed.error {
            if !error.is_null() {
                return Err(OtpError::Planner(planner_error_message(error)));
            }
        }

        let plan = parsed.plan.ok_or(OtpError::NoItineraries)?;
        if plan.itineraries.is_empty() {
            return Err(OtpError::NoItineraries);
        }

        let itineraries: Vec<Itinerary> =
            plan.itineraries.into_iter().map(Itinerary::from).collect();
        debug!(count = itineraries.len(), "Parsed OTP itineraries");
        Ok(itineraries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = OtpClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.router_url(), "http://localhost:8080/otp/routers/default");
    }

    #[test]
    fn test_from_config_router() {
        let config = OtpConfig {
            router: "alex".to_string(),
            base_url: "http://otp:9090//".to_string(),
            ..Default::default()
        };
        let client = OtpClient::from_config(Client::new(), &config);
        assert_eq!(client.router_url(), "http://otp:9090/otp/routers/alex");
    }

    #[test]
    fn test_query_params() {
        let mut request = PlanRequest::new((31.2, 29.9), (31.25, 29.98));
        request.wheelchair = true;
        request.date = NaiveDate::from_ymd_opt(2025, 3, 1);
        request.time = NaiveTime::from_hms_opt(8, 30, 0);

        let params = request.query_params();
        let get = |k: &str| params.iter().find(|(key, _)| *key == k).map(|(_, v)| v.as_str());

        assert_eq!(get("fromPlace"), Some("31.2,29.9"));
        assert_eq!(get("toPlace"), Some("31.25,29.98"));
        assert_eq!(get("mode"), Some("TRANSIT,WALK"));
        assert_eq!(get("arriveBy"), Some("false"));
        assert_eq!(get("wheelchair"), Some("true"));
        assert_eq!(get("numItineraries"), Some("3"));
        assert_eq!(get("date"), Some("2025-03-01"));
        assert_eq!(get("time"), Some("08:30"));
    }

    #[test]
    fn test_parse_departure() {
        assert_eq!(parse_departure_time("08:30").ok(), NaiveTime::from_hms_opt(8, 30, 0));
        assert_eq!(parse_departure_time(" 17:05:30 ").ok(), NaiveTime::from_hms_opt(17, 5, 30));
        assert!(parse_departure_time("25:00").is_err());
        assert!(parse_departure_time("half past eight").is_err());

        assert_eq!(parse_departure_date("2025-03-01").ok(), NaiveDate::from_ymd_opt(2025, 3, 1));
        assert!(parse_departure_date("01/03/2025").is_err());

        let departure = Departure {
            date: None,
            time: NaiveTime::from_hms_opt(7, 0, 0),
        };
        let request = PlanRequest::new((31.2, 29.9), (31.25, 29.98)).depart_at(departure);
        assert_eq!(request.time, departure.time);
        assert!(request.date.is_none());
        assert!(Departure::default().is_now());
        assert!(!departure.is_now());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(OtpStatus::Online(Value::Null).label(), "online");
        assert!(OtpStatus::Online(Value::Null).message().is_none());
        assert_eq!(OtpStatus::Offline("down".into()).message(), Some("down"));
        assert!(!OtpStatus::Error("500".into()).is_online());
    }
}
