//! OpenTripPlanner response types and the parsed itinerary model.
//!
//! The `Wire*` structs mirror the OTP 1.x/2.x REST `plan` response loosely:
//! every field is optional so that partial responses still parse.
//! OTP reports durations in seconds and distances in meters.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Modes counted as transit even when OTP omits `transitLeg`
const TRANSIT_MODES: &[&str] = &["BUS", "TRAM", "RAIL", "SUBWAY", "FERRY"];

// ============= Wire Types =============

#[derive(Debug, Deserialize)]
pub(crate) struct PlanResponse {
    pub plan: Option<WirePlan>,
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WirePlan {
    #[serde(default)]
    pub itineraries: Vec<WireItinerary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireItinerary {
    pub duration: Option<f64>,
    pub walk_time: Option<f64>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    #[serde(default)]
    pub legs: Vec<WireLeg>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireLeg {
    pub mode: Option<String>,
    pub from: Option<WirePlace>,
    pub to: Option<WirePlace>,
    pub duration: Option<f64>,
    pub distance: Option<f64>,
    pub route: Option<String>,
    pub route_short_name: Option<String>,
    pub route_long_name: Option<String>,
    pub headsign: Option<String>,
    pub agency_name: Option<String>,
    pub route_type: Option<i64>,
    pub transit_leg: Option<bool>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WirePlace {
    pub name: Option<String>,
}

/// Error text from an OTP `error` object (`message`, else `msg`)
pub(crate) fn planner_error_message(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("message")
            .or_else(|| map.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}

// ============= Parsed Model =============

/// One leg of a trip
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Leg {
    pub mode: String,
    pub from_name: String,
    pub to_name: String,
    pub duration_min: u32,
    pub distance_km: f64,
    /// Route label: `route`, else short name, else long name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_long_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headsign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_type: Option<i64>,
    pub transit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl Leg {
    pub fn is_walk(&self) -> bool {
        self.mode == "WALK"
    }
}

/// A complete trip option returned by the planner
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Itinerary {
    pub total_duration_min: u32,
    pub total_distance_km: f64,
    pub total_walking_time_min: u32,
    pub transfers: u32,
    pub legs: Vec<Leg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl Itinerary {
    /// One-line description: `Walk 5 min → Take BUS 12 to Raml from A to B`
    pub fn summary(&self) -> String {
        self.legs
            .iter()
            .map(|leg| {
                if leg.is_walk() {
                    return format!("Walk {} min", leg.duration_min);
                }
                let mut part = format!("Take {}", leg.mode);
                if let Some(ref route) = leg.route {
                    part.push(' ');
                    part.push_str(route);
                }
                if let Some(ref headsign) = leg.headsign {
                    part.push_str(" to ");
                    part.push_str(headsign);
                }
                part.push_str(&format!(" from {} to {}", leg.from_name, leg.to_name));
                part
            })
            .collect::<Vec<_>>()
            .join(" → ")
    }

    /// Distinct non-walking modes in order of first use
    pub fn transit_modes(&self) -> Vec<String> {
        let mut modes: Vec<String> = Vec::new();
        for leg in self.legs.iter().filter(|l| !l.is_walk()) {
            if !modes.contains(&leg.mode) {
                modes.push(leg.mode.clone());
            }
        }
        modes
    }
}

fn seconds_to_minutes(seconds: f64) -> u32 {
    (seconds.max(0.0) / 60.0).round() as u32
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn epoch_ms(ms: Option<i64>) -> Option<DateTime<Utc>> {
    ms.and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl From<WireLeg> for Leg {
    fn from(leg: WireLeg) -> Self {
        let mode = leg.mode.clone().unwrap_or_else(|| "WALK".to_string());
        let transit =
            leg.transit_leg.unwrap_or(false) || TRANSIT_MODES.contains(&mode.as_str());
        let route = non_empty(&leg.route)
            .or_else(|| non_empty(&leg.route_short_name))
            .or_else(|| non_empty(&leg.route_long_name));

        Leg {
            from_name: leg
                .from
                .and_then(|p| p.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            to_name: leg
                .to
                .and_then(|p| p.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            duration_min: seconds_to_minutes(leg.duration.unwrap_or(0.0)),
            distance_km: leg.distance.unwrap_or(0.0) / 1000.0,
            route,
            route_short_name: non_empty(&leg.route_short_name),
            route_long_name: non_empty(&leg.route_long_name),
            headsign: non_empty(&leg.headsign),
            agency_name: non_empty(&leg.agency_name),
            route_type: leg.route_type,
            transit,
            start_time: epoch_ms(leg.start_time),
            end_time: epoch_ms(leg.end_time),
            mode,
        }
    }
}

impl From<WireItinerary> for Itinerary {
    fn from(itinerary: WireItinerary) -> Self {
        let total_distance_m: f64 = itinerary.legs.iter().filter_map(|l| l.distance).sum();

        let walk_seconds = itinerary.walk_time.unwrap_or_else(|| {
            itinerary
                .legs
                .iter()
                .filter(|l| l.mode.as_deref() == Some("WALK"))
                .filter_map(|l| l.duration)
                .sum()
        });

        let legs: Vec<Leg> = itinerary.legs.into_iter().map(Leg::from).collect();
        let transit_legs = legs.iter().filter(|l| l.transit).count() as u32;

        Itinerary {
            total_duration_min: seconds_to_minutes(itinerary.duration.unwrap_or(0.0)),
            total_distance_km: round2(total_distance_m / 1000.0),
            total_walking_time_min: seconds_to_minutes(walk_seconds),
            transfers: transit_legs.saturating_sub(1),
            legs,
            start_time: epoch_ms(itinerary.start_time),
            end_time: epoch_ms(itinerary.end_time),
        }
    }
}
