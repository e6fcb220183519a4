use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::agent::TransitAgent;
use crate::geocoding::Geocoder;
use crate::otp::{parse_departure_date, parse_departure_time, Departure, PlanRequest};
use crate::tools::registry::Tool;
use crate::types::{AppError, Result};

const DEFAULT_SEARCH_LIMIT: usize = 10;
const MAX_SEARCH_LIMIT: usize = 100;
const MAX_ITINERARIES: u64 = 10;

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::InvalidInput(format!("'{}' must be a non-empty string", key)))
}

/// Optional `date`/`depart_time` arguments
fn departure_args(args: &Value) -> Result<Departure> {
    let optional = |key: &str| match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(AppError::InvalidInput(format!("'{}' must be a string", key))),
    };

    let date = optional("date")?
        .map(|s| {
            parse_departure_date(s)
                .map_err(|_| AppError::InvalidInput("'date' must be YYYY-MM-DD".to_string()))
        })
        .transpose()?;
    let time = optional("depart_time")?
        .map(|s| {
            parse_departure_time(s)
                .map_err(|_| AppError::InvalidInput("'depart_time' must be HH:MM".to_string()))
        })
        .transpose()?;
    Ok(Departure { date, time })
}

fn required_coordinate(args: &Value, key: &str, bound: f64) -> Result<f64> {
    let value = args
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| AppError::InvalidInput(format!("'{}' must be a number", key)))?;
    if !(-bound..=bound).contains(&value) {
        return Err(AppError::InvalidInput(format!(
            "'{}' must be between -{} and {}",
            key, bound, bound
        )));
    }
    Ok(value)
}

pub struct GeocodeLocationTool {
    geocoder: Arc<Geocoder>,
}

impl GeocodeLocationTool {
    pub fn new(geocoder: Arc<Geocoder>) -> Self {
        Self { geocoder }
    }
}

#[async_trait]
impl Tool for GeocodeLocationTool {
    fn name(&self) -> &str {
        "geocode_location"
    }

    fn description(&self) -> &str {
        "Resolve an Alexandria place name (English or Arabic) to a transit stop with coordinates"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Place or stop name" }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let name = required_str(&args, "name")?;

        Ok(match self.geocoder.geocode(name) {
            Some(found) => json!({
                "found": true,
                "query": name,
                "name": found.stop.name,
                "stop_id": found.stop.stop_id,
                "lat": found.stop.lat,
                "lon": found.stop.lon,
                "match": found.kind,
            }),
            None => json!({ "found": false, "query": name }),
        })
    }
}

pub struct SearchStopsTool {
    geocoder: Arc<Geocoder>,
}

impl SearchStopsTool {
    pub fn new(geocoder: Arc<Geocoder>) -> Self {
        Self { geocoder }
    }
}

#[async_trait]
impl Tool for SearchStopsTool {
    fn name(&self) -> &str {
        "search_stops"
    }

    fn description(&self) -> &str {
        "Search transit stops whose name or alias contains the query"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": { "type": "string" },
                "limit": { "type": "integer", "minimum": 1, "maximum": MAX_SEARCH_LIMIT, "default": DEFAULT_SEARCH_LIMIT }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let query = required_str(&args, "query")?;
        let limit = match args.get("limit") {
            None | Some(Value::Null) => DEFAULT_SEARCH_LIMIT,
            Some(v) => v
                .as_u64()
                .filter(|n| (1..=MAX_SEARCH_LIMIT as u64).contains(n))
                .ok_or_else(|| {
                    AppError::InvalidInput(format!(
                        "'limit' must be an integer between 1 and {}",
                        MAX_SEARCH_LIMIT
                    ))
                })? as usize,
        };

        let stops: Vec<Value> = self
            .geocoder
            .search_stops(query, limit)
            .into_iter()
            .map(|s| json!({ "stop_id": s.stop_id, "name": s.name, "lat": s.lat, "lon": s.lon }))
            .collect();

        Ok(json!({ "count": stops.len(), "stops": stops }))
    }
}

pub struct PlanTransitRouteTool {
    agent: Arc<TransitAgent>,
}

impl PlanTransitRouteTool {
    pub fn new(agent: Arc<TransitAgent>) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl Tool for PlanTransitRouteTool {
    fn name(&self) -> &str {
        "plan_transit_route"
    }

    fn description(&self) -> &str {
        "Plan a public transport trip between two coordinates with OpenTripPlanner"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "from_lat": { "type": "number" },
                "from_lon": { "type": "number" },
                "to_lat": { "type": "number" },
                "to_lon": { "type": "number" },
                "mode": { "type": "string", "description": "Comma-separated OTP modes, e.g. TRANSIT,WALK" },
                "num_itineraries": { "type": "integer", "minimum": 1, "maximum": MAX_ITINERARIES },
                "depart_time": { "type": "string", "description": "Departure time HH:MM; defaults to now" },
                "date": { "type": "string", "description": "Travel date YYYY-MM-DD; defaults to today" }
            },
            "required": ["from_lat", "from_lon", "to_lat", "to_lon"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let from = (
            required_coordinate(&args, "from_lat", 90.0)?,
            required_coordinate(&args, "from_lon", 180.0)?,
        );
        let to = (
            required_coordinate(&args, "to_lat", 90.0)?,
            required_coordinate(&args, "to_lon", 180.0)?,
        );

        let departure = departure_args(&args)?;

        let config = self.agent.config().config();
        let mut request = PlanRequest::new(from, to).depart_at(departure);
        request.mode = match args.get("mode").and_then(Value::as_str) {
            Some(mode) if !mode.trim().is_empty() => mode.trim().to_uppercase(),
            _ => config.otp.mode.clone(),
        };
        request.max_walk_distance = config.otp.max_walk_distance;
        request.num_itineraries = match args.get("num_itineraries") {
            None | Some(Value::Null) => config.otp.num_itineraries,
            Some(v) => v
                .as_u64()
                .filter(|n| (1..=MAX_ITINERARIES).contains(n))
                .ok_or_else(|| {
                    AppError::InvalidInput(format!(
                        "'num_itineraries' must be an integer between 1 and {}",
                        MAX_ITINERARIES
                    ))
                })? as u32,
        };

        let itineraries = self.agent.otp_client().plan_trip(&request).await?;
        let summaries: Vec<String> = itineraries.iter().map(|i| i.summary()).collect();

        Ok(json!({
            "count": itineraries.len(),
            "summaries": summaries,
            "itineraries": itineraries,
        }))
    }
}

pub struct CheckOtpConnectionTool {
    agent: Arc<TransitAgent>,
}

impl CheckOtpConnectionTool {
    pub fn new(agent: Arc<TransitAgent>) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl Tool for CheckOtpConnectionTool {
    fn name(&self) -> &str {
        "check_otp_connection"
    }

    fn description(&self) -> &str {
        "Check whether the OpenTripPlanner server is reachable"
    }

    fn parameters_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn execute(&self, _args: Value) -> Result<Value> {
        let client = self.agent.otp_client();
        let status = client.check_status().await;

        Ok(json!({
            "status": status.label(),
            "online": status.is_online(),
            "url": client.base_url(),
            "message": status.message(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geocoder() -> Arc<Geocoder> {
        Arc::new(Geocoder::builtin())
    }

    #[tokio::test]
    async fn test_geocode_location() {
        let tool = GeocodeLocationTool::new(geocoder());

        let found = tool.execute(json!({"name": "Victoria"})).await.unwrap();
        assert_eq!(found["found"], true);
        assert_eq!(found["name"], "Victoria Station");
        assert_eq!(found["match"], "exact");

        let missing = tool.execute(json!({"name": "xyzzy nowhere"})).await.unwrap();
        assert_eq!(missing["found"], false);
    }

    #[tokio::test]
    async fn test_geocode_requires_name() {
        let tool = GeocodeLocationTool::new(geocoder());
        let result = tool.execute(json!({"name": "  "})).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_search_stops_limit() {
        let tool = SearchStopsTool::new(geocoder());

        let result = tool
            .execute(json!({"query": "station", "limit": 2}))
            .await
            .unwrap();
        assert_eq!(result["count"], 2);

        let bad = tool.execute(json!({"query": "station", "limit": 0})).await;
        assert!(matches!(bad, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_departure_args() {
        let departure = departure_args(&json!({"depart_time": "08:15", "date": "2025-03-01"})).unwrap();
        assert_eq!(departure.time, chrono::NaiveTime::from_hms_opt(8, 15, 0));
        assert_eq!(departure.date, chrono::NaiveDate::from_ymd_opt(2025, 3, 1));

        assert!(departure_args(&json!({})).unwrap().is_now());
        assert!(departure_args(&json!({"depart_time": "", "date": null})).unwrap().is_now());
        assert!(matches!(
            departure_args(&json!({"depart_time": "8am"})),
            Err(AppError::InvalidInput(_))
        ));
        assert!(departure_args(&json!({"date": 20250301})).is_err());
    }

    #[test]
    fn test_coordinate_bounds() {
        let args = json!({"lat": 95.0, "lon": "x"});
        assert!(required_coordinate(&args, "lat", 90.0).is_err());
        assert!(required_coordinate(&args, "lon", 180.0).is_err());
        assert!(required_coordinate(&json!({"lat": 31.2}), "lat", 90.0).is_ok());
    }
}
