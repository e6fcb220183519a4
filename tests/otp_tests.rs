//! OpenTripPlanner client tests against a mock router

mod common;

use serde_json::json;
use transit::otp::{OtpClient, OtpError, OtpStatus, PlanRequest};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{plan_fixture, UNREACHABLE_OTP};

const VICTORIA: (f64, f64) = (31.248845, 29.980624);
const SIDI_GABER: (f64, f64) = (31.218117, 29.941997);

#[tokio::test]
async fn test_plan_trip_parses_itineraries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/otp/routers/default/plan"))
        .and(query_param("fromPlace", "31.248845,29.980624"))
        .and(query_param("toPlace", "31.218117,29.941997"))
        .and(query_param("mode", "TRANSIT,WALK"))
        .and(query_param("numItineraries", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(plan_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OtpClient::new(server.uri());
    let itineraries = client
        .plan_trip(&PlanRequest::new(VICTORIA, SIDI_GABER))
        .await
        .unwrap();

    assert_eq!(itineraries.len(), 2);

    let direct = &itineraries[0];
    assert_eq!(direct.total_duration_min, 25);
    assert_eq!(direct.total_walking_time_min, 7);
    assert!((direct.total_distance_km - 5.7).abs() < 1e-9);
    assert_eq!(direct.transfers, 0);
    assert_eq!(direct.legs.len(), 3);
    assert_eq!(direct.legs[1].route.as_deref(), Some("12"));
    assert_eq!(direct.legs[1].headsign.as_deref(), Some("Raml"));
    assert!(direct.legs[1].transit);
    assert!(direct.start_time.is_some());
    assert_eq!(direct.transit_modes(), vec!["BUS".to_string()]);

    // TRAM and BUS legs without the transitLeg flag still count as transit
    let alternative = &itineraries[1];
    assert_eq!(alternative.total_duration_min, 35);
    assert_eq!(alternative.transfers, 1);
    assert_eq!(alternative.legs[0].route.as_deref(), Some("2"));
    assert_eq!(
        alternative.transit_modes(),
        vec!["TRAM".to_string(), "BUS".to_string()]
    );
    assert!(alternative.start_time.is_none());
}

#[tokio::test]
async fn test_plan_request_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/otp/routers/default/plan"))
        .and(query_param("mode", "TRAM,WALK"))
        .and(query_param("maxWalkDistance", "500"))
        .and(query_param("wheelchair", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(plan_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = PlanRequest::new(VICTORIA, SIDI_GABER);
    request.mode = "TRAM,WALK".to_string();
    request.max_walk_distance = 500;
    request.wheelchair = true;

    let client = OtpClient::new(server.uri());
    assert!(client.plan_trip(&request).await.is_ok());
}

#[tokio::test]
async fn test_plan_trip_planner_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/otp/routers/default/plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "id": 404, "msg": "No trip found", "message": "PATH_NOT_FOUND" }
        })))
        .mount(&server)
        .await;

    let client = OtpClient::new(server.uri());
    let err = client
        .plan_trip(&PlanRequest::new(VICTORIA, SIDI_GABER))
        .await
        .unwrap_err();

    match err {
        OtpError::Planner(message) => assert_eq!(message, "PATH_NOT_FOUND"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_plan_trip_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/otp/routers/default/plan"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = OtpClient::new(server.uri());
    let err = client
        .plan_trip(&PlanRequest::new(VICTORIA, SIDI_GABER))
        .await
        .unwrap_err();
    assert!(matches!(err, OtpError::Http { status: 500 }));
}

#[tokio::test]
async fn test_plan_trip_empty_plan() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/otp/routers/default/plan"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "plan": { "itineraries": [] } })),
        )
        .mount(&server)
        .await;

    let client = OtpClient::new(server.uri());
    let err = client
        .plan_trip(&PlanRequest::new(VICTORIA, SIDI_GABER))
        .await
        .unwrap_err();
    assert!(matches!(err, OtpError::NoItineraries));
}

#[tokio::test]
async fn test_plan_trip_invalid_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/otp/routers/default/plan"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let client = OtpClient::new(server.uri());
    let err = client
        .plan_trip(&PlanRequest::new(VICTORIA, SIDI_GABER))
        .await
        .unwrap_err();
    assert!(matches!(err, OtpError::Decode(_)));
}

#[tokio::test]
async fn test_status_online() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/otp/routers/default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"routerId": "default"})))
        .mount(&server)
        .await;

    let status = OtpClient::new(server.uri()).check_status().await;
    match status {
        OtpStatus::Online(info) => assert_eq!(info["routerId"], "default"),
        other => panic!("unexpected status: {:?}", other),
    }
}

#[tokio::test]
async fn test_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/otp/routers/default"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let status = OtpClient::new(server.uri()).check_status().await;
    assert_eq!(status.label(), "error");
    assert_eq!(status.message(), Some("OTP server returned status 503"));
}

#[tokio::test]
async fn test_status_offline() {
    let client = OtpClient::new(UNREACHABLE_OTP);
    let status = client.check_status().await;
    assert_eq!(status.label(), "offline");
    assert!(!client.is_online().await);
    assert!(status
        .message()
        .unwrap()
        .starts_with("Cannot connect to OTP server"));
}
