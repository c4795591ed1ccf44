//! End-to-end pipeline tests against mock HTTP servers.
//!
//! Each test serves a page from one wiremock server and the geocoding API
//! from another, then asserts on the serialized report.

use std::time::Duration;

use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use geo_validator::{Config, Report, Validator};

const MANILA_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Intramuros walking guide</title>
    <link rel="icon" href="/img/favicon.ico">
    <meta name="geo.position" content="14.5965788;120.9445404">
    <meta name="geo.region" content="PH-MNL">
    <meta name="geo.placename" content="Manila">
    <meta name="ICBM" content="14.5965788, 120.9445404">
    <meta name="DC.title" content="Intramuros">
</head>
<body><p>Walls and churches.</p></body>
</html>"#;

async fn serve_page(html: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html.to_string()))
        .mount(&server)
        .await;
    server
}

fn validator_against(geocoder: &MockServer) -> Validator {
    let config = Config {
        access_token: "test-token".to_string(),
        geocoding_url: geocoder.uri(),
        ..Default::default()
    };
    Validator::new(&config).expect("validator should initialize")
}

fn geocoder_feature(center: [f64; 2]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "features": [{
            "center": center,
            "place_name": "Manila, Philippines",
        }]
    }))
}

fn to_json(report: &Report) -> Value {
    serde_json::to_value(report).expect("report should serialize")
}

#[tokio::test]
async fn test_fully_valid_page() {
    let page = serve_page(MANILA_PAGE).await;
    let geocoder = MockServer::start().await;

    // The probe must carry the query as one encoded path segment plus the
    // three expected query parameters
    Mock::given(method("GET"))
        .and(path_regex(
            r"^/geocoding/v5/mapbox\.places/Manila%20Manila%20Philippines\.json$",
        ))
        .and(query_param("language", "en-US"))
        .and(query_param("access_token", "test-token"))
        .and(query_param("limit", "1"))
        .respond_with(geocoder_feature([120.9842, 14.5995]))
        .expect(1)
        .mount(&geocoder)
        .await;

    let validator = validator_against(&geocoder);
    let report = validator.validate(&page.uri()).await;

    assert!(!report.is_halted());
    assert!(report.is_successful());

    let json = to_json(&report);
    assert_eq!(json["title"], "Intramuros walking guide");
    assert_eq!(
        json["favicon"],
        format!("{}/img/favicon.ico", page.uri())
    );

    let metrics = &json["metrics"];
    for name in [
        "geo.position",
        "geo.region",
        "geo.placename",
        "ICBM",
        "DC.title",
        "plausibility",
    ] {
        assert_eq!(metrics[name]["is_valid"], true, "metric {name}");
        assert_eq!(metrics[name]["errors"], json!([]), "metric {name}");
    }

    assert_eq!(metrics["geo.position"]["data"]["lat"], "14.5965788");
    assert_eq!(metrics["geo.region"]["data"]["country"], "Philippines");
    assert_eq!(metrics["geo.region"]["data"]["region"], "Manila");
    assert_eq!(
        metrics["plausibility"]["data"]["query"],
        "Manila Manila Philippines"
    );
    assert_eq!(metrics["plausibility"]["data"]["distance"], "4km");
    assert_eq!(
        metrics["plausibility"]["data"]["feature"]["center"],
        json!([120.9842, 14.5995])
    );
}

#[tokio::test]
async fn test_position_far_from_geocoded_placename() {
    // A page that claims Paris coordinates but declares the Tokyo region;
    // the geocoder resolves the query near Tokyo, ~9,700km away
    let page = serve_page(
        r#"<html><head>
            <meta name="geo.position" content="48.8566;2.3522">
            <meta name="geo.region" content="JP-13">
            <meta name="geo.placename" content="Paris">
            <meta name="ICBM" content="48.8566,2.3522">
            <meta name="DC.title" content="Paris office">
        </head></html>"#,
    )
    .await;

    let geocoder = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/geocoding/v5/mapbox\.places/.+\.json$"))
        .respond_with(geocoder_feature([139.6917, 35.6895]))
        .mount(&geocoder)
        .await;

    let report = validator_against(&geocoder).validate(&page.uri()).await;
    assert!(!report.is_halted());
    assert!(!report.is_successful());

    let json = to_json(&report);
    let plausibility = &json["metrics"]["plausibility"];
    assert_eq!(
        plausibility["errors"],
        json!(["The position seems too far away from the geocoding result."])
    );
    assert_eq!(
        plausibility["data"]["query"],
        "Paris Tokyo Japan"
    );
    let distance = plausibility["data"]["distance"]
        .as_str()
        .expect("distance string");
    assert!(
        distance.starts_with("9,7") && distance.ends_with("km"),
        "unexpected distance {distance}"
    );
}

#[tokio::test]
async fn test_missing_position_skips_geocoder() {
    let page = serve_page(
        r#"<html><head>
            <meta name="geo.region" content="PH-MNL">
            <meta name="geo.placename" content="Manila">
            <meta name="DC.title" content="Intramuros">
        </head></html>"#,
    )
    .await;

    let geocoder = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&geocoder)
        .await;

    let report = validator_against(&geocoder).validate(&page.uri()).await;
    assert!(!report.is_halted());
    assert!(!report.is_successful());

    let json = to_json(&report);
    let metrics = &json["metrics"];
    assert_eq!(
        metrics["geo.position"]["errors"],
        json!([r#"Could not find "geo.position" tag."#])
    );
    assert_eq!(
        metrics["plausibility"]["errors"],
        json!(["Could not perform plausibility check."])
    );
    // The other declared tags still validate on their own
    assert_eq!(metrics["geo.region"]["is_valid"], true);
    assert_eq!(metrics["geo.placename"]["is_valid"], true);
}

#[tokio::test]
async fn test_icbm_mismatch_does_not_affect_success() {
    let page = serve_page(
        r#"<html><head>
            <meta name="geo.position" content="14.5965788;120.9445404">
            <meta name="geo.region" content="PH-MNL">
            <meta name="geo.placename" content="Manila">
            <meta name="ICBM" content="14.60,120.94">
            <meta name="DC.title" content="Intramuros">
        </head></html>"#,
    )
    .await;

    let geocoder = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(geocoder_feature([120.9842, 14.5995]))
        .mount(&geocoder)
        .await;

    let report = validator_against(&geocoder).validate(&page.uri()).await;
    assert!(report.is_successful());

    let json = to_json(&report);
    assert_eq!(
        json["metrics"]["ICBM"]["errors"],
        json!([
            r#""Latitude" does not match "geo.position"."#,
            r#""Longitude" does not match "geo.position"."#,
        ])
    );
    assert_eq!(json["metrics"]["ICBM"]["is_valid"], false);
}

#[tokio::test]
async fn test_invalid_url_halts() {
    let geocoder = MockServer::start().await;
    let report = validator_against(&geocoder).validate("not-a-url").await;

    assert_eq!(
        to_json(&report),
        json!({"is_halted": true, "halted_msg": "Invalid url."})
    );
}

#[tokio::test]
async fn test_unreachable_page_halts() {
    let page = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&page)
        .await;

    let geocoder = MockServer::start().await;
    let report = validator_against(&geocoder).validate(&page.uri()).await;

    assert_eq!(
        to_json(&report),
        json!({"is_halted": true, "halted_msg": "Could not access URL."})
    );
}

#[tokio::test]
async fn test_empty_body_halts() {
    let page = serve_page("").await;
    let geocoder = MockServer::start().await;
    let report = validator_against(&geocoder).validate(&page.uri()).await;

    assert_eq!(
        to_json(&report),
        json!({"is_halted": true, "halted_msg": "HTML is empty."})
    );
}

#[tokio::test]
async fn test_geocoder_failure_halts() {
    let page = serve_page(MANILA_PAGE).await;
    let geocoder = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&geocoder)
        .await;

    let report = validator_against(&geocoder).validate(&page.uri()).await;
    assert_eq!(
        to_json(&report),
        json!({"is_halted": true, "halted_msg": "Geocoding error."})
    );
}

#[tokio::test]
async fn test_geocoder_no_results_fails_only_plausibility() {
    let page = serve_page(MANILA_PAGE).await;
    let geocoder = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
        .mount(&geocoder)
        .await;

    let report = validator_against(&geocoder).validate(&page.uri()).await;
    assert!(!report.is_halted());
    assert!(!report.is_successful());

    let json = to_json(&report);
    assert_eq!(
        json["metrics"]["plausibility"]["errors"],
        json!(["Geocoding error."])
    );
    assert_eq!(json["metrics"]["geo.position"]["is_valid"], true);
}

#[tokio::test]
async fn test_distance_boundary_is_inclusive() {
    // 0.2245 degrees of longitude at the equator is just under 25km
    let page = serve_page(
        r#"<html><head>
            <meta name="geo.position" content="0;0">
            <meta name="geo.region" content="PH-MNL">
            <meta name="geo.placename" content="Equator point">
            <meta name="DC.title" content="Equator">
        </head></html>"#,
    )
    .await;

    let geocoder = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(geocoder_feature([0.2245, 0.0]))
        .mount(&geocoder)
        .await;

    let report = validator_against(&geocoder).validate(&page.uri()).await;
    let json = to_json(&report);
    let plausibility = &json["metrics"]["plausibility"];
    assert_eq!(plausibility["is_valid"], true);
    assert_eq!(plausibility["data"]["distance"], "25km");
}

#[tokio::test]
async fn test_distance_just_over_threshold_fails() {
    let page = serve_page(
        r#"<html><head>
            <meta name="geo.position" content="0;0">
            <meta name="geo.region" content="PH-MNL">
            <meta name="geo.placename" content="Equator point">
            <meta name="DC.title" content="Equator">
        </head></html>"#,
    )
    .await;

    let geocoder = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(geocoder_feature([0.2260, 0.0]))
        .mount(&geocoder)
        .await;

    let report = validator_against(&geocoder).validate(&page.uri()).await;
    let json = to_json(&report);
    let plausibility = &json["metrics"]["plausibility"];
    assert_eq!(plausibility["is_valid"], false);
    assert_eq!(
        plausibility["errors"],
        json!(["The position seems too far away from the geocoding result."])
    );
}

#[tokio::test]
async fn test_cancellation_halts_in_flight_validation() {
    let page = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(MANILA_PAGE.to_string())
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&page)
        .await;

    let geocoder = MockServer::start().await;
    let validator = validator_against(&geocoder);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let report = validator.validate_with_cancel(&page.uri(), &cancel).await;
    assert_eq!(
        to_json(&report),
        json!({"is_halted": true, "halted_msg": "cancelled"})
    );
}
