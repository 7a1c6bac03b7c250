//! Contract tests for the dashboard API
//!
//! Validates the JSON shape of GET /dashboard, /dashboard/kpis,
//! /dashboard/sales and the health probes: field presence, types, and
//! error bodies.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{test, web, App};
use helpers::*;
use rust_decimal::Decimal;
use salespulse::modules;
use serde_json::Value;
use std::str::FromStr;

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal fields serialize as strings")).unwrap()
}

macro_rules! init_app {
    ($records:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(dashboard_service($records)))
                .configure(modules::configure),
        )
        .await
    };
}

/// Test: GET /dashboard returns title, snapshot, cards, chart and window
#[actix_web::test]
async fn test_dashboard_response_structure() {
    let app = init_app!(SalesDataFactory::quarter());

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["title"], "Sales");
    assert!(body["snapshot"].is_object());
    assert!(body["cards"].is_array());
    assert!(body["chart"].is_object());
    assert!(body["window"].is_object());

    let cards = body["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 5);
    for card in cards {
        assert!(card["title"].is_string());
        assert!(card["icon"].as_str().unwrap().starts_with("fa-"));
        assert!(card["primary"]["value"].is_string());
        assert!(card["primary"]["label"].is_string());
        assert!(card["secondary"]["value"].is_string());
        assert!(card["secondary"]["label"].is_string());
    }

    // Growth cards carry a trend, the others omit it
    assert_eq!(cards[0]["trend"], "up");
    assert!(cards[1].get("trend").is_none());
    assert_eq!(cards[3]["trend"], "down");
    assert!(cards[4].get("trend").is_none());
}

/// Test: cards render the current period in the default currency
#[actix_web::test]
async fn test_dashboard_card_values() {
    let app = init_app!(SalesDataFactory::quarter());

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let cards = &body["cards"];

    assert_eq!(cards[0]["title"], "Revenue");
    assert_eq!(cards[0]["primary"]["value"], "R$ 110.000");
    assert_eq!(cards[0]["secondary"]["value"], "📈 +10.0%");
    assert_eq!(cards[0]["secondary"]["label"], "MoM Growth");
    assert_eq!(cards[1]["secondary"]["value"], "R$ 200");
    assert_eq!(cards[2]["primary"]["value"], "660");
    assert_eq!(cards[4]["secondary"]["value"], "2.50%");
}

/// Test: chart points carry period, value and compact label
#[actix_web::test]
async fn test_chart_structure() {
    let app = init_app!(SalesDataFactory::quarter());

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let chart = &body["chart"];

    assert!(chart["title"].is_string());
    let points = chart["points"].as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0]["period"], "2025-01");
    assert_eq!(points[0]["label"], "90K");
    assert_eq!(decimal(&points[2]["value"]), Decimal::from(110_000));
    assert_eq!(decimal(&chart["y_axis_max"]), Decimal::from(121_000));

    assert_eq!(body["window"]["start"], "2025-01");
    assert_eq!(body["window"]["end"], "2025-03");
}

/// Test: GET /dashboard/kpis snapshot fields and types
#[actix_web::test]
async fn test_kpi_snapshot_structure() {
    let app = init_app!(SalesDataFactory::quarter());

    let req = test::TestRequest::get().uri("/dashboard/kpis").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["period"], "2025-03");
    assert_eq!(body["prior_period"], "2025-02");
    assert_eq!(body["prior_period_present"], true);

    for field in [
        "approved_amount",
        "transaction_count",
        "units_sold",
        "new_customers",
        "refund_amount",
    ] {
        assert!(body["current"].get(field).is_some(), "missing current.{}", field);
        assert!(body["prior"].get(field).is_some(), "missing prior.{}", field);
    }
    assert!(body["current"]["transaction_count"].is_i64());

    assert_eq!(decimal(&body["revenue_growth"]), Decimal::from(10));
    assert_eq!(decimal(&body["units_growth"]), Decimal::from(10));
    assert_eq!(decimal(&body["new_customer_growth"]), Decimal::from(-10));
    assert_eq!(decimal(&body["average_ticket"]), Decimal::from(200));
    assert_eq!(decimal(&body["refund_rate"]), Decimal::from_str("2.5").unwrap());
}

/// Test: explicit period selects that period
#[actix_web::test]
async fn test_kpis_for_requested_period() {
    let app = init_app!(SalesDataFactory::quarter());

    let req = test::TestRequest::get()
        .uri("/dashboard/kpis?period=2025-01")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["period"], "2025-01");
    assert_eq!(body["prior_period"], "2024-12");
    assert_eq!(body["prior_period_present"], false);
    assert_eq!(decimal(&body["prior"]["approved_amount"]), Decimal::ONE);
}

/// Test: unparseable period returns a 400 error body
#[actix_web::test]
async fn test_kpis_rejects_bad_period() {
    let app = init_app!(SalesDataFactory::quarter());

    let req = test::TestRequest::get()
        .uri("/dashboard/kpis?period=last-month")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Invalid period key"));
}

/// Test: GET /dashboard/sales returns window and records
#[actix_web::test]
async fn test_sales_slice_structure() {
    let app = init_app!(SalesDataFactory::quarter());

    let req = test::TestRequest::get()
        .uri("/dashboard/sales?start_date=2025-02-01&end_date=2025-03-31")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["window"]["start"], "2025-02");
    assert_eq!(body["window"]["end"], "2025-03");

    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["period"], "2025-02");
    assert_eq!(records[0]["transaction_count"], 500);
    assert_eq!(decimal(&records[0]["approved_amount"]), Decimal::from(100_000));
}

/// Test: empty data still yields a full dashboard with zero figures
#[actix_web::test]
async fn test_dashboard_without_data() {
    let app = init_app!(Vec::new());

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert!(body["window"].is_null());
    assert!(body["chart"]["points"].as_array().unwrap().is_empty());
    assert_eq!(body["cards"].as_array().unwrap().len(), 5);
    assert_eq!(body["snapshot"]["current"]["transaction_count"], 1);
    assert_eq!(body["cards"][0]["secondary"]["label"], "MoM Growth (no prior data)");
}

/// Test: figures too large to aggregate surface as a 502 data error
#[actix_web::test]
async fn test_dashboard_rejects_out_of_range_amounts() {
    let mut huge = SalesDataFactory::month(3, 0, 550, 660, 45, 0);
    huge.approved_amount = Decimal::from_i128_with_scale(75 * 10_i128.pow(27), 0);
    let app = init_app!(vec![SalesDataFactory::month(2, 100_000, 500, 600, 50, 2_000), huge]);

    for uri in ["/dashboard", "/dashboard/kpis", "/dashboard/sales"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 502, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], 502);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("exceed the supported range"));
    }
}

/// Test: liveness and readiness probes
#[actix_web::test]
async fn test_health_endpoints() {
    let app = init_app!(SalesDataFactory::quarter());

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "salespulse");
    assert!(body["timestamp"].is_string());

    let req = test::TestRequest::get().uri("/ready").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["checks"]["data_source"], "in_memory");
    assert_eq!(body["checks"]["data_source_reachable"], true);
}
