mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use transport_management::models::UserRole;
use transport_management::reports::ReportSnapshot;
use uuid::Uuid;

use common::{sample_snapshot, test_app, token_for};

async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get_as(role: UserRole, uri: &str) -> (StatusCode, Value) {
    let token = token_for(role);
    send(test_app(sample_snapshot()), Method::GET, uri, Some(&token), None).await
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(test_app(ReportSnapshot::default()), Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let (status, body) = send(test_app(ReportSnapshot::default()), Method::GET, "/api/customers", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = send(
        test_app(ReportSnapshot::default()),
        Method::GET,
        "/api/reports/dashboard",
        Some("not-a-jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_validates_body_before_lookup() {
    let (status, body) = send(
        test_app(ReportSnapshot::default()),
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "not-an-email", "password": "secret" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_role_gates() {
    let (status, body) = get_as(UserRole::Dispatcher, "/api/reports/revenue").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, _) = get_as(UserRole::Driver, "/api/reports/customer").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let token = token_for(UserRole::Accountant);
    let uri = format!("/api/customers/{}", Uuid::new_v4());
    let (status, _) = send(test_app(ReportSnapshot::default()), Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_dashboard_for_any_role() {
    let (status, body) = get_as(UserRole::Driver, "/api/reports/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["totalCustomers"], 2);
    assert_eq!(body["summary"]["totalTrucks"], 2);
    assert_eq!(body["summary"]["pendingInvoices"], 2);
    assert_eq!(body["summary"]["totalOutstandingDebt"].as_f64(), Some(1100.0));
    assert!(body["recentTrips"].is_array());
}

#[tokio::test]
async fn test_debt_report_sorted_by_remaining_debt() {
    let (status, body) = get_as(UserRole::Accountant, "/api/reports/debt").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["customerName"], "Customer A");
    assert_eq!(rows[0]["remainingDebt"].as_f64(), Some(600.0));
    assert_eq!(rows[0]["daysOverdue"], 15);
    assert_eq!(rows[1]["customerName"], "Customer B");
    assert_eq!(rows[1]["daysOverdue"], 0);
}

#[tokio::test]
async fn test_revenue_report_with_date_range() {
    let (status, body) = get_as(
        UserRole::Admin,
        "/api/reports/revenue?fromDate=2024-06-01&toDate=2024-06-30",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalRevenue"].as_f64(), Some(500.0));
    assert_eq!(body["totalPaid"].as_f64(), Some(0.0));
    assert_eq!(body["totalTrips"], 2);
    assert_eq!(body["completedTrips"], 1);
}

#[tokio::test]
async fn test_invalid_report_date_is_bad_request() {
    let (status, body) = get_as(UserRole::Admin, "/api/reports/revenue?fromDate=yesterday").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_inverted_range_returns_empty_periods() {
    let (status, body) = get_as(
        UserRole::Admin,
        "/api/reports/revenue-detail?fromDate=2024-05-01&toDate=2024-04-01&periodType=week",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["revenueByPeriod"].as_array().unwrap().is_empty());
    assert_eq!(body["summary"]["totalInvoices"], 0);
}

#[tokio::test]
async fn test_trip_status_report() {
    let (status, body) = get_as(UserRole::Dispatcher, "/api/reports/trip-status").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["status"], "Scheduled");
    assert_eq!(rows[0]["count"], 1);
    assert_eq!(rows[1]["status"], "Completed");
    assert_eq!(rows[1]["totalDistance"].as_f64(), Some(120.0));
}

#[tokio::test]
async fn test_revenue_detail_quarter_periods() {
    let (status, body) = get_as(
        UserRole::Accountant,
        "/api/reports/revenue-detail?fromDate=2024-01-01&toDate=2024-06-30&periodType=quarter",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let periods = body["revenueByPeriod"].as_array().unwrap();
    assert_eq!(periods.len(), 2);
    assert_eq!(periods[0]["period"], "2024-Q1");
    assert_eq!(periods[1]["period"], "2024-Q2");
    assert_eq!(periods[1]["revenue"].as_f64(), Some(1500.0));
    assert_eq!(body["summary"]["totalInvoices"], 2);
}
