mod common;

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use transport_management::dto::report_dto::Trend;
use transport_management::reports::{
    FixedClock, InMemoryReportSource, PeriodType, ReportDataSource, ReportSnapshot,
};
use transport_management::services::ReportService;
use transport_management::utils::errors::AppError;

use common::{at, now, sample_snapshot};

fn service(snapshot: ReportSnapshot) -> ReportService {
    ReportService::new(
        Arc::new(InMemoryReportSource::new(snapshot)),
        Arc::new(FixedClock(now())),
    )
}

struct BrokenSource;

#[async_trait]
impl ReportDataSource for BrokenSource {
    async fn load_snapshot(&self) -> Result<ReportSnapshot, AppError> {
        Err(AppError::Internal("snapshot unavailable".to_string()))
    }
}

#[tokio::test]
async fn test_empty_snapshot_produces_zeroed_reports() {
    let service = service(ReportSnapshot::default());

    let dashboard = service.dashboard().await.unwrap();
    assert_eq!(dashboard.summary.total_customers, 0);
    assert_eq!(dashboard.revenue.revenue_growth, Decimal::ZERO);
    assert!(dashboard.truck_status.is_empty());

    assert!(service.debt().await.unwrap().is_empty());
    assert!(service.trip_status().await.unwrap().is_empty());

    let trucks = service.truck().await.unwrap();
    assert_eq!(trucks.summary.total_trucks, 0);

    let customers = service.customer().await.unwrap();
    assert!(customers.customer_details.is_empty());
}

#[tokio::test]
async fn test_clock_drives_now() {
    let service = service(sample_snapshot());
    assert_eq!(service.now(), now());

    let debt = service.debt().await.unwrap();
    assert_eq!(debt[0].days_overdue, 15);
}

#[tokio::test]
async fn test_revenue_detail_trend_against_previous_month() {
    let service = service(sample_snapshot());

    let report = service
        .revenue_detail(at(2024, 6, 1), at(2024, 6, 30), PeriodType::Month)
        .await
        .unwrap();

    assert_eq!(report.summary.total_revenue, Decimal::from(500));
    assert_eq!(report.trend.current_period_revenue, Decimal::from(500));
    assert_eq!(report.trend.previous_period_revenue, Decimal::from(1_000));
    assert_eq!(report.trend.growth_rate, Decimal::from(-50));
    assert_eq!(report.trend.trend, Trend::Down);
}

#[tokio::test]
async fn test_trip_detail_and_driver_reports() {
    let service = service(sample_snapshot());

    let detail = service.trip_detail(at(2024, 6, 1), now()).await.unwrap();
    assert_eq!(detail.summary.total_trips, 2);
    assert_eq!(detail.summary.completed_trips, 1);

    assert_eq!(detail.trips_by_driver.len(), 1);
    assert_eq!(detail.trips_by_driver[0].average_rating, Decimal::ZERO);

    let drivers = service.driver().await.unwrap();
    assert_eq!(drivers.driver_performance.len(), 1);
    assert_eq!(drivers.driver_performance[0].total_trips, 2);
    assert_eq!(drivers.driver_performance[0].completion_rate, Decimal::from(50));
}

#[tokio::test]
async fn test_source_errors_propagate() {
    let service = ReportService::new(Arc::new(BrokenSource), Arc::new(FixedClock(now())));

    assert!(matches!(service.dashboard().await, Err(AppError::Internal(_))));
    assert!(matches!(service.revenue(at(2024, 1, 1), now()).await, Err(AppError::Internal(_))));
}
