use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::dto::report_dto::{
    CustomerReportDto, DashboardDto, DebtReportDto, DriverReportDto, RevenueDetailReportDto,
    RevenueReportDto, TripDetailReportDto, TripStatusReportDto, TruckReportDto,
};
use crate::dto::report_query::ReportRangeQuery;
use crate::middleware::auth::{AuthenticatedUser, ANY_ROLE, FINANCE};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/revenue", get(revenue))
        .route("/debt", get(debt))
        .route("/trip-status", get(trip_status))
        .route("/revenue-detail", get(revenue_detail))
        .route("/trip-detail", get(trip_detail))
        .route("/truck", get(truck))
        .route("/driver", get(driver))
        .route("/customer", get(customer))
}

async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<DashboardDto>, AppError> {
    user.require_roles(ANY_ROLE)?;
    Ok(Json(state.report_service().dashboard().await?))
}

async fn revenue(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ReportRangeQuery>,
) -> Result<Json<RevenueReportDto>, AppError> {
    user.require_roles(FINANCE)?;
    let service = state.report_service();
    let range = query.resolve(service.now())?;
    Ok(Json(service.revenue(range.from, range.to).await?))
}

async fn debt(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<DebtReportDto>>, AppError> {
    user.require_roles(FINANCE)?;
    Ok(Json(state.report_service().debt().await?))
}

async fn trip_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<TripStatusReportDto>>, AppError> {
    user.require_roles(ANY_ROLE)?;
    Ok(Json(state.report_service().trip_status().await?))
}

async fn revenue_detail(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ReportRangeQuery>,
) -> Result<Json<RevenueDetailReportDto>, AppError> {
    user.require_roles(FINANCE)?;
    let service = state.report_service();
    let range = query.resolve(service.now())?;
    let report = service
        .revenue_detail(range.from, range.to, query.period())
        .await?;
    Ok(Json(report))
}

async fn trip_detail(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ReportRangeQuery>,
) -> Result<Json<TripDetailReportDto>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let service = state.report_service();
    let range = query.resolve(service.now())?;
    Ok(Json(service.trip_detail(range.from, range.to).await?))
}

async fn truck(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<TruckReportDto>, AppError> {
    user.require_roles(ANY_ROLE)?;
    Ok(Json(state.report_service().truck().await?))
}

async fn driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<DriverReportDto>, AppError> {
    user.require_roles(ANY_ROLE)?;
    Ok(Json(state.report_service().driver().await?))
}

async fn customer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<CustomerReportDto>, AppError> {
    user.require_roles(FINANCE)?;
    Ok(Json(state.report_service().customer().await?))
}
