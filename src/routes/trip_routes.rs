use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::trip_controller::TripController;
use crate::dto::trip_dto::{TripDto, TripRequest, TripStatusRequest};
use crate::middleware::auth::{AuthenticatedUser, ADMIN_ONLY, ANY_ROLE, OPERATIONS};
use crate::models::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

const STATUS_CHANGERS: &[UserRole] = &[UserRole::Admin, UserRole::Dispatcher, UserRole::Driver];

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route("/:id", get(get_trip).put(update_trip).delete(delete_trip))
        .route("/:id/status", patch(update_trip_status))
}

async fn list_trips(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<TripDto>>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripDto>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<TripRequest>,
) -> Result<(StatusCode, Json<TripDto>), AppError> {
    user.require_roles(OPERATIONS)?;
    let controller = TripController::new(state.pool.clone());
    let trip = controller.create(request, user.id, state.clock.now()).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn update_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<TripRequest>,
) -> Result<Json<TripDto>, AppError> {
    user.require_roles(OPERATIONS)?;
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.update(id, request, state.clock.now()).await?))
}

async fn update_trip_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<TripStatusRequest>,
) -> Result<Json<TripDto>, AppError> {
    user.require_roles(STATUS_CHANGERS)?;
    let controller = TripController::new(state.pool.clone());
    let trip = controller.update_status(id, request, state.clock.now()).await?;
    Ok(Json(trip))
}

async fn delete_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_roles(ADMIN_ONLY)?;
    let controller = TripController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
