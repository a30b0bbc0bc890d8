use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::truck_controller::TruckController;
use crate::dto::truck_dto::TruckRequest;
use crate::middleware::auth::{AuthenticatedUser, ADMIN_ONLY, ANY_ROLE, OPERATIONS};
use crate::models::Truck;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_truck_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trucks).post(create_truck))
        .route("/:id", get(get_truck).put(update_truck).delete(delete_truck))
}

async fn list_trucks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Truck>>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let controller = TruckController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_truck(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Truck>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let controller = TruckController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_truck(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<TruckRequest>,
) -> Result<(StatusCode, Json<Truck>), AppError> {
    user.require_roles(OPERATIONS)?;
    let controller = TruckController::new(state.pool.clone());
    let created = controller.create(request, state.clock.now()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_truck(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<TruckRequest>,
) -> Result<Json<Truck>, AppError> {
    user.require_roles(OPERATIONS)?;
    let controller = TruckController::new(state.pool.clone());
    Ok(Json(controller.update(id, request, state.clock.now()).await?))
}

async fn delete_truck(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_roles(ADMIN_ONLY)?;
    let controller = TruckController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
