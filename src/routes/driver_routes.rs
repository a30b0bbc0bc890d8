use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::dto::driver_dto::DriverRequest;
use crate::middleware::auth::{AuthenticatedUser, ADMIN_ONLY, ANY_ROLE, OPERATIONS};
use crate::models::Driver;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route("/:id", get(get_driver).put(update_driver).delete(delete_driver))
}

async fn list_drivers(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Driver>>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Driver>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<DriverRequest>,
) -> Result<(StatusCode, Json<Driver>), AppError> {
    user.require_roles(OPERATIONS)?;
    let controller = DriverController::new(state.pool.clone());
    let created = controller.create(request, state.clock.now()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<DriverRequest>,
) -> Result<Json<Driver>, AppError> {
    user.require_roles(OPERATIONS)?;
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.update(id, request, state.clock.now()).await?))
}

async fn delete_driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_roles(ADMIN_ONLY)?;
    let controller = DriverController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
