use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::customer_controller::CustomerController;
use crate::dto::customer_dto::CustomerRequest;
use crate::middleware::auth::{AuthenticatedUser, ADMIN_ONLY, ANY_ROLE, OPERATIONS};
use crate::models::Customer;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_customer_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/:id", get(get_customer).put(update_customer).delete(delete_customer))
}

async fn list_customers(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Customer>>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let controller = CustomerController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_customer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let controller = CustomerController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_customer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    user.require_roles(OPERATIONS)?;
    let controller = CustomerController::new(state.pool.clone());
    let created = controller.create(request, state.clock.now()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_customer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CustomerRequest>,
) -> Result<Json<Customer>, AppError> {
    user.require_roles(OPERATIONS)?;
    let controller = CustomerController::new(state.pool.clone());
    Ok(Json(controller.update(id, request, state.clock.now()).await?))
}

async fn delete_customer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_roles(ADMIN_ONLY)?;
    let controller = CustomerController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
