use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::invoice_controller::InvoiceController;
use crate::dto::invoice_dto::{InvoiceDto, InvoiceRequest};
use crate::middleware::auth::{AuthenticatedUser, ADMIN_ONLY, ANY_ROLE, FINANCE};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_invoice_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route("/customer/:customer_id", get(list_customer_invoices))
        .route("/:id", get(get_invoice).put(update_invoice).delete(delete_invoice))
}

async fn list_invoices(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<InvoiceDto>>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let controller = InvoiceController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn list_customer_invoices(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<Vec<InvoiceDto>>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let controller = InvoiceController::new(state.pool.clone());
    Ok(Json(controller.list_by_customer(customer_id).await?))
}

async fn get_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceDto>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let controller = InvoiceController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<InvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceDto>), AppError> {
    user.require_roles(FINANCE)?;
    let controller = InvoiceController::new(state.pool.clone());
    let invoice = controller.create(request, state.clock.now()).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

async fn update_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<InvoiceRequest>,
) -> Result<Json<InvoiceDto>, AppError> {
    user.require_roles(FINANCE)?;
    let controller = InvoiceController::new(state.pool.clone());
    Ok(Json(controller.update(id, request, state.clock.now()).await?))
}

async fn delete_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_roles(ADMIN_ONLY)?;
    let controller = InvoiceController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
