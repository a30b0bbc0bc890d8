use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::payment_controller::PaymentController;
use crate::dto::payment_dto::{PaymentDto, PaymentRequest};
use crate::middleware::auth::{AuthenticatedUser, ADMIN_ONLY, ANY_ROLE, FINANCE};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_payment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/invoice/:invoice_id", get(list_invoice_payments))
        .route("/:id", get(get_payment).delete(delete_payment))
}

async fn list_payments(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<PaymentDto>>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn list_invoice_payments(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(invoice_id): Path<Uuid>,
) -> Result<Json<Vec<PaymentDto>>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.list_by_invoice(invoice_id).await?))
}

async fn get_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentDto>, AppError> {
    user.require_roles(ANY_ROLE)?;
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<PaymentRequest>,
) -> Result<(StatusCode, Json<PaymentDto>), AppError> {
    user.require_roles(FINANCE)?;
    let controller = PaymentController::new(state.pool.clone());
    let payment = controller.create(request, state.clock.now()).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

async fn delete_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_roles(ADMIN_ONLY)?;
    let controller = PaymentController::new(state.pool.clone());
    controller.delete(id, state.clock.now()).await?;
    Ok(StatusCode::NO_CONTENT)
}
