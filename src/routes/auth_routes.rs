use axum::{extract::State, routing::post, Json, Router};
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginRequest, RefreshTokenRequest};
use crate::services::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    request.validate()?;
    let service = AuthService::new(state.pool.clone(), state.jwt.clone());
    Ok(Json(service.login(&request, state.clock.now()).await?))
}

async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let service = AuthService::new(state.pool.clone(), state.jwt.clone());
    Ok(Json(service.refresh(&request, state.clock.now()).await?))
}
