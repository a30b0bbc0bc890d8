//! Router de la API
//!
//! `/api/auth/*` es público; el resto de `/api/*` exige un Bearer token.

pub mod auth_routes;
pub mod customer_routes;
pub mod driver_routes;
pub mod invoice_routes;
pub mod payment_routes;
pub mod report_routes;
pub mod trip_routes;
pub mod truck_routes;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{auth_middleware, cors_layer};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/customers", customer_routes::create_customer_router())
        .nest("/trucks", truck_routes::create_truck_router())
        .nest("/drivers", driver_routes::create_driver_router())
        .nest("/trips", trip_routes::create_trip_router())
        .nest("/invoices", invoice_routes::create_invoice_router())
        .nest("/payments", payment_routes::create_payment_router())
        .nest("/reports", report_routes::create_report_router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .nest("/auth", auth_routes::create_auth_router())
        .merge(protected);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
