//! Router assembly for the companies and invoices resources
//!
//! Resource routers are nested under their path prefixes; unmatched routes
//! fall through to a JSON 404 with the same envelope as every other error.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::AppState;
use crate::companies::handlers as companies;
use crate::core::error::ApiError;
use crate::invoices::handlers as invoices;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let company_routes = Router::new()
        .route(
            "/",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/{code}",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        );

    let invoice_routes = Router::new()
        .route(
            "/",
            get(invoices::list_invoices).post(invoices::create_invoice),
        )
        .route(
            "/{id}",
            get(invoices::get_invoice)
                .put(invoices::update_invoice)
                .delete(invoices::delete_invoice),
        );

    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .nest("/companies", company_routes)
        .nest("/invoices", invoice_routes)
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "biztime"
    }))
}

/// Fallback for unmatched routes
async fn not_found() -> ApiError {
    ApiError::NotFound("not found".to_string())
}
