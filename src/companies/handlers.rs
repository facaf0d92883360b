//! HTTP handlers for the companies resource
//!
//! One handler per (verb, path) pair; each issues a single store call and
//! wraps the result in its response envelope. Failures propagate as
//! [`ApiError`] and are translated at the boundary.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::companies::{Company, CompanySummary};
use crate::core::DeletedResponse;
use crate::core::error::{ApiError, ApiResult};
use crate::server::AppState;

/// Response envelope for the company list
#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<CompanySummary>,
}

/// Response envelope for a single company
#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub company: Company,
}

/// Request body for updating a company; the code is immutable
#[derive(Debug, Deserialize)]
pub struct UpdateCompanyRequest {
    pub name: String,
    pub description: Option<String>,
}

/// GET /companies
///
/// Returns `{companies: [{code, name}, ...]}` in storage order.
pub async fn list_companies(
    State(state): State<AppState>,
) -> ApiResult<Json<CompanyListResponse>> {
    let companies = state.store.list_companies().await?;

    Ok(Json(CompanyListResponse { companies }))
}

/// GET /companies/{code}
///
/// Returns `{company: {code, name, description}}`, or 404 when no row
/// matches the code. Exactly one lookup per request.
pub async fn get_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<CompanyResponse>> {
    let company = state
        .store
        .get_company(&code)
        .await?
        .ok_or_else(|| ApiError::not_found("company", &code))?;

    Ok(Json(CompanyResponse { company }))
}

/// POST /companies
///
/// Inserts a new company; 400 when the code or name collides with an
/// existing row. Returns 201 with the inserted row.
pub async fn create_company(
    State(state): State<AppState>,
    Json(body): Json<Company>,
) -> ApiResult<(StatusCode, Json<CompanyResponse>)> {
    let company = state.store.create_company(body).await?;

    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// PUT /companies/{code}
///
/// Updates name and description for an existing code; 404 when no row
/// matches, 400 when the new name collides with a different row.
pub async fn update_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(body): Json<UpdateCompanyRequest>,
) -> ApiResult<Json<CompanyResponse>> {
    let company = state
        .store
        .update_company(&code, &body.name, body.description.as_deref())
        .await?
        .ok_or_else(|| ApiError::not_found("company", &code))?;

    Ok(Json(CompanyResponse { company }))
}

/// DELETE /companies/{code}
///
/// Removes the row and returns `{status: "deleted"}`; 404 when no row
/// matched. Invoices referencing the company are not cascaded.
pub async fn delete_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    if !state.store.delete_company(&code).await? {
        return Err(ApiError::not_found("company", &code));
    }

    Ok(Json(DeletedResponse::deleted()))
}
