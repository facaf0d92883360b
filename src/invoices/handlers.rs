//! HTTP handlers for the invoices resource
//!
//! Invoice ids arrive as path strings and are parsed explicitly so that an
//! unparseable id produces the same JSON error envelope as every other
//! failure.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::DeletedResponse;
use crate::core::error::{ApiError, ApiResult};
use crate::invoices::{Invoice, InvoiceDetail, InvoiceSummary};
use crate::server::AppState;

/// Response envelope for the invoice list
#[derive(Debug, Serialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<InvoiceSummary>,
}

/// Response envelope for a full invoice row
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub invoice: Invoice,
}

/// Response envelope for the detail view with the nested company
#[derive(Debug, Serialize)]
pub struct InvoiceDetailResponse {
    pub invoice: InvoiceDetail,
}

/// Request body for creating an invoice; every other column takes its
/// schema default
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub comp_code: String,
    pub amt: Decimal,
}

/// Request body for updating an invoice; only the amount is mutable
#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub amt: Decimal,
}

fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid invoice id: {raw}")))
}

/// GET /invoices
///
/// Returns `{invoices: [{id, comp_code}, ...]}` in storage order.
pub async fn list_invoices(State(state): State<AppState>) -> ApiResult<Json<InvoiceListResponse>> {
    let invoices = state.store.list_invoices().await?;

    Ok(Json(InvoiceListResponse { invoices }))
}

/// GET /invoices/{id}
///
/// Returns `{invoice: {id, amt, paid, add_date, paid_date, company}}` with
/// the referenced company nested in place of the raw `comp_code`; 404 when
/// no invoice matches the id.
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<InvoiceDetailResponse>> {
    let id = parse_id(&id)?;

    let invoice = state
        .store
        .get_invoice(id)
        .await?
        .ok_or_else(|| ApiError::not_found("invoice", id))?;

    // The foreign key guarantees the company row exists; a miss here means
    // the database and the application disagree about the schema.
    let company = state.store.get_company(&invoice.comp_code).await?.ok_or_else(|| {
        ApiError::Internal(format!(
            "invoice {} references missing company {}",
            id, invoice.comp_code
        ))
    })?;

    Ok(Json(InvoiceDetailResponse {
        invoice: InvoiceDetail::from_parts(invoice, company),
    }))
}

/// POST /invoices
///
/// Inserts a new invoice for an existing company; 400 when `comp_code`
/// references no row. Returns 201 with the full inserted row.
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(body): Json<CreateInvoiceRequest>,
) -> ApiResult<(StatusCode, Json<InvoiceResponse>)> {
    let invoice = state.store.create_invoice(&body.comp_code, body.amt).await?;

    Ok((StatusCode::CREATED, Json(InvoiceResponse { invoice })))
}

/// PUT /invoices/{id}
///
/// Updates the amount of an existing invoice; 404 when no row matches.
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateInvoiceRequest>,
) -> ApiResult<Json<InvoiceResponse>> {
    let id = parse_id(&id)?;

    let invoice = state
        .store
        .update_invoice_amount(id, body.amt)
        .await?
        .ok_or_else(|| ApiError::not_found("invoice", id))?;

    Ok(Json(InvoiceResponse { invoice }))
}

/// DELETE /invoices/{id}
///
/// Removes the invoice and returns `{status: "deleted"}`; 404 when no row
/// matched (a second delete of the same id is a 404, not a 200).
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    let id = parse_id(&id)?;

    if !state.store.delete_invoice(id).await? {
        return Err(ApiError::not_found("invoice", id));
    }

    Ok(Json(DeletedResponse::deleted()))
}
