//! Storage backends for the companies and invoices tables
//!
//! The [`Store`] trait is the seam between the HTTP handlers and the
//! database: handlers receive it as an injected `Arc<dyn Store>` rather
//! than reaching for a module-level singleton, so tests can substitute
//! [`InMemoryStore`] for [`PostgresStore`].
//!
//! Missing rows are signalled with `Ok(None)` / `Ok(false)`; translating
//! that into a 404 is the handlers' job. Constraint violations come back
//! as typed [`StoreError`] variants.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::companies::{Company, CompanySummary};
use crate::invoices::{Invoice, InvoiceSummary};

/// Errors surfaced by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint on company code or name was violated.
    /// The message is phrased by the operation that hit the constraint.
    #[error("{0}")]
    Duplicate(String),

    /// An invoice referenced a company code with no matching row
    #[error("no such company: {0}")]
    UnknownCompany(String),

    /// Backend failure outside the constraint taxonomy (lock poisoning, ...)
    #[error("storage error: {0}")]
    Backend(String),

    /// Any other database error
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD operations over the companies and invoices tables
#[async_trait]
pub trait Store: Send + Sync {
    /// List all companies, projected to `{code, name}`
    async fn list_companies(&self) -> StoreResult<Vec<CompanySummary>>;

    /// Fetch one company by code
    async fn get_company(&self, code: &str) -> StoreResult<Option<Company>>;

    /// Insert a new company; `Duplicate` when code or name collides
    async fn create_company(&self, company: Company) -> StoreResult<Company>;

    /// Update name and description for an existing code; the code itself is
    /// immutable. `Ok(None)` when no row matches, `Duplicate` when the new
    /// name collides with a different row.
    async fn update_company(
        &self,
        code: &str,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Option<Company>>;

    /// Delete a company; `Ok(false)` when no row matched
    async fn delete_company(&self, code: &str) -> StoreResult<bool>;

    /// List all invoices, projected to `{id, comp_code}`
    async fn list_invoices(&self) -> StoreResult<Vec<InvoiceSummary>>;

    /// Fetch one invoice by id
    async fn get_invoice(&self, id: i32) -> StoreResult<Option<Invoice>>;

    /// Insert a new invoice; `paid`, `add_date` and `paid_date` take their
    /// schema defaults. `UnknownCompany` when `comp_code` references no row.
    async fn create_invoice(&self, comp_code: &str, amt: Decimal) -> StoreResult<Invoice>;

    /// Update the amount of an existing invoice; `Ok(None)` when no row matches
    async fn update_invoice_amount(&self, id: i32, amt: Decimal) -> StoreResult<Option<Invoice>>;

    /// Delete an invoice; `Ok(false)` when no row matched
    async fn delete_invoice(&self, id: i32) -> StoreResult<bool>;
}
