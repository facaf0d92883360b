//! PostgreSQL storage backend using sqlx.
//!
//! One parameterized statement per operation. Mutations use `RETURNING`
//! with `fetch_optional`, so the existence check and the mutation are a
//! single round trip; there is no separate lookup to race against.
//!
//! # Constraint classification
//!
//! Constraint violations are classified by SQLSTATE rather than message
//! text: `23505` (unique_violation) becomes [`StoreError::Duplicate`] and
//! `23503` (foreign_key_violation) becomes [`StoreError::UnknownCompany`].
//!
//! # Schema
//!
//! The `companies` and `invoices` tables are assumed to exist; this module
//! never creates or migrates them. The expected DDL is documented in the
//! repository README.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{Store, StoreError, StoreResult};
use crate::companies::{Company, CompanySummary};
use crate::invoices::{Invoice, InvoiceSummary};

/// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Store implementation backed by a PostgreSQL connection pool
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new `PostgresStore` with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Extract the SQLSTATE code from a sqlx error, if it carries one
fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|code| code.into_owned()),
        _ => None,
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn list_companies(&self) -> StoreResult<Vec<CompanySummary>> {
        let companies = sqlx::query_as::<_, CompanySummary>("SELECT code, name FROM companies")
            .fetch_all(&self.pool)
            .await?;

        Ok(companies)
    }

    async fn get_company(&self, code: &str) -> StoreResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            "SELECT code, name, description
               FROM companies
              WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    async fn create_company(&self, company: Company) -> StoreResult<Company> {
        let result = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (code, name, description)
             VALUES ($1, $2, $3)
             RETURNING code, name, description",
        )
        .bind(&company.code)
        .bind(&company.name)
        .bind(&company.description)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(err) if sqlstate(&err).as_deref() == Some(UNIQUE_VIOLATION) => Err(
                StoreError::Duplicate("company code and name must be unique".to_string()),
            ),
            Err(err) => Err(err.into()),
        }
    }

    async fn update_company(
        &self,
        code: &str,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Option<Company>> {
        let result = sqlx::query_as::<_, Company>(
            "UPDATE companies
                SET name = $1,
                    description = $2
              WHERE code = $3
             RETURNING code, name, description",
        )
        .bind(name)
        .bind(description)
        .bind(code)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(updated) => Ok(updated),
            Err(err) if sqlstate(&err).as_deref() == Some(UNIQUE_VIOLATION) => Err(
                StoreError::Duplicate("company name already exists".to_string()),
            ),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_company(&self, code: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM companies WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_invoices(&self) -> StoreResult<Vec<InvoiceSummary>> {
        let invoices =
            sqlx::query_as::<_, InvoiceSummary>("SELECT id, comp_code FROM invoices")
                .fetch_all(&self.pool)
                .await?;

        Ok(invoices)
    }

    async fn get_invoice(&self, id: i32) -> StoreResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "SELECT id, comp_code, amt, paid, add_date, paid_date
               FROM invoices
              WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    async fn create_invoice(&self, comp_code: &str, amt: Decimal) -> StoreResult<Invoice> {
        let result = sqlx::query_as::<_, Invoice>(
            "INSERT INTO invoices (comp_code, amt)
             VALUES ($1, $2)
             RETURNING id, comp_code, amt, paid, add_date, paid_date",
        )
        .bind(comp_code)
        .bind(amt)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(err) if sqlstate(&err).as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
                Err(StoreError::UnknownCompany(comp_code.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update_invoice_amount(&self, id: i32, amt: Decimal) -> StoreResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "UPDATE invoices
                SET amt = $1
              WHERE id = $2
             RETURNING id, comp_code, amt, paid, add_date, paid_date",
        )
        .bind(amt)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    async fn delete_invoice(&self, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
