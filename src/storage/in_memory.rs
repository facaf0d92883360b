//! In-memory implementation of [`Store`] for testing and development
//!
//! Uses `RwLock` for thread-safe access. The constraint behavior of the
//! PostgreSQL schema is emulated here (code/name uniqueness for companies,
//! the company foreign key for invoices) so integration tests exercise
//! the same error paths as the real backend.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use super::{Store, StoreError, StoreResult};
use crate::companies::{Company, CompanySummary};
use crate::invoices::{Invoice, InvoiceSummary};

#[derive(Debug, Default)]
struct Tables {
    companies: BTreeMap<String, Company>,
    invoices: BTreeMap<i32, Invoice>,
    next_invoice_id: i32,
}

/// In-memory store backed by `BTreeMap` tables
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn list_companies(&self) -> StoreResult<Vec<CompanySummary>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| StoreError::Backend(format!("failed to acquire read lock: {}", e)))?;

        Ok(tables
            .companies
            .values()
            .map(|company| CompanySummary {
                code: company.code.clone(),
                name: company.name.clone(),
            })
            .collect())
    }

    async fn get_company(&self, code: &str) -> StoreResult<Option<Company>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| StoreError::Backend(format!("failed to acquire read lock: {}", e)))?;

        Ok(tables.companies.get(code).cloned())
    }

    async fn create_company(&self, company: Company) -> StoreResult<Company> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| StoreError::Backend(format!("failed to acquire write lock: {}", e)))?;

        let collides = tables.companies.contains_key(&company.code)
            || tables.companies.values().any(|c| c.name == company.name);
        if collides {
            return Err(StoreError::Duplicate(
                "company code and name must be unique".to_string(),
            ));
        }

        tables
            .companies
            .insert(company.code.clone(), company.clone());

        Ok(company)
    }

    async fn update_company(
        &self,
        code: &str,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Option<Company>> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| StoreError::Backend(format!("failed to acquire write lock: {}", e)))?;

        if !tables.companies.contains_key(code) {
            return Ok(None);
        }

        let name_taken = tables
            .companies
            .values()
            .any(|c| c.code != code && c.name == name);
        if name_taken {
            return Err(StoreError::Duplicate(
                "company name already exists".to_string(),
            ));
        }

        let Some(company) = tables.companies.get_mut(code) else {
            return Ok(None);
        };
        company.name = name.to_string();
        company.description = description.map(String::from);

        Ok(Some(company.clone()))
    }

    async fn delete_company(&self, code: &str) -> StoreResult<bool> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| StoreError::Backend(format!("failed to acquire write lock: {}", e)))?;

        // No cascade: invoices referencing the code are left in place,
        // matching the application-level behavior of the real backend.
        Ok(tables.companies.remove(code).is_some())
    }

    async fn list_invoices(&self) -> StoreResult<Vec<InvoiceSummary>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| StoreError::Backend(format!("failed to acquire read lock: {}", e)))?;

        Ok(tables
            .invoices
            .values()
            .map(|invoice| InvoiceSummary {
                id: invoice.id,
                comp_code: invoice.comp_code.clone(),
            })
            .collect())
    }

    async fn get_invoice(&self, id: i32) -> StoreResult<Option<Invoice>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| StoreError::Backend(format!("failed to acquire read lock: {}", e)))?;

        Ok(tables.invoices.get(&id).cloned())
    }

    async fn create_invoice(&self, comp_code: &str, amt: Decimal) -> StoreResult<Invoice> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| StoreError::Backend(format!("failed to acquire write lock: {}", e)))?;

        if !tables.companies.contains_key(comp_code) {
            return Err(StoreError::UnknownCompany(comp_code.to_string()));
        }

        tables.next_invoice_id += 1;
        let invoice = Invoice {
            id: tables.next_invoice_id,
            comp_code: comp_code.to_string(),
            amt,
            // Schema defaults on the real backend
            paid: false,
            add_date: Utc::now().date_naive(),
            paid_date: None,
        };

        tables.invoices.insert(invoice.id, invoice.clone());

        Ok(invoice)
    }

    async fn update_invoice_amount(&self, id: i32, amt: Decimal) -> StoreResult<Option<Invoice>> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| StoreError::Backend(format!("failed to acquire write lock: {}", e)))?;

        let Some(invoice) = tables.invoices.get_mut(&id) else {
            return Ok(None);
        };

        invoice.amt = amt;

        Ok(Some(invoice.clone()))
    }

    async fn delete_invoice(&self, id: i32) -> StoreResult<bool> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| StoreError::Backend(format!("failed to acquire write lock: {}", e)))?;

        Ok(tables.invoices.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> Company {
        Company {
            code: "apple".to_string(),
            name: "Apple Computer".to_string(),
            description: Some("Maker of OSX.".to_string()),
        }
    }

    #[tokio::test]
    async fn create_and_get_company() {
        let store = InMemoryStore::new();

        let created = store.create_company(apple()).await.unwrap();
        assert_eq!(created, apple());

        let fetched = store.get_company("apple").await.unwrap();
        assert_eq!(fetched, Some(apple()));
    }

    #[tokio::test]
    async fn duplicate_code_is_rejected() {
        let store = InMemoryStore::new();
        store.create_company(apple()).await.unwrap();

        let mut other = apple();
        other.name = "Apple II".to_string();

        let err = store.create_company(other).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let store = InMemoryStore::new();
        store.create_company(apple()).await.unwrap();

        let mut other = apple();
        other.code = "apple2".to_string();

        let err = store.create_company(other).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn update_rejects_name_collision_with_other_row() {
        let store = InMemoryStore::new();
        store.create_company(apple()).await.unwrap();
        store
            .create_company(Company {
                code: "ibm".to_string(),
                name: "IBM".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let err = store
            .update_company("ibm", "Apple Computer", None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        // Keeping its own name is not a collision
        let updated = store
            .update_company("ibm", "IBM", Some("Big blue."))
            .await
            .unwrap();
        assert_eq!(updated.unwrap().description, Some("Big blue.".to_string()));
    }

    #[tokio::test]
    async fn update_missing_company_returns_none() {
        let store = InMemoryStore::new();
        let updated = store.update_company("ghost", "Ghost", None).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn delete_company_reports_whether_row_existed() {
        let store = InMemoryStore::new();
        store.create_company(apple()).await.unwrap();

        assert!(store.delete_company("apple").await.unwrap());
        assert!(!store.delete_company("apple").await.unwrap());
    }

    #[tokio::test]
    async fn invoice_ids_are_assigned_sequentially() {
        let store = InMemoryStore::new();
        store.create_company(apple()).await.unwrap();

        let first = store
            .create_invoice("apple", Decimal::from(100))
            .await
            .unwrap();
        let second = store
            .create_invoice("apple", Decimal::from(200))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.paid);
        assert!(first.paid_date.is_none());
    }

    #[tokio::test]
    async fn invoice_requires_existing_company() {
        let store = InMemoryStore::new();

        let err = store
            .create_invoice("ghost", Decimal::from(50))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownCompany(code) if code == "ghost"));

        assert!(store.list_invoices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_invoice_amount_only_touches_amt() {
        let store = InMemoryStore::new();
        store.create_company(apple()).await.unwrap();
        let created = store
            .create_invoice("apple", Decimal::from(100))
            .await
            .unwrap();

        let updated = store
            .update_invoice_amount(created.id, Decimal::from(250))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.amt, Decimal::from(250));
        assert_eq!(updated.comp_code, created.comp_code);
        assert_eq!(updated.add_date, created.add_date);

        assert!(
            store
                .update_invoice_amount(999, Decimal::from(1))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn delete_invoice_reports_whether_row_existed() {
        let store = InMemoryStore::new();
        store.create_company(apple()).await.unwrap();
        let created = store
            .create_invoice("apple", Decimal::from(100))
            .await
            .unwrap();

        assert!(store.delete_invoice(created.id).await.unwrap());
        assert!(!store.delete_invoice(created.id).await.unwrap());
    }
}
