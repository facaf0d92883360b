//! Company row types

use serde::{Deserialize, Serialize};

/// A company row.
///
/// `code` is the caller-supplied primary key and is immutable once created;
/// `name` is unique across companies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Projection returned by the company list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CompanySummary {
    pub code: String,
    pub name: String,
}
