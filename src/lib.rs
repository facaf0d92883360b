//! # BizTime
//!
//! A small HTTP API exposing CRUD operations over two related resources,
//! companies and their invoices, backed by PostgreSQL.
//!
//! The service is a stateless pass-through: each handler validates a path
//! parameter or request body, issues one (or two sequential) parameterized
//! queries through the injected [`storage::Store`], and shapes the result
//! into a JSON envelope. Every failure is translated exactly once, at the
//! HTTP boundary, by [`core::error::ApiError`].
//!
//! ## Architecture
//!
//! - **Storage seam**: handlers receive an `Arc<dyn Store>` via
//!   [`server::AppState`]. The binary wires in [`storage::PostgresStore`];
//!   tests substitute [`storage::InMemoryStore`].
//! - **Resource modules**: [`companies`] and [`invoices`] each carry their
//!   row types and their five HTTP handlers.
//! - **Router**: [`server::router::build_router`] nests the resource routes
//!   under their path prefixes and installs the JSON 404 fallback.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use biztime::prelude::*;
//!
//! let state = AppState::new(InMemoryStore::new());
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod companies;
pub mod config;
pub mod core;
pub mod invoices;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types
pub mod prelude {
    // === Core ===
    pub use crate::core::DeletedResponse;
    pub use crate::core::error::{ApiError, ApiResult};

    // === Models ===
    pub use crate::companies::{Company, CompanySummary};
    pub use crate::invoices::{Invoice, InvoiceDetail, InvoiceSummary};

    // === Storage ===
    pub use crate::storage::{InMemoryStore, PostgresStore, Store, StoreError, StoreResult};

    // === Server ===
    pub use crate::server::{AppState, build_router};

    // === Config ===
    pub use crate::config::Config;

    // === External dependencies ===
    pub use chrono::NaiveDate;
    pub use rust_decimal::Decimal;
}
