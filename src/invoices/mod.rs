//! Invoices resource: row types and HTTP handlers

pub mod handlers;
pub mod model;

pub use model::{Invoice, InvoiceDetail, InvoiceSummary};
