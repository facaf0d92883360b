//! Companies resource: row types and HTTP handlers

pub mod handlers;
pub mod model;

pub use model::{Company, CompanySummary};
