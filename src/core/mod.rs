//! Shared plumbing used by both resource modules

pub mod error;

pub use error::{ApiError, ApiResult};

use serde::Serialize;

/// Response body for a successful DELETE on either resource.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub status: &'static str,
}

impl DeletedResponse {
    pub fn deleted() -> Self {
        Self { status: "deleted" }
    }
}
