//! Service error taxonomy and HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_types::FieldError;
use serde_json::json;

use crate::storage::StoreError;

/// Everything a catalog operation can fail with.
///
/// Cache problems are deliberately absent: they are absorbed inside the
/// catalog service and degrade the call to uncached behavior.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("product {0} not found")]
    NotFound(i64),

    #[error("unauthorized")]
    Unauthorized,

    #[error("storage unavailable: {0}")]
    Storage(#[source] sqlx::Error),

    #[error("operation cancelled")]
    Cancelled,
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => CatalogError::NotFound(id),
            StoreError::Unavailable(e) => CatalogError::Storage(e),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match self {
            CatalogError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            CatalogError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("product {} not found", id),
            )
                .into_response(),
            CatalogError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "unauthorized".to_string()).into_response()
            }
            CatalogError::Storage(e) => {
                tracing::error!("storage failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage unavailable".to_string(),
                )
                    .into_response()
            }
            // No standard status for a cancelled request; by the time it
            // matters the client is usually gone.
            CatalogError::Cancelled => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "request cancelled".to_string(),
            )
                .into_response(),
        }
    }
}
