//! JSON error envelope.
//!
//! # Responsibilities
//! - Map every failure of a relay request to a status code
//! - Render `{"error": "<message>"}` bodies
//!
//! # Design Decisions
//! - Upstream failures collapse to 500 whatever the upstream status was
//! - No partial results: an error replaces the whole body

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crm::CrmError;

/// Errors a relay request can end in.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No route matched the path.
    #[error("Not found")]
    NotFound,

    /// Anything but GET or OPTIONS.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Hex field key absent from the upstream definitions list.
    #[error("Field not found for key: {0}")]
    FieldNotFound(String),

    /// Upstream call failed.
    #[error(transparent)]
    Upstream(#[from] CrmError),

    /// Upstream succeeded but carried no record where one is required.
    #[error("Internal error")]
    MissingRecord,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound | ApiError::FieldNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Upstream(_) | ApiError::MissingRecord => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
