use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use filing_core::TaxCalculationError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced over the wire.
///
/// Every error renders as `{"error": {"kind": ..., "message": ...}}` with a
/// machine-readable kind — never as a partially populated result.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Calculation(#[from] TaxCalculationError),

    #[error("invalid request body: {0}")]
    InvalidRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            Self::Calculation(TaxCalculationError::MissingIncomeData(_)) => "missing_income_data",
            Self::InvalidRequest(_) => "invalid_request",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Calculation(TaxCalculationError::MissingIncomeData(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
            }
        }));

        (self.status(), body).into_response()
    }
}
