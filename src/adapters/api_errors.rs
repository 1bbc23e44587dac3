use crate::domain::error::PipelineError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype so the domain error can be returned from axum handlers.
pub struct ApiError(pub PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self.0 {
            err if err.is_validation() => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                err.to_string(),
            ),
            // Non-200 so the gateway redelivers once the site or payment exists.
            PipelineError::UnknownSite(_) | PipelineError::PaymentNotFound(_) => {
                tracing::warn!("unroutable event: {}", self.0);
                (
                    StatusCode::NOT_FOUND,
                    "site_not_found",
                    self.0.to_string(),
                )
            }
            PipelineError::Database(err) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
            err => {
                tracing::error!("internal error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error_code": error_code,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}
