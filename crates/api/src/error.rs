use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use luxrent_core::error::{CoreError, StoreError, ValidationError};
use serde_json::json;

/// Application-level error type for JSON handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
/// Page routes never surface this type; they translate failures into
/// redirects (see [`crate::flash`]).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `luxrent_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(reason) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    match reason {
                        ValidationError::MissingField => "A required field is missing",
                        ValidationError::InvalidFormat => "Please enter a valid email address",
                    }
                    .to_string(),
                ),
                CoreError::Unauthenticated => (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHENTICATED",
                    "Please log in to continue".to_string(),
                ),
                CoreError::Store(StoreError::Unavailable(msg)) => {
                    tracing::error!(error = %msg, "Session store unavailable");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "STORE_UNAVAILABLE",
                        "Sessions are temporarily unavailable".to_string(),
                    )
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
