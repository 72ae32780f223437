use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde_json::json;
use thiserror::Error;

use crate::response::build_response;

pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
///
/// Every variant maps to the uniform `{"error": ...}` response envelope.
/// Store failures deliberately surface as 400 with the store's own message,
/// matching the documented contract of this service.
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Request errors =====
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No route matched")]
    NotFound,

    // ===== Store errors =====
    #[error("Store error: {0}")]
    Store(String),

    // ===== Internal errors =====
    #[error("Response construction error: {0}")]
    Response(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Json(_) | AppError::Validation(_) | AppError::Store(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Response(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed in the response body. Parse failures are reported
    /// with a static message; the serde detail stays in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Json(_) => "Invalid JSON".to_string(),
            AppError::Validation(msg) | AppError::Store(msg) => msg.clone(),
            AppError::NotFound => "Not found".to_string(),
            AppError::Response(_) => "Internal server error".to_string(),
        }
    }

    /// Log this error with a level matching its class. A routing miss is
    /// the default case, not an error condition.
    fn log(&self) {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "server error occurred");
        } else if matches!(self, AppError::NotFound) {
            tracing::debug!(status = status.as_u16(), "no route matched");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "client error occurred");
        }
    }

    /// Convert into the uniform JSON response envelope.
    pub fn into_response(self) -> Response<Body> {
        self.log();

        let status = self.status_code();
        let body = json!({ "error": self.user_message() });

        build_response(status, &body).unwrap_or_else(|_| {
            // Fallback if envelope construction itself fails
            let mut response = Response::new(Body::from(r#"{"error":"Internal server error"}"#));
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        })
    }
}
