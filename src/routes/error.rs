//! API errors and their HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::application::errors::BotError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors returned by route handlers.
///
/// Internal failures are logged in full and answered with a generic message.
#[derive(Error, Debug)]
pub enum ApiError {
    /// 400
    #[error("{0}")]
    BadRequest(String),

    /// 401, missing or wrong shared secret
    #[error("Unauthorized")]
    Unauthorized,

    /// 403, the API secret is not configured
    #[error("Forbidden")]
    Forbidden,

    /// 503, a required channel or collaborator is not configured
    #[error("{0}")]
    Unavailable(String),

    /// 500
    #[error(transparent)]
    Internal(#[from] BotError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            ApiError::Internal(err) => {
                tracing::error!("API request failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
