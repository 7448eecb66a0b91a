//! Shared-secret authorization for the automation API

use axum::http::HeaderMap;

use super::error::ApiError;
use super::RouteState;

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Accept the request if the header or the body field carries the configured secret
pub fn authorize(state: &RouteState, headers: &HeaderMap, body_secret: Option<&str>) -> Result<(), ApiError> {
    let Some(expected) = state.client.config.api.secret.as_deref().filter(|s| !s.is_empty()) else {
        return Err(ApiError::Forbidden);
    };

    let header_secret = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    let provided = header_secret.or(body_secret);

    match provided {
        Some(secret) if constant_time_eq(secret.as_bytes(), expected.as_bytes()) => Ok(()),
        _ => {
            state.logger.warn("Rejected API request with missing or invalid secret");
            Err(ApiError::Unauthorized)
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
