//! POST /v1/alerts - post an announcement to the announcements channel

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::domain::traits::Logger;
use super::auth::authorize;
use super::error::ApiError;
use super::RouteState;

/// Discord's message length limit
pub const MAX_MESSAGE_LEN: usize = 2000;

#[derive(Debug, Deserialize)]
pub struct AlertRequest {
    #[serde(default)]
    pub secret: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub ok: bool,
}

pub fn router(client: Arc<BotClient>, logger: Arc<dyn Logger>) -> Router {
    Router::new()
        .route("/", post(alert))
        .with_state(RouteState::new(client, logger))
}

async fn alert(
    State(state): State<RouteState>,
    headers: HeaderMap,
    body: Result<Json<AlertRequest>, JsonRejection>,
) -> Result<Json<AlertResponse>, ApiError> {
    let Json(body) = body?;
    authorize(&state, &headers, body.secret.as_deref())?;

    let message = body.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }
    if message.chars().count() > MAX_MESSAGE_LEN {
        return Err(ApiError::BadRequest(format!("Message is longer than {} characters", MAX_MESSAGE_LEN)));
    }

    let channel_id = state.client.config.station.announcements_channel_id
        .ok_or_else(|| ApiError::Unavailable("Announcements channel is not configured".to_string()))?;
    state.client.discord.send_message(channel_id, message).await?;
    state.logger.custom("API", &format!("Alert posted to {}", channel_id));

    Ok(Json(AlertResponse { ok: true }))
}
