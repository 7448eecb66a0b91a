//! POST /v1/stage - open, retitle or close the stage channel

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

/// Discord's limit on stage topics
pub const MAX_TOPIC_LEN: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageAction {
    Start,
    Update,
    End,
}

#[derive(Debug, Deserialize)]
pub struct StageRequest {
    #[serde(default)]
    pub secret: Option<String>,
    pub action: StageAction,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StageResponse {
    pub ok: bool,
    pub action: StageAction,
    pub topic: Option<String>,
}

pub fn router(client: Arc<BotClient>, logger: Arc<dyn Logger>) -> Router {
    Router::new()
        .route("/", post(control))
        .with_state(RouteState::new(client, logger))
}

/// Trimmed topic, or a 400 when it is missing or too long
pub fn validate_topic(topic: Option<&str>) -> Result<String, ApiError> {
    let topic = topic.map(str::trim).unwrap_or_default();
    if topic.is_empty() {
        return Err(ApiError::BadRequest("A topic is required".to_string()));
    }
    if topic.chars().count() > MAX_TOPIC_LEN {
        return Err(ApiError::BadRequest(format!("Topic is longer than {} characters", MAX_TOPIC_LEN)));
    }
    Ok(topic.to_string())
}

async fn control(
    State(state): State<RouteState>,
    headers: HeaderMap,
    body: Result<Json<StageRequest>, JsonRejection>,
) -> Result<Json<StageResponse>, ApiError> {
    let Json(body) = body?;
    authorize(&state, &headers, body.secret.as_deref())?;

    let channel_id = state.client.config.station.stage_channel_id
        .ok_or_else(|| ApiError::Unavailable("Stage channel is not configured".to_string()))?;
    let discord = &state.client.discord;

    let topic = match body.action {
        StageAction::Start => {
            let topic = validate_topic(body.topic.as_deref())?;
            discord.start_stage(channel_id, &topic).await?;
            Some(topic)
        }
        StageAction::Update => {
            let topic = validate_topic(body.topic.as_deref())?;
            discord.set_stage_topic(channel_id, &topic).await?;
            Some(topic)
        }
        StageAction::End => {
            discord.end_stage(channel_id).await?;
            None
        }
    };

    *state.client.station.stage_topic.write().await = topic.clone();
    state.logger.custom("API", &format!("Stage {:?}: {:?}", body.action, topic));

    Ok(Json(StageResponse { ok: true, action: body.action, topic }))
}
