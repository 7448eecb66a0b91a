//! /v1/playlist - current playlist, replaced by the stream-automation tool

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::domain::entities::{Playlist, Track};
use crate::domain::traits::Logger;
use super::auth::authorize;
use super::error::ApiError;
use super::RouteState;

/// Upper bound on tracks accepted in one update
pub const MAX_TRACKS: usize = 500;

#[derive(Debug, Deserialize)]
pub struct PlaylistUpdate {
    #[serde(default)]
    pub secret: Option<String>,
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistUpdated {
    pub ok: bool,
    pub tracks: usize,
}

pub fn router(client: Arc<BotClient>, logger: Arc<dyn Logger>) -> Router {
    Router::new()
        .route("/", get(current).post(update))
        .with_state(RouteState::new(client, logger))
}

async fn current(State(state): State<RouteState>) -> Json<Playlist> {
    Json(state.client.station.playlist.read().await.clone())
}

async fn update(
    State(state): State<RouteState>,
    headers: HeaderMap,
    body: Result<Json<PlaylistUpdate>, JsonRejection>,
) -> Result<Json<PlaylistUpdated>, ApiError> {
    let Json(body) = body?;
    authorize(&state, &headers, body.secret.as_deref())?;

    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Playlist name is required".to_string()));
    }
    if body.tracks.len() > MAX_TRACKS {
        return Err(ApiError::BadRequest(format!("At most {} tracks are accepted", MAX_TRACKS)));
    }
    if body.tracks.iter().any(|t| t.title.trim().is_empty()) {
        return Err(ApiError::BadRequest("Every track needs a title".to_string()));
    }

    let count = body.tracks.len();
    *state.client.station.playlist.write().await = Playlist {
        name: name.to_string(),
        tracks: body.tracks,
        updated_at: Some(Utc::now()),
    };
    state.logger.custom("API", &format!("Playlist '{}' updated with {} tracks", name, count));

    Ok(Json(PlaylistUpdated { ok: true, tracks: count }))
}
