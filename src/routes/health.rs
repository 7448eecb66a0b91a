//! GET /v1/health - unauthenticated liveness probe

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::domain::traits::Logger;
use super::RouteState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub commands: usize,
    pub tasks: usize,
}

pub fn router(client: Arc<BotClient>, logger: Arc<dyn Logger>) -> Router {
    Router::new()
        .route("/", get(health))
        .with_state(RouteState::new(client, logger))
}

async fn health(State(state): State<RouteState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        commands: state.client.commands.len(),
        tasks: state.client.scheduler.tasks().len(),
    })
}
