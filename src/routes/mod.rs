//! HTTP routes - Mount adapter and the built-in route modules
//!
//! Each route file produces an axum `Router` that is mounted under
//! `/v1/<file stem>`. Route stems must be unique: mounting twice at the same
//! path keeps the last router.

pub mod alerts;
pub mod auth;
pub mod error;
pub mod health;
pub mod playlist;
pub mod stage;

use axum::Router;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::domain::traits::Logger;
use crate::plugins::descriptor::Module;

pub use error::ApiError;

/// State shared by the handlers of one route module
#[derive(Clone)]
pub struct RouteState {
    pub client: Arc<BotClient>,
    pub logger: Arc<dyn Logger>,
}

impl RouteState {
    pub fn new(client: Arc<BotClient>, logger: Arc<dyn Logger>) -> Self {
        Self { client, logger }
    }
}

/// The web app handle routes are mounted on
#[derive(Default)]
pub struct HttpApp {
    mounts: BTreeMap<String, Router>,
}

impl HttpApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a router at `path`, replacing any router already there
    pub fn mount(&mut self, path: impl Into<String>, router: Router) {
        let path = path.into();
        if self.mounts.insert(path.clone(), router).is_some() {
            tracing::warn!("Route {} mounted twice, keeping the last one", path);
        }
    }

    /// Mounted paths, sorted
    pub fn paths(&self) -> Vec<String> {
        self.mounts.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    /// Build the final router
    pub fn into_router(self) -> Router {
        self.mounts
            .into_iter()
            .fold(Router::new(), |app, (path, router)| app.nest(&path, router))
    }
}

/// Route modules shipped with the bot
pub fn catalog() -> Vec<(&'static str, Module)> {
    vec![
        ("alerts", Module::route(Arc::new(alerts::router))),
        ("health", Module::route(Arc::new(health::router))),
        ("playlist", Module::route(Arc::new(playlist::router))),
        ("stage", Module::route(Arc::new(stage::router))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_last_mount_wins() {
        let mut app = HttpApp::new();
        app.mount("/v1/ping", Router::new().route("/", get(|| async { "first" })));
        app.mount("/v1/ping", Router::new().route("/", get(|| async { "second" })));
        assert_eq!(app.paths(), vec!["/v1/ping"]);

        let response = app.into_router()
            .oneshot(Request::get("/v1/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"second");
    }
}
