// HTTP routes (thin JSON plumbing over the controller)

mod http;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::controller::LifecycleController;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) controller: Arc<LifecycleController>,
}

pub fn app(controller: Arc<LifecycleController>) -> Router {
    let state = AppState { controller };
    Router::new()
        .route("/", get(http::root_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/server/info", get(http::server_info)) // aggregate snapshot
        .route("/api/server/logs", get(http::server_logs))
        .route("/api/server/saves", get(http::server_saves))
        .route("/api/server/backups", get(http::server_backups))
        .route("/api/server/config", get(http::server_config))
        .route("/api/server/download/{filename}", get(http::download_save))
        .route("/api/server/download-logs", get(http::download_logs))
        .route("/server/action", post(http::server_action))
        .route("/server/save", post(http::server_save))
        .route("/server/backup", post(http::server_backup))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
