// JSON handlers; every body is the {success, data|error} envelope

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::version::{NAME, VERSION};

pub(super) async fn root_handler() -> impl IntoResponse {
    "Satisfactory server control plane"
}

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(json!({
        "name": NAME,
        "version": VERSION,
    }))
}

fn ok_data(data: impl serde::Serialize) -> axum::Json<serde_json::Value> {
    axum::Json(json!({ "success": true, "data": data }))
}

fn err_data(error: impl std::fmt::Display) -> axum::Json<serde_json::Value> {
    axum::Json(json!({ "success": false, "error": error.to_string() }))
}

/// Parse a user-supplied tail limit; anything non-numeric (including
/// negatives) falls back to `default`. `0` is legal and means "no limit".
fn parse_limit(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.parse::<u64>().ok()).unwrap_or(default)
}

#[derive(Deserialize)]
pub(super) struct LimitQuery {
    limit: Option<String>,
}

/// GET /api/server/info — status + short log tail + players + saves in one
/// poll. A failed liveness query is the whole answer (error envelope).
pub(super) async fn server_info(State(state): State<AppState>) -> impl IntoResponse {
    match state.controller.snapshot().await {
        Ok(snapshot) => ok_data(snapshot),
        Err(e) => err_data(e),
    }
}

pub(super) async fn server_logs(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> impl IntoResponse {
    let limit = parse_limit(query.limit.as_deref(), state.controller.windows().default_tail);
    let logs = state.controller.logs(limit).await;
    ok_data(json!({ "logs": logs }))
}

pub(super) async fn server_saves(State(state): State<AppState>) -> impl IntoResponse {
    ok_data(json!({ "saves": state.controller.saves() }))
}

pub(super) async fn server_backups(State(state): State<AppState>) -> impl IntoResponse {
    ok_data(json!({ "backups": state.controller.backups() }))
}

/// GET /api/server/config — the container's environment snapshot. Degrades
/// to an empty map when the boundary is unreachable.
pub(super) async fn server_config(State(state): State<AppState>) -> impl IntoResponse {
    ok_data(state.controller.environment().await)
}

/// GET /api/server/download/{filename} — containment-checked .sav download.
pub(super) async fn download_save(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> impl IntoResponse {
    let path = match state.controller.resolve_save(&filename) {
        Ok(p) => p,
        Err(e) => return (StatusCode::NOT_FOUND, err_data(e)).into_response(),
    };
    match tokio::fs::read(&path).await {
        Ok(contents) => (
            [
                (header::CONTENT_TYPE, "application/octet-stream".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ],
            Bytes::from(contents),
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, err_data(e)).into_response(),
    }
}

/// GET /api/server/download-logs — plain-text log attachment. `limit=0`
/// fetches the full retained history; positive limits clamp to the
/// configured maximum before the boundary is asked.
pub(super) async fn download_logs(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> impl IntoResponse {
    let windows = state.controller.windows();
    let requested = parse_limit(query.limit.as_deref(), windows.download_default_tail);
    let limit = if requested == 0 {
        0
    } else {
        requested.min(windows.download_max_tail)
    };
    let logs = state.controller.logs(limit).await;

    let timestamp = chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    (
        [
            (header::CONTENT_TYPE, "text/plain".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=server-logs-{timestamp}.txt"),
            ),
        ],
        logs.join("\n"),
    )
}

#[derive(Deserialize)]
pub(super) struct ActionRequest {
    action: String,
}

/// POST /server/action {action: start|stop|restart}.
pub(super) async fn server_action(
    State(state): State<AppState>,
    axum::Json(request): axum::Json<ActionRequest>,
) -> impl IntoResponse {
    axum::Json(state.controller.action(&request.action).await)
}

/// POST /server/save — advisory; the response message carries the caveat.
pub(super) async fn server_save(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.controller.save().await)
}

/// POST /server/backup — resolves once the copy finished (or failed).
pub(super) async fn server_backup(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.controller.backup().await)
}
