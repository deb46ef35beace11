// Lifecycle orchestration over the process boundary and the data volume.
//
// The managed server is an externally-owned resource: every state transition
// (stopped -> starting -> running -> unhealthy/stopped) happens in the
// container runtime and is only observed here via status polling. The
// controller holds no cross-request state, so concurrent requests need no
// locking; each one makes its own single-shot boundary or filesystem call.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::backup_service;
use crate::config::LogWindowConfig;
use crate::models::{ActionResult, Backup, BackupOutcome, PlayerSession, SaveFile, ServerStatus};
use crate::players;
use crate::save_store::{self, SaveLookupError};
use crate::server_repo::{BoundaryError, ServerBoundary};

/// Aggregate dashboard snapshot: one status poll, a short log tail, the
/// inferred player set, and the current save listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSnapshot {
    pub server_status: ServerStatus,
    pub logs: Vec<String>,
    pub players: Vec<PlayerSession>,
    pub saves: Vec<SaveFile>,
}

pub struct LifecycleController {
    boundary: Arc<dyn ServerBoundary>,
    saved_dir: PathBuf,
    backups_root: PathBuf,
    windows: LogWindowConfig,
}

impl LifecycleController {
    pub fn new(
        boundary: Arc<dyn ServerBoundary>,
        saved_dir: PathBuf,
        backups_root: PathBuf,
        windows: LogWindowConfig,
    ) -> Self {
        Self {
            boundary,
            saved_dir,
            backups_root,
            windows,
        }
    }

    pub fn windows(&self) -> &LogWindowConfig {
        &self.windows
    }

    pub async fn status(&self) -> Result<ServerStatus, BoundaryError> {
        self.boundary.status().await
    }

    pub async fn logs(&self, limit: u64) -> Vec<String> {
        self.boundary.logs(limit).await
    }

    /// Inferred online players. Scans the configured trailing log window, so
    /// the result is approximate: connects older than the window are missed.
    pub async fn online_players(&self) -> Vec<PlayerSession> {
        let lines = self.boundary.logs(self.windows.player_scan_window).await;
        players::extract_online_players(&lines)
    }

    pub fn saves(&self) -> Vec<SaveFile> {
        save_store::list_saves(&self.saved_dir)
    }

    pub fn resolve_save(&self, name: &str) -> Result<PathBuf, SaveLookupError> {
        save_store::resolve_save_path(&self.saved_dir, name)
    }

    pub fn backups(&self) -> Vec<Backup> {
        backup_service::list_backups(&self.backups_root)
    }

    pub async fn environment(&self) -> BTreeMap<String, Option<String>> {
        self.boundary.environment().await
    }

    /// Dispatch a named lifecycle action; unknown names fail without touching
    /// the boundary.
    pub async fn action(&self, action: &str) -> ActionResult {
        match action {
            "start" => self.boundary.start().await,
            "stop" => self.boundary.stop().await,
            "restart" => self.boundary.restart().await,
            _ => ActionResult::failure("Unknown action"),
        }
    }

    /// Advisory save: forwards the boundary's best-effort signal. The
    /// message never claims a durable save happened.
    pub async fn save(&self) -> ActionResult {
        self.boundary.save_signal().await
    }

    /// Snapshot the save directory into a new timestamped backup. Announces
    /// the attempt up front; completion (or failure) is what the returned
    /// future resolves to. The copy runs on the blocking pool.
    pub async fn backup(&self) -> BackupOutcome {
        info!(
            "Backup in progress: {} -> {}",
            self.saved_dir.display(),
            self.backups_root.display()
        );
        let saved = self.saved_dir.clone();
        let root = self.backups_root.clone();
        match tokio::task::spawn_blocking(move || backup_service::create_backup(&saved, &root))
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => BackupOutcome {
                success: false,
                message: format!("Backup task failed: {e}"),
                backup_name: None,
            },
        }
    }

    pub async fn snapshot(&self) -> Result<ServerSnapshot, BoundaryError> {
        let server_status = self.boundary.status().await?;
        let logs = self.boundary.logs(self.windows.snapshot_tail).await;
        let players = self.online_players().await;
        let saves = self.saves();
        Ok(ServerSnapshot {
            server_status,
            logs,
            players,
            saves,
        })
    }

    pub fn saved_dir(&self) -> &Path {
        &self.saved_dir
    }
}
