// Server status and lifecycle-action models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Observed health of the managed container; serializes to lowercase JSON
/// (e.g. "running").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Stopped,
    Starting,
    Running,
    Unhealthy,
}

impl HealthState {
    /// Derive from Docker's human status text for a *running* container
    /// ("Up 2 hours (healthy)", "Up 10 seconds (health: starting)").
    pub fn from_status_text(status: &str) -> Self {
        let lower = status.to_lowercase();
        if lower.contains("unhealthy") {
            HealthState::Unhealthy
        } else if lower.contains("starting") {
            HealthState::Starting
        } else {
            HealthState::Running
        }
    }
}

/// Secondary detail from container inspect; every field is best-effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerInfo {
    pub id: String,
    pub name: String,
    pub image: String,
    pub created: String,
    pub restart_count: i64,
    pub network_mode: String,
    #[serde(default)]
    pub ports: BTreeMap<String, Vec<String>>,
}

/// One status snapshot of the managed container.
///
/// Invariant: `state == Stopped` exactly when `running` is false.
/// `container_info` is omitted when the inspect call fails; the primary
/// liveness answer never waits on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub running: bool,
    pub state: HealthState,
    /// Docker's human-readable uptime descriptor; "N/A" when stopped.
    pub uptime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_info: Option<ContainerInfo>,
}

impl ServerStatus {
    pub fn stopped() -> Self {
        Self {
            running: false,
            state: HealthState::Stopped,
            uptime: "N/A".to_string(),
            container_info: None,
        }
    }
}

/// Outcome envelope for start/stop/restart/save/backup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
