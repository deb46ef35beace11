// Backup snapshot model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One immutable backup directory under the backups root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// Directory name; carries the creation timestamp ("backup-<ts>").
    pub name: String,
    pub path: String,
    pub created: DateTime<Utc>,
    /// Recursive sum of file contents (directory entries themselves count 0).
    pub size: u64,
}

/// Result of a backup creation attempt. A failed copy leaves the partial
/// directory in place for operator inspection; `message` says so.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_name: Option<String>,
}
