// Save artifact model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One .sav file on the shared data volume. Enumerated fresh on every query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFile {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
    /// Naming-convention hint (the settings-bearing save), not a guarantee
    /// that a running session is using this file.
    pub is_active: bool,
}
