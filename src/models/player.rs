// Log-inferred player session model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A player considered online, inferred from the server log stream.
///
/// `connected_at` is the time the connect line was *processed*, not the time
/// it was emitted; the log shape carries no per-line timestamp at this layer.
/// Best-effort by construction (see `players::extract_online_players`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSession {
    pub name: String,
    pub connected_at: DateTime<Utc>,
    /// Elapsed session time as "HH:MM:SS", relative to `connected_at`.
    pub play_time: String,
}

impl PlayerSession {
    pub fn new(name: impl Into<String>) -> Self {
        let connected_at = Utc::now();
        Self {
            name: name.into(),
            connected_at,
            play_time: format_play_time(connected_at, connected_at),
        }
    }
}

/// Format the span between two instants as "HH:MM:SS" (clamped at zero).
pub fn format_play_time(connected_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - connected_at).num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
