// Online-player inference from the server log stream.
//
// The dedicated server exposes no session API, so player state is derived by
// folding over log lines: a connect line inserts a session keyed by player
// name, a disconnect line removes it, and whatever survives the fold is the
// online set. This is best-effort by nature. A trailing window that starts
// after a player's connect line never shows that player; a disconnect with no
// prior connect in the window is dropped. Callers bound the error by scanning
// a window of several hundred lines (config `logs.player_scan_window`).

use std::collections::BTreeMap;

use crate::models::PlayerSession;

const CONNECT_MARKER: &str = "connection established for user: ";
const DISCONNECT_MARKER: &str = "connection closed for user: ";

/// Fold an ordered log window (earliest line first) into the inferred set of
/// online players, sorted by name.
pub fn extract_online_players<S: AsRef<str>>(lines: &[S]) -> Vec<PlayerSession> {
    let mut online: BTreeMap<String, PlayerSession> = BTreeMap::new();

    for line in lines {
        let line = line.as_ref();
        if let Some(name) = capture_user(line, CONNECT_MARKER) {
            online.insert(name.to_string(), PlayerSession::new(name));
        } else if let Some(name) = capture_user(line, DISCONNECT_MARKER) {
            online.remove(name);
        }
    }

    online.into_values().collect()
}

/// Extract the player identifier following `marker` (case-insensitive): the
/// text up to the next `,` field delimiter, trimmed. Returns None for names
/// that trim to nothing.
fn capture_user<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    // ASCII lowering keeps byte offsets aligned with the original line.
    let start = line.to_ascii_lowercase().find(marker)? + marker.len();
    let rest = &line[start..];
    let name = match rest.find(',') {
        Some(end) => &rest[..end],
        None => rest,
    }
    .trim();
    if name.is_empty() { None } else { Some(name) }
}
