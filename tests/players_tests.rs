// Online-player inference from log windows

use chrono::{Duration, Utc};
use ficsit_control::models::format_play_time;
use ficsit_control::players::extract_online_players;

#[test]
fn test_connect_without_disconnect_is_online() {
    let lines = vec![
        "LogNet: Connection established for user: Alice, address 10.0.0.5".to_string(),
        "LogGame: autosave complete".to_string(),
    ];
    let players = extract_online_players(&lines);
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].name, "Alice");
}

#[test]
fn test_connect_then_disconnect_is_offline() {
    let lines = vec![
        "Connection established for user: Alice, address 10.0.0.5",
        "Connection closed for user: Alice, address 10.0.0.5",
    ];
    assert!(extract_online_players(&lines).is_empty());
}

#[test]
fn test_double_connect_then_disconnect_leaves_no_trace() {
    // Last event wins; a reconnect must not double-track the player.
    let lines = vec![
        "Connection established for user: Alice",
        "Connection established for user: Alice",
        "Connection closed for user: Alice",
    ];
    assert!(extract_online_players(&lines).is_empty());
}

#[test]
fn test_disconnect_without_prior_connect_is_ignored() {
    let lines = vec!["Connection closed for user: Ghost, address 10.0.0.9"];
    assert!(extract_online_players(&lines).is_empty());
}

#[test]
fn test_identifier_runs_to_comma_and_is_trimmed() {
    let lines = vec!["2026.08.06: Connection established for user:   Crash Bandicoot , id=77"];
    let players = extract_online_players(&lines);
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].name, "Crash Bandicoot");
}

#[test]
fn test_identifier_without_delimiter_runs_to_end_of_line() {
    let lines = vec!["Connection established for user: Bob"];
    let players = extract_online_players(&lines);
    assert_eq!(players[0].name, "Bob");
}

#[test]
fn test_markers_match_case_insensitively() {
    let lines = vec![
        "CONNECTION ESTABLISHED FOR USER: Alice",
        "connection closed FOR user: Alice",
        "Connection Established For User: Bob",
    ];
    let players = extract_online_players(&lines);
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].name, "Bob");
}

#[test]
fn test_unrelated_lines_are_ignored() {
    let lines = vec![
        "LogGame: saving world",
        "Connection refused for user: Eve",
        "established for user without the marker prefix",
    ];
    assert!(extract_online_players(&lines).is_empty());
}

#[test]
fn test_result_is_sorted_by_name() {
    let lines = vec![
        "Connection established for user: Zed",
        "Connection established for user: Amy",
        "Connection established for user: Mia",
    ];
    let names: Vec<_> = extract_online_players(&lines)
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Amy", "Mia", "Zed"]);
}

#[test]
fn test_fresh_session_play_time_is_zero() {
    let lines = vec!["Connection established for user: Alice"];
    let players = extract_online_players(&lines);
    assert_eq!(players[0].play_time, "00:00:00");
}

#[test]
fn test_format_play_time_spans() {
    let start = Utc::now();
    assert_eq!(format_play_time(start, start), "00:00:00");
    assert_eq!(
        format_play_time(start, start + Duration::seconds(3661)),
        "01:01:01"
    );
    assert_eq!(
        format_play_time(start, start + Duration::seconds(90)),
        "00:01:30"
    );
    // Clock skew clamps to zero rather than underflowing.
    assert_eq!(
        format_play_time(start, start - Duration::seconds(5)),
        "00:00:00"
    );
}
