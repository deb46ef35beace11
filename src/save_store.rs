// Save artifact enumeration and download-path resolution

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::models::SaveFile;

/// Extension the game uses for save artifacts.
pub const SAVE_EXTENSION: &str = "sav";

/// The settings-bearing save the server loads on boot; flagged as the
/// "active" save in listings (a UI hint, nothing more).
pub const ACTIVE_SAVE_NAME: &str = "ServerSettings.7777.sav";

/// Rejection reasons for a download-by-name request. Raised before any I/O
/// outside the save directory.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SaveLookupError {
    #[error("invalid save file name")]
    InvalidName,
    #[error("not a .{SAVE_EXTENSION} file")]
    WrongExtension,
    #[error("save file not found")]
    NotFound,
}

/// List .sav files in `saved_dir`, newest-modified first.
///
/// A missing or unreadable directory is an empty listing, not an error; the
/// data volume being unmounted must not take the caller down. Files that
/// fail to stat are skipped.
pub fn list_saves(saved_dir: &Path) -> Vec<SaveFile> {
    let entries = match std::fs::read_dir(saved_dir) {
        Ok(e) => e,
        Err(e) => {
            warn!("Reading save directory {} failed: {}", saved_dir.display(), e);
            return Vec::new();
        }
    };

    let mut saves = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if path.extension().and_then(|e| e.to_str()) != Some(SAVE_EXTENSION) {
            continue;
        }
        let meta = match entry.metadata() {
            Ok(m) if m.is_file() => m,
            Ok(_) => continue,
            Err(e) => {
                warn!("Stat failed for save {}: {}", path.display(), e);
                continue;
            }
        };
        let modified = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        saves.push(SaveFile {
            is_active: name == ACTIVE_SAVE_NAME,
            name,
            path: path.to_string_lossy().into_owned(),
            size: meta.len(),
            modified,
        });
    }

    saves.sort_by(|a, b| b.modified.cmp(&a.modified));
    saves
}

/// Resolve a client-supplied save name to a path inside `saved_dir`.
///
/// The name must be a bare filename with the save extension; anything with
/// path separators or parent components is rejected before the filesystem is
/// consulted, so a traversal attempt can never escape the save directory.
pub fn resolve_save_path(saved_dir: &Path, name: &str) -> Result<PathBuf, SaveLookupError> {
    if name.is_empty() || name.contains('/') || name.contains('\\') {
        return Err(SaveLookupError::InvalidName);
    }
    let candidate = Path::new(name);
    let mut components = candidate.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => return Err(SaveLookupError::InvalidName),
    }
    if candidate.extension().and_then(|e| e.to_str()) != Some(SAVE_EXTENSION) {
        return Err(SaveLookupError::WrongExtension);
    }

    let path = saved_dir.join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(SaveLookupError::NotFound)
    }
}
