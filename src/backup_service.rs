// Filesystem backups of the save directory

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{info, warn};

use crate::models::{Backup, BackupOutcome};

/// Prefix every backup directory name carries.
pub const BACKUP_PREFIX: &str = "backup-";

/// Filename-safe timestamp identifier: UTC RFC3339 with `:` and `.` swapped
/// for `-` (both are illegal or awkward in path segments).
pub fn backup_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

/// Snapshot `saved_dir` into a fresh `backups_root/backup-<timestamp>`.
///
/// The backups root is created if absent. Two calls in the same millisecond
/// still get distinct directories (numeric suffix on collision). A copy
/// failure after the directory exists is reported as a failure and the
/// partial directory is left in place for inspection; there is no rollback.
pub fn create_backup(saved_dir: &Path, backups_root: &Path) -> BackupOutcome {
    if let Err(e) = std::fs::create_dir_all(backups_root) {
        warn!("Creating backups root {} failed: {}", backups_root.display(), e);
        return BackupOutcome {
            success: false,
            message: format!("Failed to create backup directory: {e}"),
            backup_name: None,
        };
    }

    let (name, target) = match claim_backup_dir(backups_root, Utc::now()) {
        Ok(pair) => pair,
        Err(e) => {
            warn!("Creating backup directory failed: {}", e);
            return BackupOutcome {
                success: false,
                message: format!("Failed to create backup directory: {e}"),
                backup_name: None,
            };
        }
    };

    if let Err(e) = copy_dir_recursive(saved_dir, &target) {
        warn!("Backup copy into {} failed: {}", target.display(), e);
        return BackupOutcome {
            success: false,
            message: format!(
                "Failed to copy save files: {e}. Partial backup left at {name} for inspection."
            ),
            backup_name: Some(name),
        };
    }

    info!("Backup {} created", name);
    BackupOutcome {
        success: true,
        message: format!("Backup created successfully at {name}"),
        backup_name: Some(name),
    }
}

/// List backup directories under `backups_root`, newest-created first.
/// A missing or unreadable root degrades to an empty list.
pub fn list_backups(backups_root: &Path) -> Vec<Backup> {
    let entries = match std::fs::read_dir(backups_root) {
        Ok(e) => e,
        Err(e) => {
            warn!(
                "Reading backups root {} failed: {}",
                backups_root.display(),
                e
            );
            return Vec::new();
        }
    };

    let mut backups = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(BACKUP_PREFIX) {
            continue;
        }
        let meta = match entry.metadata() {
            Ok(m) if m.is_dir() => m,
            Ok(_) => continue,
            Err(e) => {
                warn!("Stat failed for backup {}: {}", name, e);
                continue;
            }
        };
        let path = entry.path();
        let created = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        backups.push(Backup {
            size: dir_size(&path),
            name,
            path: path.to_string_lossy().into_owned(),
            created,
        });
    }

    backups.sort_by(|a, b| b.created.cmp(&a.created));
    backups
}

/// Recursive sum of file sizes under `path`. Directory entries contribute
/// only their contents; unreadable subtrees count as zero.
pub fn dir_size(path: &Path) -> u64 {
    let entries = match std::fs::read_dir(path) {
        Ok(e) => e,
        Err(_) => return 0,
    };
    let mut size = 0u64;
    for entry in entries.flatten() {
        match entry.metadata() {
            Ok(meta) if meta.is_dir() => size += dir_size(&entry.path()),
            Ok(meta) => size += meta.len(),
            Err(_) => {}
        }
    }
    size
}

/// Create and return the first free `backup-<ts>[-<n>]` directory. Uses
/// `create_dir` (not `create_dir_all`) so an existing directory is a
/// collision, never silently reused.
fn claim_backup_dir(
    backups_root: &Path,
    now: DateTime<Utc>,
) -> io::Result<(String, PathBuf)> {
    let base = format!("{}{}", BACKUP_PREFIX, backup_timestamp(now));
    let mut attempt = 0u32;
    loop {
        let name = if attempt == 0 {
            base.clone()
        } else {
            format!("{base}-{attempt}")
        };
        let target = backups_root.join(&name);
        match std::fs::create_dir(&target) {
            Ok(()) => return Ok((name, target)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && attempt < 1000 => {
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn copy_dir_recursive(from: &Path, to: &Path) -> io::Result<()> {
    for entry in std::fs::read_dir(from)? {
        let entry = entry?;
        let dest = to.join(entry.file_name());
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            std::fs::create_dir(&dest)?;
            copy_dir_recursive(&entry.path(), &dest)?;
        } else {
            std::fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}
