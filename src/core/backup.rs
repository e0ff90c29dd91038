//! Locale file backups taken before any mutation.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;

use crate::core::report::file_timestamp;

/// Prefix of backup directory names (`l10n_backup_YYYYMMDD_HHMMSS`).
pub const BACKUP_DIR_PREFIX: &str = "l10n_backup_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub locale: String,
    pub source: PathBuf,
    pub copy: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Backup {
    pub dir: PathBuf,
    pub entries: Vec<BackupEntry>,
    /// Locales whose file no longer exists and was not copied.
    pub missing: Vec<String>,
}

pub fn backup_dir_name(time: &NaiveDateTime) -> String {
    format!("{}{}", BACKUP_DIR_PREFIX, file_timestamp(time))
}

/// Copy every locale file into a fresh timestamped directory under `parent`.
///
/// Copies keep their file names. Any copy failure aborts the whole backup.
pub fn create_backup(
    parent: &Path,
    files: &[(String, PathBuf)],
    time: &NaiveDateTime,
) -> Result<Backup> {
    let dir = parent.join(backup_dir_name(time));
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create backup directory: {}", dir.display()))?;

    let mut entries = Vec::new();
    let mut missing = Vec::new();

    for (locale, source) in files {
        if !source.exists() {
            missing.push(locale.clone());
            continue;
        }
        let Some(file_name) = source.file_name() else {
            bail!("Cannot back up '{}': not a file path", source.display());
        };
        let copy = dir.join(file_name);
        if entries.iter().any(|e: &BackupEntry| e.copy == copy) {
            bail!(
                "Cannot back up '{}': another locale file is also named {:?}",
                source.display(),
                file_name
            );
        }
        fs::copy(source, &copy).with_context(|| {
            format!(
                "Failed to copy '{}' to '{}'",
                source.display(),
                copy.display()
            )
        })?;
        entries.push(BackupEntry {
            locale: locale.clone(),
            source: source.clone(),
            copy,
        });
    }

    Ok(Backup {
        dir,
        entries,
        missing,
    })
}
