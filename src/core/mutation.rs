//! Key removal across locale files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::core::resources::metadata_key;

/// Whether a removal pass writes files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalMode {
    DryRun,
    Apply,
}

/// An ARB file loaded for editing.
///
/// Key order is preserved. Output is pretty-printed with 2-space indentation.
pub struct ArbEditor {
    file_path: PathBuf,
    entries: Map<String, Value>,
}

impl ArbEditor {
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
        let Value::Object(entries) = value else {
            bail!("'{}' is not a JSON object", path.display());
        };
        Ok(Self {
            file_path: path.to_path_buf(),
            entries,
        })
    }

    /// Remove each key and its `@key` metadata entry.
    ///
    /// Returns the keys whose value entry was present, in the order given,
    /// and the number of metadata entries removed.
    pub fn remove_keys(&mut self, keys: &[String]) -> (Vec<String>, usize) {
        let mut removed = Vec::new();
        let mut metadata_removed = 0;

        for key in keys {
            if self.entries.shift_remove(key).is_some() {
                removed.push(key.clone());
            }
            if self.entries.shift_remove(&metadata_key(key)).is_some() {
                metadata_removed += 1;
            }
        }

        (removed, metadata_removed)
    }

    pub fn content(&self) -> Result<String> {
        let mut content = serde_json::to_string_pretty(&self.entries)
            .with_context(|| "Failed to serialize JSON")?;
        content.push('\n');
        Ok(content)
    }

    pub fn save(&self) -> Result<()> {
        fs::write(&self.file_path, self.content()?)
            .with_context(|| format!("Failed to write file: {}", self.file_path.display()))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed {
        keys: Vec<String>,
        metadata_removed: usize,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRemoval {
    pub locale: String,
    pub path: PathBuf,
    pub outcome: RemovalOutcome,
}

impl LocaleRemoval {
    /// Number of value entries removed (or that would be removed).
    pub fn removed_count(&self) -> usize {
        match &self.outcome {
            RemovalOutcome::Removed { keys, .. } => keys.len(),
            RemovalOutcome::Failed { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    pub mode: RemovalMode,
    pub locales: Vec<LocaleRemoval>,
}

impl RemovalReport {
    pub fn total_removed(&self) -> usize {
        self.locales.iter().map(LocaleRemoval::removed_count).sum()
    }

    pub fn files_changed(&self) -> usize {
        self.locales
            .iter()
            .filter(|l| match &l.outcome {
                RemovalOutcome::Removed {
                    keys,
                    metadata_removed,
                } => !keys.is_empty() || *metadata_removed > 0,
                RemovalOutcome::Failed { .. } => false,
            })
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &LocaleRemoval> {
        self.locales
            .iter()
            .filter(|l| matches!(l.outcome, RemovalOutcome::Failed { .. }))
    }
}

/// Remove `keys` (and their metadata) from every locale file.
///
/// Each file is re-read from disk. In [`RemovalMode::DryRun`] nothing is
/// written; in [`RemovalMode::Apply`] a file is rewritten only when something
/// was removed from it. Missing files are skipped; other per-file failures are
/// recorded and do not stop the remaining locales.
pub fn remove_keys(
    files: &[(String, PathBuf)],
    keys: &[String],
    mode: RemovalMode,
) -> RemovalReport {
    let locales = files
        .iter()
        .filter(|(_, path)| path.exists())
        .map(|(locale, path)| {
            let outcome = match remove_from_file(path, keys, mode) {
                Ok((keys, metadata_removed)) => RemovalOutcome::Removed {
                    keys,
                    metadata_removed,
                },
                Err(e) => RemovalOutcome::Failed {
                    error: format!("{:#}", e),
                },
            };
            LocaleRemoval {
                locale: locale.clone(),
                path: path.clone(),
                outcome,
            }
        })
        .collect();

    RemovalReport { mode, locales }
}

fn remove_from_file(
    path: &Path,
    keys: &[String],
    mode: RemovalMode,
) -> Result<(Vec<String>, usize)> {
    let mut editor = ArbEditor::open(path)?;
    let (removed, metadata_removed) = editor.remove_keys(keys);
    if mode == RemovalMode::Apply && (!removed.is_empty() || metadata_removed > 0) {
        editor.save()?;
    }
    Ok((removed, metadata_removed))
}
