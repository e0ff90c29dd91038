//! Locale resource (ARB) loading.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

/// Prefix marking metadata entries (`@key`, `@@locale`).
pub const METADATA_PREFIX: char = '@';

/// File-level metadata key naming the locale of an ARB file.
const LOCALE_METADATA_KEY: &str = "@@locale";

const RESOURCE_EXTENSION: &str = "arb";

pub fn is_metadata_key(key: &str) -> bool {
    key.starts_with(METADATA_PREFIX)
}

/// Metadata entry name for a translation key (`greeting` → `@greeting`).
pub fn metadata_key(key: &str) -> String {
    format!("{}{}", METADATA_PREFIX, key)
}

/// Translation entries and metadata of one locale file, in file order.
#[derive(Debug, Clone)]
pub struct LocaleResource {
    pub locale: String,
    pub path: PathBuf,
    pub entries: Map<String, Value>,
    pub metadata: Map<String, Value>,
}

impl LocaleResource {
    pub fn parse(
        locale: impl Into<String>,
        path: impl Into<PathBuf>,
        content: &str,
    ) -> Result<Self> {
        let path = path.into();
        let json: Value = serde_json::from_str(content)
            .with_context(|| format!("Failed to parse ARB file: {}", path.display()))?;
        let Value::Object(map) = json else {
            bail!("'{}' is not a JSON object", path.display());
        };

        let (metadata, entries): (Map<String, Value>, Map<String, Value>) =
            map.into_iter().partition(|(key, _)| is_metadata_key(key));

        Ok(Self {
            locale: locale.into(),
            path,
            entries,
            metadata,
        })
    }

    pub fn load(locale: impl Into<String>, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read ARB file: {}", path.display()))?;
        Self::parse(locale, path, &content)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Display value of a translation, with non-string values kept as JSON text.
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(display_value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One translation key with its value in every locale that defines it.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationKey {
    pub id: String,
    /// Locale code → translated value.
    pub values: BTreeMap<String, String>,
    /// The master locale's `@key` entry, if any.
    pub metadata: Option<Value>,
}

/// A locale file that could not be loaded. The run continues without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub locale: String,
    pub file_path: String,
    pub error: String,
}

/// All loaded locale files, keyed by locale code.
#[derive(Debug, Clone)]
pub struct ResourceSet {
    pub master_locale: String,
    pub locales: BTreeMap<String, LocaleResource>,
}

impl ResourceSet {
    pub fn master(&self) -> Option<&LocaleResource> {
        self.locales.get(&self.master_locale)
    }

    /// Master locale, or an error listing the locales that did load.
    pub fn require_master(&self) -> Result<&LocaleResource> {
        match self.master() {
            Some(master) => Ok(master),
            None => {
                let available: Vec<&str> = self.locales.keys().map(String::as_str).collect();
                let hint = if available.is_empty() {
                    "No locale files were loaded.".to_string()
                } else {
                    format!("Available locales: {}", available.join(", "))
                };
                bail!(
                    "Master locale '{}' could not be loaded.\n{}\n\
                     Hint: check 'masterLocale' and 'l10nDir' in your config.",
                    self.master_locale,
                    hint
                )
            }
        }
    }

    /// Non-master locales in code order.
    pub fn others(&self) -> impl Iterator<Item = &LocaleResource> {
        self.locales
            .values()
            .filter(move |r| r.locale != self.master_locale)
    }

    pub fn translation_key(&self, key: &str) -> TranslationKey {
        let values = self
            .locales
            .values()
            .filter_map(|r| r.value(key).map(|v| (r.locale.clone(), v)))
            .collect();
        let metadata = self
            .master()
            .and_then(|m| m.metadata.get(&metadata_key(key)))
            .cloned();

        TranslationKey {
            id: key.to_string(),
            values,
            metadata,
        }
    }

    /// Locale files in code order, for backup and removal.
    pub fn files(&self) -> Vec<(String, PathBuf)> {
        self.locales
            .values()
            .map(|r| (r.locale.clone(), r.path.clone()))
            .collect()
    }
}

/// Result of loading locale files.
#[derive(Debug)]
pub struct LoadResult {
    pub resources: ResourceSet,
    pub warnings: Vec<LoadWarning>,
}

/// Load the explicitly configured locale files.
///
/// Missing or malformed files become warnings.
pub fn load_locales(files: &BTreeMap<String, PathBuf>, master_locale: &str) -> LoadResult {
    let mut locales = BTreeMap::new();
    let mut warnings = Vec::new();

    for (locale, path) in files {
        if !path.exists() {
            warnings.push(LoadWarning {
                locale: locale.clone(),
                file_path: path.display().to_string(),
                error: "file not found".to_string(),
            });
            continue;
        }
        match LocaleResource::load(locale.clone(), path) {
            Ok(resource) => {
                locales.insert(locale.clone(), resource);
            }
            Err(e) => warnings.push(LoadWarning {
                locale: locale.clone(),
                file_path: path.display().to_string(),
                error: format!("{:#}", e),
            }),
        }
    }

    LoadResult {
        resources: ResourceSet {
            master_locale: master_locale.to_string(),
            locales,
        },
        warnings,
    }
}

/// Discover and load every `*.arb` file in `l10n_dir`.
pub fn discover_locales(l10n_dir: &Path, master_locale: &str) -> Result<LoadResult> {
    if !l10n_dir.is_dir() {
        bail!(
            "Localization directory '{}' does not exist.\n\
             Hint: check 'l10nDir' in your config or pass --l10n-dir.",
            l10n_dir.display()
        );
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(l10n_dir)
        .with_context(|| format!("Failed to read directory: {}", l10n_dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(RESOURCE_EXTENSION)
        {
            paths.push(path);
        }
    }
    paths.sort();

    let mut locales: BTreeMap<String, LocaleResource> = BTreeMap::new();
    let mut warnings = Vec::new();

    for path in paths {
        let fallback = locale_from_file_name(&path).unwrap_or_default();
        let loaded = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read ARB file: {}", path.display()))
            .and_then(|content| {
                let resource = LocaleResource::parse(fallback.clone(), &path, &content)?;
                Ok(match resource.metadata.get(LOCALE_METADATA_KEY) {
                    Some(Value::String(locale)) => LocaleResource {
                        locale: locale.clone(),
                        ..resource
                    },
                    _ => resource,
                })
            });

        match loaded {
            // Files are sorted, so the first file claiming a locale wins.
            Ok(resource) => match locales.get(&resource.locale) {
                Some(existing) => warnings.push(LoadWarning {
                    error: format!(
                        "locale '{}' is already loaded from {}",
                        resource.locale,
                        existing.path.display()
                    ),
                    locale: resource.locale,
                    file_path: path.display().to_string(),
                }),
                None => {
                    locales.insert(resource.locale.clone(), resource);
                }
            },
            Err(e) => warnings.push(LoadWarning {
                locale: fallback,
                file_path: path.display().to_string(),
                error: format!("{:#}", e),
            }),
        }
    }

    Ok(LoadResult {
        resources: ResourceSet {
            master_locale: master_locale.to_string(),
            locales,
        },
        warnings,
    })
}

/// Locale code from a Flutter-style file name.
///
/// - `app_en.arb` → `en`
/// - `app_zh_CN.arb` → `zh_CN`
/// - `de.arb` → `de`
pub fn locale_from_file_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let locale = stem.split_once('_').map_or(stem, |(_, rest)| rest);
    Some(locale.to_string())
}
