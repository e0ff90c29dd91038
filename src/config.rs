use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::patterns::{KEY_PLACEHOLDER, PatternSet};

pub const CONFIG_FILE_NAME: &str = ".arbsweeprc.json";

/// Paths skipped by default: tool caches and generated localization code.
pub const GENERATED_FILE_PATTERNS: &[&str] = &[
    "**/.dart_tool/**",
    "**/generated/**",
    "**/*.g.dart",
    "**/app_localizations*",
];

/// Usage templates for the full analysis run by `clean`.
pub const DEFAULT_USAGE_PATTERNS: &[&str] = &[
    // member access
    r"\bl10n\.{key}\b",
    r"\bAppLocalizations\.of\(context\)\.{key}\b",
    r"\bcontext\.l10n\.{key}\b",
    // bracket access
    r"l10n\['{key}'\]",
    r#"l10n\["{key}"\]"#,
    // dictionary literals
    r"'{key}':\s*",
    r#""{key}":\s*"#,
    // planned usages left in comments
    r"//.*\bl10n\.{key}\b",
    r"/\*.*\bl10n\.{key}\b.*\*/",
];

/// Usage templates for the quick `check` pass.
pub const DEFAULT_QUICK_PATTERNS: &[&str] = &[
    r"\bl10n\.{key}\b",
    r"\bAppLocalizations\.of\(context\)\.{key}\b",
];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_l10n_dir")]
    pub l10n_dir: String,
    /// Explicit locale → file mapping. Empty means discover `*.arb` in `l10nDir`.
    #[serde(default)]
    pub locales: BTreeMap<String, String>,
    #[serde(default = "default_master_locale")]
    pub master_locale: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_usage_patterns")]
    pub usage_patterns: Vec<String>,
    #[serde(default = "default_quick_patterns")]
    pub quick_patterns: Vec<String>,
    #[serde(default = "default_output_dir")]
    pub report_dir: String,
    #[serde(default = "default_output_dir")]
    pub backup_dir: String,
}

fn default_source_root() -> String {
    "lib".to_string()
}

fn default_l10n_dir() -> String {
    "lib/l10n".to_string()
}

fn default_master_locale() -> String {
    "en".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["dart".to_string()]
}

fn default_ignores() -> Vec<String> {
    GENERATED_FILE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

fn default_usage_patterns() -> Vec<String> {
    DEFAULT_USAGE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

fn default_quick_patterns() -> Vec<String> {
    DEFAULT_QUICK_PATTERNS.iter().map(|p| p.to_string()).collect()
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            l10n_dir: default_l10n_dir(),
            locales: BTreeMap::new(),
            master_locale: default_master_locale(),
            extensions: default_extensions(),
            ignores: default_ignores(),
            usage_patterns: default_usage_patterns(),
            quick_patterns: default_quick_patterns(),
            report_dir: default_output_dir(),
            backup_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if an ignore glob is invalid, if a usage template lacks
    /// the `{key}` placeholder or does not compile, or if the master locale
    /// is missing from an explicit `locales` mapping.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        validate_templates("usagePatterns", &self.usage_patterns)?;
        validate_templates("quickPatterns", &self.quick_patterns)?;

        if !self.locales.is_empty() && !self.locales.contains_key(&self.master_locale) {
            bail!(
                "Master locale '{}' is not listed in 'locales'.\n\
                 Hint: add it to 'locales' or change 'masterLocale'.",
                self.master_locale
            );
        }

        Ok(())
    }
}

fn validate_templates(field: &str, templates: &[String]) -> Result<()> {
    if templates.is_empty() {
        bail!("'{}' must contain at least one pattern", field);
    }
    for template in templates {
        if !template.contains(KEY_PLACEHOLDER) {
            bail!(
                "Pattern in '{}' has no {} placeholder: \"{}\"",
                field,
                KEY_PLACEHOLDER,
                template
            );
        }
    }
    PatternSet::compile("sampleKey", templates)
        .with_context(|| format!("Invalid regex in '{}'", field))?;
    Ok(())
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory holding the config file, or the start directory when using defaults.
    /// Relative paths in the config resolve against it.
    pub root_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let root_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                root_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
