use std::{
    collections::BTreeMap,
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use colored::Colorize;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        resources::{LoadResult, discover_locales, load_locales},
        scanner::{ScanResult, scan_source_files},
    },
};

/// Project settings shared by every command.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g. `--master-locale tr`)
/// 2. `.arbsweeprc.json` config file
/// 3. Built-in defaults
///
/// Relative paths resolve against the directory holding the config file,
/// or the working directory when there is none.
pub struct ProjectContext {
    pub config: Config,
    pub root_dir: PathBuf,
    pub verbose: bool,
}

impl ProjectContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read the current directory")?;
        Self::from_dir(&cwd, common_args)
    }

    pub fn from_dir(start_dir: &Path, common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let loaded = load_config(start_dir)?;

        if verbose && !loaded.from_file {
            eprintln!(
                "{} No {} found, using default configuration",
                "note:".bold().cyan(),
                CONFIG_FILE_NAME
            );
        }

        let mut config = loaded.config;

        if let Some(ref master_locale) = common_args.master_locale {
            config.master_locale = master_locale.clone();
        }
        if let Some(ref source_root) = common_args.source_root {
            config.source_root = source_root.to_string_lossy().to_string();
        }
        if let Some(ref l10n_dir) = common_args.l10n_dir {
            config.l10n_dir = l10n_dir.to_string_lossy().to_string();
        }

        Ok(Self {
            config,
            root_dir: loaded.root_dir,
            verbose,
        })
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root_dir.join(p.strip_prefix(".").unwrap_or(p))
        }
    }

    pub fn source_root(&self) -> PathBuf {
        self.resolve(&self.config.source_root)
    }

    pub fn l10n_dir(&self) -> PathBuf {
        self.resolve(&self.config.l10n_dir)
    }

    pub fn report_dir(&self) -> PathBuf {
        self.resolve(&self.config.report_dir)
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.resolve(&self.config.backup_dir)
    }

    /// Load every locale file (explicit `locales` or discovered in `l10nDir`).
    pub fn load_resources(&self) -> Result<LoadResult> {
        let master = &self.config.master_locale;
        if self.config.locales.is_empty() {
            discover_locales(&self.l10n_dir(), master)
        } else {
            let files: BTreeMap<String, PathBuf> = self
                .config
                .locales
                .iter()
                .map(|(locale, path)| (locale.clone(), self.resolve(path)))
                .collect();
            Ok(load_locales(&files, master))
        }
    }

    /// Read every source file under the source root.
    pub fn scan_sources(&self) -> ScanResult {
        let result = scan_source_files(
            &self.root_dir,
            &self.source_root(),
            &self.config.extensions,
            &self.config.ignores,
        );

        if self.verbose {
            for path in &result.skipped {
                eprintln!("{} Cannot read source file: {}", "warning:".bold().yellow(), path);
            }
            for pattern in &result.invalid_patterns {
                eprintln!(
                    "{} Invalid ignore pattern '{}'",
                    "warning:".bold().yellow(),
                    pattern
                );
            }
        }

        result
    }
}
