//! Interactive cleanup workflow.
//!
//! ```text
//! load ─> analyze ─> report ─> proceed? ─> backup ─> strategy
//!   ─> DELETE ─> dry run ─> proceed? ─> apply
//! ```
//!
//! Any prompt answered with something other than the expected input (or end
//! of input) stops the workflow without touching the locale files.

use std::{collections::HashSet, fs, path::Path};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use colored::Colorize;

use super::{CancelPoint, CleanOutcome, CleanSummary, CommandResult, CommandSummary};
use crate::cli::{
    args::CleanCommand,
    prompt::{LinePrompt, Prompt},
    report::{self, SUCCESS_MARK},
};
use crate::core::{
    Analysis, Classification, CleanupStrategy, ProjectContext, RemovalMode, ResourceSet,
    backup::create_backup,
    mutation::remove_keys,
    report::write_report,
};

/// Literal the user must type before keys are removed.
const DELETE_CONFIRMATION: &str = "DELETE";

pub fn clean(cmd: CleanCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.args.common)?;
    let mut prompt = LinePrompt::stdio();
    run_clean(
        &ctx,
        cmd.args.keys_file.as_deref(),
        &mut prompt,
        Local::now().naive_local(),
    )
}

pub fn run_clean<P: Prompt>(
    ctx: &ProjectContext,
    keys_file: Option<&Path>,
    prompt: &mut P,
    now: NaiveDateTime,
) -> Result<CommandResult> {
    let loaded = ctx.load_resources()?;
    report::print_load_warnings(&loaded.warnings);
    let load_warnings = loaded.warnings;
    let resources = loaded.resources;
    resources.require_master()?;
    report::print_loaded_locales(&resources);

    let listed_keys = keys_file.map(read_keys_file).transpose()?;

    let scan = ctx.scan_sources();
    let analysis = Analysis::run(&resources, &scan.files, &ctx.config.usage_patterns)?;
    report::print_analysis_summary(&analysis);

    let report_path = write_report(&ctx.report_dir(), &analysis, &resources, &now)?;
    report::print_report_written(&report_path);

    let mut summary = CleanSummary {
        outcome: CleanOutcome::NothingToClean,
        report_path,
        backup_dir: None,
        l10n_dir: ctx.l10n_dir(),
    };
    let finish = |summary: CleanSummary, error_count: usize| CommandResult {
        summary: CommandSummary::Clean(summary),
        error_count,
        exit_on_errors: true,
        load_warnings: load_warnings.clone(),
    };

    let listed_keys = match listed_keys {
        Some(keys) => {
            let keys = select_listed_keys(keys, &resources, &analysis);
            if keys.is_empty() {
                summary.outcome = CleanOutcome::NoKeysSelected;
                return Ok(finish(summary, 0));
            }
            println!();
            println!("Selected {} key(s) from the keys file", keys.len());
            Some(keys)
        }
        None => {
            if analysis.is_clean() {
                return Ok(finish(summary, 0));
            }
            report::print_unused_sample(&analysis, &resources);
            None
        }
    };

    println!();
    if !prompt.confirm("Do you want to proceed with cleanup?")? {
        summary.outcome = CleanOutcome::Cancelled(CancelPoint::Proceed);
        return Ok(finish(summary, 0));
    }

    let files = resources.files();
    let backup = create_backup(&ctx.backup_dir(), &files, &now)
        .context("Backup failed, cleanup aborted before any change")?;
    println!(
        "{} Backed up {} locale {} to {}",
        SUCCESS_MARK.green(),
        backup.entries.len(),
        if backup.entries.len() == 1 { "file" } else { "files" },
        backup.dir.display()
    );
    for locale in &backup.missing {
        eprintln!(
            "{} File for locale '{}' no longer exists, not backed up",
            "warning:".bold().yellow(),
            locale
        );
    }
    summary.backup_dir = Some(backup.dir);

    let keys = match listed_keys {
        Some(keys) => keys,
        None => {
            report::print_strategy_menu(&analysis);
            let strategy = match prompt.ask("Select option (1-4): ")?.as_deref() {
                Some("1") => CleanupStrategy::UnusedOnly,
                Some("2") => CleanupStrategy::UnusedAndCommentOnly,
                Some("3") => {
                    summary.outcome = CleanOutcome::ManualReview;
                    return Ok(finish(summary, 0));
                }
                _ => {
                    summary.outcome = CleanOutcome::Cancelled(CancelPoint::Strategy);
                    return Ok(finish(summary, 0));
                }
            };
            analysis.keys_for(strategy)
        }
    };

    if keys.is_empty() {
        summary.outcome = CleanOutcome::NoKeysSelected;
        return Ok(finish(summary, 0));
    }

    report::print_keys_to_remove(&keys);
    let typed = prompt.ask(&format!("Type '{}' to confirm: ", DELETE_CONFIRMATION))?;
    if typed.as_deref() != Some(DELETE_CONFIRMATION) {
        summary.outcome = CleanOutcome::Cancelled(CancelPoint::Confirmation);
        return Ok(finish(summary, 0));
    }

    let dry_run = remove_keys(&files, &keys, RemovalMode::DryRun);
    report::print_removal(&dry_run);

    println!();
    if !prompt.confirm("Proceed with actual cleanup?")? {
        summary.outcome = CleanOutcome::Cancelled(CancelPoint::FinalConfirmation);
        return Ok(finish(summary, 0));
    }

    let applied = remove_keys(&files, &keys, RemovalMode::Apply);
    let failures = applied.failures().count();
    summary.outcome = CleanOutcome::Applied(applied);
    Ok(finish(summary, failures))
}

/// Read a key list: one key per line, blank lines and `#` comments ignored.
fn read_keys_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read keys file: {}", path.display()))?;
    Ok(parse_key_list(&content))
}

fn parse_key_list(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|key| seen.insert(key.to_string()))
        .map(str::to_string)
        .collect()
}

/// Keep the listed keys that exist in the master locale.
fn select_listed_keys(
    keys: Vec<String>,
    resources: &ResourceSet,
    analysis: &Analysis,
) -> Vec<String> {
    let Some(master) = resources.master() else {
        return Vec::new();
    };

    keys.into_iter()
        .filter(|key| {
            if !master.contains(key) {
                eprintln!(
                    "{} '{}' is not a key of locale '{}', skipping",
                    "warning:".bold().yellow(),
                    key,
                    resources.master_locale
                );
                return false;
            }
            let used = analysis
                .records
                .iter()
                .any(|r| &r.key == key && r.classification == Classification::Used);
            if used {
                eprintln!(
                    "{} '{}' is still referenced in source code",
                    "warning:".bold().yellow(),
                    key
                );
            }
            true
        })
        .collect()
}
