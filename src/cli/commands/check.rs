use anyhow::Result;

use super::{CheckSummary, CommandResult, CommandSummary, KeyCheck};
use crate::cli::{args::CheckCommand, report};
use crate::core::{ProjectContext, classifier::classify_keys};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.args.common)?;
    run_check(&ctx, cmd.args.strict)
}

/// Match every master key against the quick pattern set.
///
/// A key counts as used when any line matches, comment or not.
pub fn run_check(ctx: &ProjectContext, strict: bool) -> Result<CommandResult> {
    let loaded = ctx.load_resources()?;
    let master_locale = &ctx.config.master_locale;

    // Only the master locale matters here.
    let load_warnings: Vec<_> = loaded
        .warnings
        .into_iter()
        .filter(|w| &w.locale == master_locale)
        .collect();
    report::print_load_warnings(&load_warnings);

    let master = loaded.resources.require_master()?;
    let scan = ctx.scan_sources();
    let records = classify_keys(master.keys(), &ctx.config.quick_patterns, &scan.files)?;

    let keys: Vec<KeyCheck> = records
        .into_iter()
        .map(|record| KeyCheck {
            value: master.value(&record.key).unwrap_or_default(),
            first_usage: record.occurrences.into_iter().next(),
            key: record.key,
        })
        .collect();

    let summary = CheckSummary {
        master_locale: master_locale.clone(),
        keys,
        source_files_checked: scan.files.len(),
        strict,
    };

    Ok(CommandResult {
        error_count: summary.unused_count(),
        exit_on_errors: strict,
        summary: CommandSummary::Check(summary),
        load_warnings,
    })
}
