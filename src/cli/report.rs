//! Console output for commands.
//!
//! Separate from core logic to allow arbsweep to be used as a library.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::commands::{
    CancelPoint, CheckSummary, CleanOutcome, CleanSummary, CommandResult, CommandSummary,
    InitSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{
    Analysis, Classification, RemovalMode, RemovalReport, ResourceSet,
    mutation::RemovalOutcome,
    resources::LoadWarning,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Display width of translated values in console previews.
pub const MAX_VALUE_WIDTH: usize = 60;

/// Unused keys shown before the strategy menu.
pub const MAX_SAMPLE_KEYS: usize = 10;

/// Keys listed before the typed confirmation.
pub const MAX_CONFIRM_KEYS: usize = 20;

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Check(summary) => print_check(summary, verbose),
        CommandSummary::Clean(summary) => print_clean(summary),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

/// Cut `value` to at most `max_width` display columns, marking the cut with `...`.
pub fn truncate_to_width(value: &str, max_width: usize) -> String {
    let single_line = value.replace('\n', "\\n");
    if UnicodeWidthStr::width(single_line.as_str()) <= max_width {
        return single_line;
    }

    let budget = max_width.saturating_sub(3);
    let mut width = 0;
    let mut out = String::new();
    for ch in single_line.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}

/// Print locale files that could not be loaded.
pub fn print_load_warnings(warnings: &[LoadWarning]) {
    print_load_warnings_to(warnings, &mut io::stderr().lock());
}

pub fn print_load_warnings_to<W: Write>(warnings: &[LoadWarning], writer: &mut W) {
    for warning in warnings {
        let _ = writeln!(
            writer,
            "{} Skipping locale '{}' ({}): {}",
            "warning:".bold().yellow(),
            warning.locale,
            warning.file_path,
            warning.error
        );
    }
}

/// Print one line per loaded locale, master first.
pub fn print_loaded_locales(resources: &ResourceSet) {
    let master = resources.master().into_iter();
    for resource in master.chain(resources.others()) {
        let tag = if resource.locale == resources.master_locale {
            " (master)".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "{} Loaded {}{}: {} {}",
            SUCCESS_MARK.green(),
            resource.locale.bold(),
            tag,
            resource.len(),
            plural(resource.len(), "key", "keys")
        );
    }
}

pub fn print_analysis_summary(analysis: &Analysis) {
    println!();
    println!("{}", "Analysis summary".bold());
    println!(
        "  Checked {} source {}",
        analysis.source_files_checked,
        plural(analysis.source_files_checked, "file", "files")
    );
    println!("  {:<14}{}", "Used:", analysis.count(Classification::Used));
    println!(
        "  {:<14}{}",
        "Comment only:",
        analysis.count(Classification::CommentOnly)
    );
    println!("  {:<14}{}", "Unused:", analysis.count(Classification::Unused));
}

pub fn print_report_written(path: &Path) {
    println!("{} Report written to {}", SUCCESS_MARK.green(), path.display());
}

/// Show up to [`MAX_SAMPLE_KEYS`] unused keys with their master value.
pub fn print_unused_sample(analysis: &Analysis, resources: &ResourceSet) {
    let unused = analysis.with_classification(Classification::Unused);
    if unused.is_empty() {
        return;
    }

    println!();
    println!("{}", "Sample of unused keys:".bold());
    for record in unused.iter().take(MAX_SAMPLE_KEYS) {
        let value = resources
            .master()
            .and_then(|m| m.value(&record.key))
            .unwrap_or_default();
        println!(
            "  - {}: \"{}\"",
            record.key.red(),
            truncate_to_width(&value, MAX_VALUE_WIDTH)
        );
    }
    if unused.len() > MAX_SAMPLE_KEYS {
        println!("  ... and {} more", unused.len() - MAX_SAMPLE_KEYS);
    }
}

pub fn print_strategy_menu(analysis: &Analysis) {
    let unused = analysis.count(Classification::Unused);
    let comment_only = analysis.count(Classification::CommentOnly);

    println!();
    println!("{}", "Cleanup strategy:".bold());
    println!("  1. Remove only unused keys ({})", unused);
    println!(
        "  2. Remove unused and comment-only keys ({})",
        unused + comment_only
    );
    println!("  3. Review the report manually first");
    println!("  4. Cancel");
}

/// List the keys about to be removed before the typed confirmation.
pub fn print_keys_to_remove(keys: &[String]) {
    println!();
    println!(
        "{} {} {} will be removed from every locale file:",
        "warning:".bold().yellow(),
        keys.len(),
        plural(keys.len(), "key", "keys")
    );
    for key in keys.iter().take(MAX_CONFIRM_KEYS) {
        println!("  - {}", key);
    }
    if keys.len() > MAX_CONFIRM_KEYS {
        println!("  ... and {} more", keys.len() - MAX_CONFIRM_KEYS);
    }
}

pub fn print_removal(report: &RemovalReport) {
    print_removal_to(report, &mut io::stdout().lock());
}

/// Print the per-locale outcome of a removal pass.
pub fn print_removal_to<W: Write>(report: &RemovalReport, writer: &mut W) {
    let verb = match report.mode {
        RemovalMode::DryRun => {
            let _ = writeln!(writer);
            let _ = writeln!(writer, "{}", "Dry run (no files changed):".bold());
            "Would remove"
        }
        RemovalMode::Apply => "Removed",
    };

    for locale in &report.locales {
        match &locale.outcome {
            RemovalOutcome::Removed {
                keys,
                metadata_removed,
            } => {
                let _ = writeln!(
                    writer,
                    "  {} {} {} and {} metadata {} from {} ({})",
                    verb,
                    keys.len(),
                    plural(keys.len(), "key", "keys"),
                    metadata_removed,
                    plural(*metadata_removed, "entry", "entries"),
                    locale.locale.bold(),
                    locale.path.display()
                );
            }
            RemovalOutcome::Failed { error } => {
                let _ = writeln!(
                    writer,
                    "  {} {} ({}): {}",
                    FAILURE_MARK.red(),
                    locale.locale.bold(),
                    locale.path.display(),
                    error
                );
            }
        }
    }
}

fn print_check(summary: &CheckSummary, verbose: bool) {
    for entry in &summary.keys {
        match &entry.first_usage {
            Some(usage) if verbose => println!(
                "{} {} {}",
                SUCCESS_MARK.green(),
                entry.key,
                format!("({}:{})", usage.file, usage.line).dimmed()
            ),
            Some(_) => println!("{} {}", SUCCESS_MARK.green(), entry.key),
            None => println!("{} {}", FAILURE_MARK.red(), entry.key.red()),
        }
    }

    let unused_count = summary.unused_count();
    println!();
    println!("{}", "Summary".bold());
    println!(
        "  Checked {} source {}",
        summary.source_files_checked,
        plural(summary.source_files_checked, "file", "files")
    );
    println!("  {:<8}{}", "Total:", summary.keys.len());
    println!("  {:<8}{}", "Used:", summary.keys.len() - unused_count);
    println!("  {:<8}{}", "Unused:", unused_count);

    if unused_count == 0 {
        println!();
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            "All translation keys are used".green()
        );
        return;
    }

    println!();
    println!(
        "{}",
        format!("Unused keys ({} values):", summary.master_locale).bold()
    );
    for entry in summary.unused() {
        println!(
            "  - {}: \"{}\"",
            entry.key.red(),
            truncate_to_width(&entry.value, MAX_VALUE_WIDTH)
        );
    }
    if !summary.strict {
        println!();
        println!(
            "Run {} for a full analysis and cleanup",
            "arbsweep clean".cyan()
        );
    }
}

fn print_clean(summary: &CleanSummary) {
    match &summary.outcome {
        CleanOutcome::NothingToClean => {
            println!();
            println!(
                "{} {}",
                SUCCESS_MARK.green(),
                "No unused keys - nothing to clean".green()
            );
        }
        CleanOutcome::NoKeysSelected => {
            println!();
            println!("No keys match the selected strategy - nothing to remove");
        }
        CleanOutcome::ManualReview => {
            println!();
            println!("Review the report: {}", summary.report_path.display());
            println!(
                "Then list the keys to remove (one per line) and run: {}",
                "arbsweep clean --keys-file <file>".cyan()
            );
        }
        CleanOutcome::Cancelled(point) => {
            let stage = match point {
                CancelPoint::Proceed => "before backup",
                CancelPoint::Strategy => "at strategy selection",
                CancelPoint::Confirmation => "at confirmation",
                CancelPoint::FinalConfirmation => "after dry run",
            };
            println!();
            println!("Cleanup cancelled {}. No files were changed.", stage);
        }
        CleanOutcome::Applied(report) => {
            print_removal(report);
            let files_changed = report.files_changed();
            println!();
            println!(
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Removed {} {} across {} locale {}",
                    report.total_removed(),
                    plural(report.total_removed(), "entry", "entries"),
                    files_changed,
                    plural(files_changed, "file", "files")
                )
                .green()
            );
            let failures = report.failures().count();
            if failures > 0 {
                println!(
                    "{} {} locale {} could not be updated",
                    FAILURE_MARK.red(),
                    failures,
                    plural(failures, "file", "files")
                );
            }
        }
    }

    if let Some(backup_dir) = &summary.backup_dir {
        println!("  Backup: {}", backup_dir.display());
    }
    println!("  Report: {}", summary.report_path.display());

    if let (CleanOutcome::Applied(_), Some(backup_dir)) = (&summary.outcome, &summary.backup_dir) {
        println!();
        println!("Next steps:");
        println!("  1. Regenerate localizations: {}", "flutter gen-l10n".cyan());
        println!("  2. Run your app and tests");
        println!(
            "  3. To restore: {}",
            format!(
                "cp {}/* {}/",
                backup_dir.display(),
                summary.l10n_dir.display()
            )
            .cyan()
        );
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!(
            "{} {} already exists",
            "error:".bold().red(),
            CONFIG_FILE_NAME
        );
    }
}
