//! Plain-text analysis report.

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use crate::core::{
    analysis::Analysis,
    classifier::{Classification, UsageRecord},
    resources::ResourceSet,
};

/// Prefix of report file names (`l10n_analysis_YYYYMMDD_HHMMSS.txt`).
pub const REPORT_FILE_PREFIX: &str = "l10n_analysis_";

/// Reference locations listed per comment-only key.
pub const MAX_COMMENT_LOCATIONS: usize = 3;

const RULE_WIDTH: usize = 80;

/// Timestamp used in report and backup names.
pub fn file_timestamp(time: &NaiveDateTime) -> String {
    time.format("%Y%m%d_%H%M%S").to_string()
}

pub fn report_file_name(time: &NaiveDateTime) -> String {
    format!("{}{}.txt", REPORT_FILE_PREFIX, file_timestamp(time))
}

/// Render the report text.
///
/// Unused keys list the value in every locale that has them, comment-only keys
/// list where they were seen, used keys only their usage count.
pub fn render_report(
    analysis: &Analysis,
    resources: &ResourceSet,
    generated: &NaiveDateTime,
) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(out, "L10N CLEANUP ANALYSIS REPORT");
    let _ = writeln!(out, "Generated: {}", generated.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "{}", heavy);

    let unused = analysis.with_classification(Classification::Unused);
    let _ = writeln!(out);
    let _ = writeln!(out, "UNUSED KEYS ({}):", unused.len());
    let _ = writeln!(out, "{}", light);
    for record in &unused {
        write_unused(&mut out, record, resources);
    }

    let comment_only = analysis.with_classification(Classification::CommentOnly);
    let _ = writeln!(out);
    let _ = writeln!(out, "COMMENT ONLY KEYS ({}):", comment_only.len());
    let _ = writeln!(out, "{}", light);
    for record in &comment_only {
        write_comment_only(&mut out, record, resources);
    }

    let used = analysis.with_classification(Classification::Used);
    let _ = writeln!(out);
    let _ = writeln!(out, "USED KEYS ({}):", used.len());
    let _ = writeln!(out, "{}", light);
    for record in &used {
        let count = record.occurrences.len();
        let _ = writeln!(
            out,
            "  {} ({} {})",
            record.key,
            count,
            if count == 1 { "usage" } else { "usages" }
        );
    }

    out
}

fn write_unused(out: &mut String, record: &UsageRecord, resources: &ResourceSet) {
    let key = resources.translation_key(&record.key);
    let master = &resources.master_locale;
    let _ = writeln!(out, "* {}", key.id);
    let _ = writeln!(
        out,
        "    {}: \"{}\"",
        master.to_uppercase(),
        key.values.get(master).map(String::as_str).unwrap_or_default()
    );
    for (locale, value) in key.values.iter().filter(|(locale, _)| *locale != master) {
        let _ = writeln!(out, "    {}: \"{}\"", locale.to_uppercase(), value);
    }
}

fn write_comment_only(out: &mut String, record: &UsageRecord, resources: &ResourceSet) {
    let _ = writeln!(out, "* {}", record.key);
    let value = resources
        .master()
        .and_then(|m| m.value(&record.key))
        .unwrap_or_default();
    let _ = writeln!(out, "    Value: \"{}\"", value);
    let _ = writeln!(out, "    Found in comments at:");
    for occurrence in record.occurrences.iter().take(MAX_COMMENT_LOCATIONS) {
        let _ = writeln!(out, "      {}:{}", occurrence.file, occurrence.line);
    }
    let remaining = record.occurrences.len().saturating_sub(MAX_COMMENT_LOCATIONS);
    if remaining > 0 {
        let _ = writeln!(out, "      (and {} more)", remaining);
    }
}

/// Write the report into `dir` and return its path.
pub fn write_report(
    dir: &Path,
    analysis: &Analysis,
    resources: &ResourceSet,
    generated: &NaiveDateTime,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory: {}", dir.display()))?;
    let path = dir.join(report_file_name(generated));
    fs::write(&path, render_report(analysis, resources, generated))
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(path)
}
