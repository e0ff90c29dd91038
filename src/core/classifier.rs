//! Key usage classification.
//!
//! Every master key is matched line by line against the compiled usage
//! patterns. The matches decide the classification:
//!
//! - no match anywhere → [`Classification::Unused`]
//! - every match sits in a comment → [`Classification::CommentOnly`]
//! - at least one match in code → [`Classification::Used`]
//!
//! Matching is textual, so a dictionary literal that happens to share a key's
//! name counts as a usage, and keys built at runtime are not seen at all.

use std::fmt;

use anyhow::Result;

use crate::core::{comments::is_comment_at, patterns::PatternSet, scanner::SourceFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Classification {
    Used,
    CommentOnly,
    Unused,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Used => write!(f, "USED"),
            Classification::CommentOnly => write!(f, "COMMENT_ONLY"),
            Classification::Unused => write!(f, "UNUSED"),
        }
    }
}

/// One source line referencing a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub file: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// The trimmed source line.
    pub snippet: String,
    pub is_comment: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub key: String,
    pub classification: Classification,
    pub occurrences: Vec<Occurrence>,
}

impl UsageRecord {
    pub fn from_occurrences(key: impl Into<String>, occurrences: Vec<Occurrence>) -> Self {
        let classification = if occurrences.is_empty() {
            Classification::Unused
        } else if occurrences.iter().all(|o| o.is_comment) {
            Classification::CommentOnly
        } else {
            Classification::Used
        };

        Self {
            key: key.into(),
            classification,
            occurrences,
        }
    }

    pub fn is_used(&self) -> bool {
        self.classification == Classification::Used
    }
}

/// Find every line in `files` that references the key of `patterns`.
pub fn find_occurrences(patterns: &PatternSet, files: &[SourceFile]) -> Vec<Occurrence> {
    let mut occurrences = Vec::new();

    for file in files {
        for (index, line) in file.lines.iter().enumerate() {
            let offsets = patterns.match_offsets(line);
            if !offsets.is_empty() {
                let state = file.line_states[index];
                let is_comment = offsets
                    .iter()
                    .all(|&offset| is_comment_at(line, offset, state));
                occurrences.push(Occurrence {
                    file: file.path.clone(),
                    line: index + 1,
                    snippet: line.trim().to_string(),
                    is_comment,
                });
            }
        }
    }

    occurrences
}

/// Classify one key against the source files.
pub fn classify_key(key: &str, templates: &[String], files: &[SourceFile]) -> Result<UsageRecord> {
    let patterns = PatternSet::compile(key, templates)?;
    Ok(UsageRecord::from_occurrences(
        key,
        find_occurrences(&patterns, files),
    ))
}

/// Classify keys in the given order.
pub fn classify_keys<'a>(
    keys: impl IntoIterator<Item = &'a str>,
    templates: &[String],
    files: &[SourceFile],
) -> Result<Vec<UsageRecord>> {
    keys.into_iter()
        .map(|key| classify_key(key, templates, files))
        .collect()
}
