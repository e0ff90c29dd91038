//! Whole-project usage analysis.

use anyhow::Result;

use crate::core::{
    classifier::{Classification, UsageRecord, classify_keys},
    resources::ResourceSet,
    scanner::SourceFile,
};

/// Which classifications a cleanup removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupStrategy {
    /// Only keys with no reference at all.
    UnusedOnly,
    /// Unused keys plus keys referenced only from comments.
    UnusedAndCommentOnly,
}

impl CleanupStrategy {
    pub fn includes(self, classification: Classification) -> bool {
        match self {
            CleanupStrategy::UnusedOnly => classification == Classification::Unused,
            CleanupStrategy::UnusedAndCommentOnly => classification != Classification::Used,
        }
    }
}

/// Usage records for every master key.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Records in master file order.
    pub records: Vec<UsageRecord>,
    pub source_files_checked: usize,
}

impl Analysis {
    /// Classify every key of the master locale.
    pub fn run(
        resources: &ResourceSet,
        files: &[SourceFile],
        templates: &[String],
    ) -> Result<Self> {
        let master = resources.require_master()?;
        let records = classify_keys(master.keys(), templates, files)?;
        Ok(Self {
            records,
            source_files_checked: files.len(),
        })
    }

    /// Records with the given classification, sorted by key.
    pub fn with_classification(&self, classification: Classification) -> Vec<&UsageRecord> {
        let mut records: Vec<&UsageRecord> = self
            .records
            .iter()
            .filter(|r| r.classification == classification)
            .collect();
        records.sort_by(|a, b| a.key.cmp(&b.key));
        records
    }

    pub fn count(&self, classification: Classification) -> usize {
        self.records
            .iter()
            .filter(|r| r.classification == classification)
            .count()
    }

    /// Keys a strategy would remove: unused keys first, then comment-only keys.
    pub fn keys_for(&self, strategy: CleanupStrategy) -> Vec<String> {
        [Classification::Unused, Classification::CommentOnly]
            .into_iter()
            .filter(|c| strategy.includes(*c))
            .flat_map(|c| self.with_classification(c))
            .map(|r| r.key.clone())
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.records.iter().all(UsageRecord::is_used)
    }
}
