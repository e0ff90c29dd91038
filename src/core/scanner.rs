use std::{
    fs,
    path::{Path, PathBuf},
};

use glob::Pattern;
use walkdir::WalkDir;

use crate::core::comments::{LexState, line_states};

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal path prefixes.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// A source file read into memory, split into lines.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the project root when it lies inside it.
    pub path: String,
    pub lines: Vec<String>,
    /// Comment and string state at the start of each line.
    pub line_states: Vec<LexState>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: &str) -> Self {
        let lines: Vec<String> = content.lines().map(str::to_string).collect();
        Self {
            path: path.into(),
            line_states: line_states(&lines),
            lines,
        }
    }
}

/// Result of scanning the source tree.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: Vec<SourceFile>,
    /// Files or directories that could not be read (e.g. not UTF-8, no permission).
    pub skipped: Vec<String>,
    /// Ignore patterns that failed to compile.
    pub invalid_patterns: Vec<String>,
}

/// Walk `source_root` and read every file with a matching extension.
///
/// `ignores` holds glob patterns matched against the whole path, or literal
/// paths (relative to `base_dir`) matched as prefixes.
pub fn scan_source_files(
    base_dir: &Path,
    source_root: &Path,
    extensions: &[String],
    ignores: &[String],
) -> ScanResult {
    let mut result = ScanResult::default();

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(_) => result.invalid_patterns.push(p.clone()),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    let walker = WalkDir::new(source_root).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped.push(
                    e.path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| e.to_string()),
                );
                continue;
            }
        };
        let path = entry.path();
        let path_str = path.to_string_lossy();

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }

        if !entry.file_type().is_file() || !has_extension(path, extensions) {
            continue;
        }

        let display = path
            .strip_prefix(base_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();
        match fs::read_to_string(path) {
            Ok(content) => result.files.push(SourceFile::new(display, &content)),
            Err(_) => result.skipped.push(display),
        }
    }

    result
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
