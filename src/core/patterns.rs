//! Usage pattern templates.
//!
//! A template is a regular expression with a `{key}` placeholder. Compiling a
//! template for a key substitutes the regex-escaped key, so keys are always
//! matched literally.

use anyhow::{Context, Result};
use regex::Regex;

/// Placeholder substituted with the escaped translation key.
pub const KEY_PLACEHOLDER: &str = "{key}";

/// Patterns compiled for a single translation key.
#[derive(Debug, Clone)]
pub struct PatternSet {
    key: String,
    regexes: Vec<Regex>,
}

impl PatternSet {
    pub fn compile(key: &str, templates: &[String]) -> Result<Self> {
        let escaped = regex::escape(key);
        let regexes = templates
            .iter()
            .map(|template| {
                let source = template.replace(KEY_PLACEHOLDER, &escaped);
                Regex::new(&source)
                    .with_context(|| format!("Invalid usage pattern: \"{}\"", template))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            key: key.to_string(),
            regexes,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Byte offsets of every pattern match in `line`.
    ///
    /// Every template embeds the key literally, so lines without the key are
    /// rejected before running any regex.
    pub fn match_offsets(&self, line: &str) -> Vec<usize> {
        if !line.contains(&self.key) {
            return Vec::new();
        }
        self.regexes
            .iter()
            .flat_map(|re| re.find_iter(line).map(|m| m.start()))
            .collect()
    }
}
