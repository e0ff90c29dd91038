//! Line-based interactive prompts.

use std::io::{self, BufRead, Stdout, StdinLock, Write};

use anyhow::{Context, Result};

/// Source of answers for the interactive cleanup workflow.
pub trait Prompt {
    /// Show `question` and read one line. `None` means end of input.
    fn ask(&mut self, question: &str) -> Result<Option<String>>;

    /// Yes/no question. Only `y` or `yes` (any case) counts as yes.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} (y/n): ", question))?;
        Ok(answer.is_some_and(|a| matches!(a.to_lowercase().as_str(), "y" | "yes")))
    }
}

/// Prompt reading answers from a [`BufRead`] and writing questions to a [`Write`].
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl LinePrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.writer, "{}", question).context("Failed to write prompt")?;
        self.writer.flush().context("Failed to write prompt")?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read answer")?;
        if read == 0 {
            writeln!(self.writer).ok();
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
