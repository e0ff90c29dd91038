use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod clean;
mod init;

const BIN_NAME: &str = "arbsweep";

pub const EN_ARB: &str = r#"{
  "@@locale": "en",
  "greeting": "Hello {name}",
  "@greeting": {
    "placeholders": {
      "name": {}
    }
  },
  "farewell": "Goodbye",
  "@farewell": {
    "description": "Shown on logout"
  },
  "draftTitle": "Draft"
}
"#;

pub const TR_ARB: &str = r#"{
  "@@locale": "tr",
  "greeting": "Merhaba {name}",
  "farewell": "Hoşçakal",
  "draftTitle": "Taslak"
}
"#;

pub const HOME_DART: &str = r#"import 'package:flutter/widgets.dart';

class Home extends StatelessWidget {
  @override
  Widget build(BuildContext context) {
    // TODO: show l10n.draftTitle once drafts ship
    return Text(l10n.greeting('Ada'));
  }
}
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A Flutter-style project with `en` and `tr` locales where `greeting` is
    /// used, `draftTitle` is only mentioned in a comment and `farewell` is unused.
    pub fn flutter_project() -> Result<Self> {
        let test = Self::new()?;
        test.write_file("lib/l10n/app_en.arb", EN_ARB)?;
        test.write_file("lib/l10n/app_tr.arb", TR_ARB)?;
        test.write_file("lib/home.dart", HOME_DART)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn clean_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("clean");
        cmd
    }

    /// Run `cmd` with `answers` piped to stdin.
    pub fn run_with_input(&self, mut cmd: Command, answers: &str) -> Result<Output> {
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn arbsweep")?;

        if let Some(mut stdin) = child.stdin.take() {
            // The process may exit before reading every answer.
            stdin.write_all(answers.as_bytes()).ok();
        }

        child.wait_with_output().context("Failed to wait for arbsweep")
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    /// Entries of the project root whose name starts with `prefix`.
    pub fn entries_with_prefix(&self, prefix: &str) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.project_dir)? {
            let path = entry?.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(prefix));
            if matches {
                entries.push(path);
            }
        }
        entries.sort();
        Ok(entries)
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
