use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, EN_ARB, TR_ARB, stderr, stdout};

fn parse(content: &str) -> Result<Value> {
    Ok(serde_json::from_str(content)?)
}

#[test]
fn test_clean_removes_unused_keys_from_every_locale() -> Result<()> {
    let test = CliTest::flutter_project()?;

    let output = test.run_with_input(test.clean_command(), "y\n1\nDELETE\ny\n")?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));

    for path in ["lib/l10n/app_en.arb", "lib/l10n/app_tr.arb"] {
        let arb = parse(&test.read_file(path)?)?;
        assert!(arb.get("farewell").is_none(), "{} still has farewell", path);
        assert!(arb.get("@farewell").is_none(), "{} still has @farewell", path);
        assert!(arb.get("greeting").is_some());
        assert!(arb.get("draftTitle").is_some());
    }

    let en = test.read_file("lib/l10n/app_en.arb")?;
    assert!(en.contains("\"greeting\": \"Hello {name}\""));
    assert!(en.contains("\"@greeting\""));
    let tr = test.read_file("lib/l10n/app_tr.arb")?;
    assert!(tr.contains("\"greeting\": \"Merhaba {name}\""));

    let out = stdout(&output);
    assert!(out.contains("Would remove 1 key and 1 metadata entry from en"), "stdout: {}", out);
    assert!(out.contains("Removed 1 key and 0 metadata entries from tr"), "stdout: {}", out);
    assert!(out.contains("To restore: cp "), "stdout: {}", out);

    Ok(())
}

#[test]
fn test_clean_backs_up_original_files() -> Result<()> {
    let test = CliTest::flutter_project()?;

    test.run_with_input(test.clean_command(), "y\n2\nDELETE\ny\n")?;

    let backups = test.entries_with_prefix("l10n_backup_")?;
    assert_eq!(backups.len(), 1);
    assert_eq!(std::fs::read_to_string(backups[0].join("app_en.arb"))?, EN_ARB);
    assert_eq!(std::fs::read_to_string(backups[0].join("app_tr.arb"))?, TR_ARB);

    let en = parse(&test.read_file("lib/l10n/app_en.arb")?)?;
    assert!(en.get("draftTitle").is_none());
    assert!(en.get("farewell").is_none());

    Ok(())
}

#[test]
fn test_clean_writes_report() -> Result<()> {
    let test = CliTest::flutter_project()?;

    test.run_with_input(test.clean_command(), "n\n")?;

    let reports = test.entries_with_prefix("l10n_analysis_")?;
    assert_eq!(reports.len(), 1);
    let report = std::fs::read_to_string(&reports[0])?;
    assert!(report.contains("UNUSED KEYS (1):"));
    assert!(report.contains("COMMENT ONLY KEYS (1):"));
    assert!(report.contains("USED KEYS (1):"));
    assert!(report.contains("* farewell"));
    assert!(report.contains("lib/home.dart:6"), "report: {}", report);

    Ok(())
}

#[test]
fn test_clean_cancel_at_first_prompt_changes_nothing() -> Result<()> {
    let test = CliTest::flutter_project()?;

    let output = test.run_with_input(test.clean_command(), "n\n")?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Cleanup cancelled"));
    assert!(test.entries_with_prefix("l10n_backup_")?.is_empty());
    assert_eq!(test.read_file("lib/l10n/app_en.arb")?, EN_ARB);

    Ok(())
}

#[test]
fn test_clean_wrong_confirmation_changes_nothing() -> Result<()> {
    let test = CliTest::flutter_project()?;

    let output = test.run_with_input(test.clean_command(), "y\n1\nyes\n")?;

    assert!(output.status.success());
    assert_eq!(test.read_file("lib/l10n/app_en.arb")?, EN_ARB);
    assert_eq!(test.read_file("lib/l10n/app_tr.arb")?, TR_ARB);

    Ok(())
}

#[test]
fn test_clean_declined_after_dry_run_changes_nothing() -> Result<()> {
    let test = CliTest::flutter_project()?;

    let root = regex::escape(&test.root().display().to_string());
    let mut cmd = test.clean_command();

    insta::with_settings!({filters => vec![
        (root.as_str(), "[ROOT]"),
        (r"\d{8}_\d{6}", "[TIMESTAMP]"),
        // Unanswered prompts leave a trailing space.
        (r"(?m)[ \t]+$", ""),
    ]}, {
        assert_cmd_snapshot!(cmd.pass_stdin("y\n1\nDELETE\nn\n"), @r#"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ Loaded en (master): 3 keys
        ✓ Loaded tr: 3 keys

        Analysis summary
          Checked 1 source file
          Used:         1
          Comment only: 1
          Unused:       1
        ✓ Report written to [ROOT]/l10n_analysis_[TIMESTAMP].txt

        Sample of unused keys:
          - farewell: "Goodbye"

        Do you want to proceed with cleanup? (y/n): ✓ Backed up 2 locale files to [ROOT]/l10n_backup_[TIMESTAMP]

        Cleanup strategy:
          1. Remove only unused keys (1)
          2. Remove unused and comment-only keys (2)
          3. Review the report manually first
          4. Cancel
        Select option (1-4):
        warning: 1 key will be removed from every locale file:
          - farewell
        Type 'DELETE' to confirm:
        Dry run (no files changed):
          Would remove 1 key and 1 metadata entry from en ([ROOT]/lib/l10n/app_en.arb)
          Would remove 1 key and 0 metadata entries from tr ([ROOT]/lib/l10n/app_tr.arb)

        Proceed with actual cleanup? (y/n):
        Cleanup cancelled after dry run. No files were changed.
          Backup: [ROOT]/l10n_backup_[TIMESTAMP]
          Report: [ROOT]/l10n_analysis_[TIMESTAMP].txt

        ----- stderr -----
        "#);
    });

    assert_eq!(test.read_file("lib/l10n/app_en.arb")?, EN_ARB);
    assert_eq!(test.read_file("lib/l10n/app_tr.arb")?, TR_ARB);

    Ok(())
}

#[test]
fn test_clean_closed_stdin_cancels() -> Result<()> {
    let test = CliTest::flutter_project()?;

    let output = test.run_with_input(test.clean_command(), "")?;

    assert!(output.status.success());
    assert_eq!(test.read_file("lib/l10n/app_en.arb")?, EN_ARB);

    Ok(())
}

#[test]
fn test_clean_manual_review_prints_rerun_hint() -> Result<()> {
    let test = CliTest::flutter_project()?;

    let output = test.run_with_input(test.clean_command(), "y\n3\n")?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("--keys-file"));
    assert_eq!(test.read_file("lib/l10n/app_en.arb")?, EN_ARB);

    Ok(())
}

#[test]
fn test_clean_with_keys_file() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file("keys.txt", "# keys to drop\ndraftTitle\nnotAKey\n")?;

    let mut cmd = test.clean_command();
    cmd.args(["--keys-file", "keys.txt"]);
    let output = test.run_with_input(cmd, "y\nDELETE\ny\n")?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("'notAKey' is not a key"));

    let tr = parse(&test.read_file("lib/l10n/app_tr.arb")?)?;
    assert!(tr.get("draftTitle").is_none());
    assert!(tr.get("farewell").is_some());

    Ok(())
}

#[test]
fn test_clean_skips_malformed_locale() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file("lib/l10n/app_ru.arb", "{ not json")?;

    let output = test.run_with_input(test.clean_command(), "y\n1\nDELETE\ny\n")?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Skipping locale 'ru'"));
    assert_eq!(test.read_file("lib/l10n/app_ru.arb")?, "{ not json");
    let tr = parse(&test.read_file("lib/l10n/app_tr.arb")?)?;
    assert!(tr.get("farewell").is_none());

    Ok(())
}

#[test]
fn test_clean_nothing_to_do() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file(
        "lib/home.dart",
        "Text(l10n.greeting); Text(l10n.farewell); Text(l10n.draftTitle);\n",
    )?;

    let output = test.run_with_input(test.clean_command(), "")?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("nothing to clean"));
    assert!(test.entries_with_prefix("l10n_backup_")?.is_empty());

    Ok(())
}
