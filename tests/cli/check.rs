use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_check_lists_used_and_unused_keys() -> Result<()> {
    let test = CliTest::flutter_project()?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ greeting
    ✘ farewell
    ✓ draftTitle

    Summary
      Checked 1 source file
      Total:  3
      Used:   2
      Unused: 1

    Unused keys (en values):
      - farewell: "Goodbye"

    Run arbsweep clean for a full analysis and cleanup

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_never_modifies_files() -> Result<()> {
    let test = CliTest::flutter_project()?;

    test.check_command().output()?;

    assert_eq!(test.read_file("lib/l10n/app_en.arb")?, crate::EN_ARB);
    assert!(test.entries_with_prefix("l10n_analysis_")?.is_empty());
    assert!(test.entries_with_prefix("l10n_backup_")?.is_empty());

    Ok(())
}

#[test]
fn test_check_strict_fails_with_unused_keys() -> Result<()> {
    let test = CliTest::flutter_project()?;

    let output = test.check_command().arg("--strict").output()?;

    assert_eq!(output.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_check_strict_passes_when_all_keys_used() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file(
        "lib/home.dart",
        "l10n.greeting; l10n.farewell; AppLocalizations.of(context).draftTitle;\n",
    )?;

    let output = test.check_command().arg("--strict").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("All translation keys are used"));

    Ok(())
}

#[test]
fn test_check_ignores_generated_code() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file(
        "lib/generated/intl/messages.dart",
        "final a = l10n.farewell;\n",
    )?;
    test.write_file("lib/models/user.g.dart", "final b = l10n.farewell;\n")?;

    let output = test.check_command().arg("--strict").output()?;

    assert_eq!(output.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_check_missing_master_locale_is_an_error() -> Result<()> {
    let test = CliTest::flutter_project()?;

    let output = test
        .check_command()
        .args(["--master-locale", "de"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Master locale 'de'"), "stderr: {}", err);
    assert!(err.contains("Available locales: en, tr"), "stderr: {}", err);

    Ok(())
}

#[test]
fn test_check_with_custom_l10n_dir() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("assets/i18n/app_en.arb", r#"{"title": "Title"}"#)?;
    test.write_file("lib/main.dart", "Text(l10n.title);\n")?;

    let output = test
        .check_command()
        .args(["--l10n-dir", "assets/i18n", "--strict"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));

    Ok(())
}

#[test]
fn test_check_uses_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".arbsweeprc.json",
        r#"{ "sourceRoot": "app", "locales": { "en": "strings/en.arb" } }"#,
    )?;
    test.write_file("strings/en.arb", r#"{"title": "Title", "subtitle": "Sub"}"#)?;
    test.write_file("app/main.dart", "Text(l10n.title);\n")?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(out.contains("- subtitle: \"Sub\""), "stdout: {}", out);

    Ok(())
}

#[test]
fn test_check_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file(".arbsweeprc.json", r#"{ "quickPatterns": ["l10n\\.title"] }"#)?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(2));

    Ok(())
}
