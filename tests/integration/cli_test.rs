//! CLI binary tests
//!
//! Every run points HOME at a temporary directory so the user's config
//! file never leaks into the results.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{sauce_record, with_sauce};

fn retroscope(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("retroscope").unwrap();
    cmd.env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &[u8]) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn render_text_prints_plain_rows() {
    let home = TempDir::new().unwrap();
    let file = write(&home, "box.ans", b"\x1b[1;36m\xc9\xcd\xbb\r\n\xc8\xcd\xbc");

    retroscope(home.path())
        .args(["render", &file, "--format", "text"])
        .assert()
        .success()
        .stdout("╔═╗\n╚═╝\n");
}

#[test]
fn render_ansi_emits_escape_sequences() {
    let home = TempDir::new().unwrap();
    let file = write(&home, "red.ans", b"\x1b[31mred");

    retroscope(home.path())
        .args(["render", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").and(predicate::str::contains("red")));
}

#[test]
fn render_multiple_files_keeps_order_with_headers() {
    let home = TempDir::new().unwrap();
    let first = write(&home, "one.txt", b"first");
    let second = write(&home, "two.txt", b"second");

    let output = retroscope(home.path())
        .args(["render", "-f", "text", &first, &second])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let one = stdout.find("one.txt <==").unwrap();
    let two = stdout.find("two.txt <==").unwrap();
    assert!(one < stdout.find("first").unwrap());
    assert!(stdout.find("first").unwrap() < two);
    assert!(two < stdout.find("second").unwrap());
}

#[test]
fn render_json_includes_sauce() {
    let home = TempDir::new().unwrap();
    let art = with_sauce(b"\x1b[32mhi", &[], sauce_record("Greeting", "Neo", "IBM VGA", 0));
    let file = write(&home, "hi.ans", &art);

    let output = retroscope(home.path())
        .args(["render", "--format", "json", &file])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["sauce"]["title"], "Greeting");
    assert_eq!(value["code_page"], "CP437");
    assert_eq!(value["rows"][0]["runs"][0]["text"], "hi");
}

#[test]
fn render_codepage_override() {
    let home = TempDir::new().unwrap();
    let file = write(&home, "deg.txt", &[0xB0]);

    retroscope(home.path())
        .args(["render", "-f", "text", "--codepage", "latin1", &file])
        .assert()
        .success()
        .stdout("°\n");
}

#[test]
fn render_rejects_unknown_codepage() {
    let home = TempDir::new().unwrap();
    let file = write(&home, "a.txt", b"a");

    retroscope(home.path())
        .args(["render", "--codepage", "cp9999", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cp9999"));
}

#[test]
fn render_reports_missing_file_and_fails() {
    let home = TempDir::new().unwrap();
    let good = write(&home, "good.txt", b"fine");
    let missing = home.path().join("missing.ans");

    retroscope(home.path())
        .args(["render", "-f", "text", &good])
        .arg(&missing)
        .assert()
        .failure()
        .stdout(predicate::str::contains("fine"))
        .stderr(predicate::str::contains("missing.ans"))
        .stderr(predicate::str::contains("1 of 2 files failed"));
}

#[test]
fn render_warns_about_unsupported_charset() {
    let home = TempDir::new().unwrap();
    let file = write(&home, "a.txt", b"plain");

    retroscope(home.path())
        .args(["render", "-f", "text", "--charset", "x-klingon", &file])
        .assert()
        .success()
        .stdout("plain\n")
        .stderr(predicate::str::contains("x-klingon"));
}

#[test]
fn config_width_applies_to_render() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config").join("retroscope");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[render]\nline_width = 3\n\n[output]\nformat = \"text\"\n",
    )
    .unwrap();
    let file = write(&home, "long.txt", b"abcdef");

    retroscope(home.path())
        .args(["render", &file])
        .assert()
        .success()
        .stdout("abc\ndef\n");
}

#[test]
fn info_shows_sauce_and_guess() {
    let home = TempDir::new().unwrap();
    let art = with_sauce(
        b"\xdb\xdb",
        &["made for the 1994 compo"],
        sauce_record("Blocks", "Ansi Artist", "IBM VGA", 1),
    );
    let file = write(&home, "blocks.ans", &art);

    retroscope(home.path())
        .args(["info", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title:     Blocks"))
        .stdout(predicate::str::contains("Author:    Ansi Artist"))
        .stdout(predicate::str::contains("Date:      1994-03-15"))
        .stdout(predicate::str::contains("Size:      4 KiB"))
        .stdout(predicate::str::contains("made for the 1994 compo"))
        .stdout(predicate::str::contains("Code page:   CP437"));
}

#[test]
fn codepages_lists_every_page() {
    let home = TempDir::new().unwrap();
    retroscope(home.path())
        .arg("codepages")
        .assert()
        .success()
        .stdout(predicate::str::contains("CP437"))
        .stdout(predicate::str::contains("Windows-1252"))
        .stdout(predicate::str::contains("macroman"));
}

#[test]
fn config_init_then_show() {
    let home = TempDir::new().unwrap();

    retroscope(home.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(home
        .path()
        .join(".config/retroscope/config.toml")
        .exists());

    retroscope(home.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    retroscope(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("line_width = 80"))
        .stdout(predicate::str::contains("format = \"ansi\""));
}

#[test]
fn completions_for_zsh() {
    let home = TempDir::new().unwrap();
    retroscope(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef retroscope"));
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    retroscope(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("codepages"));
}
