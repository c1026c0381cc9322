// Drives the compiled binary without a terminal attached. Every path here
// must exit with status 0.

use std::fs;

use assert_cmd::Command;
use tempfile::TempDir;

fn gt(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gt").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_flag_prints_version() {
    let home = tempfile::tempdir().unwrap();
    let output = gt(&home).arg("--version").output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("1.0.0"));
}

#[test]
fn help_flag_lists_words_option() {
    let home = tempfile::tempdir().unwrap();
    let output = gt(&home).arg("--help").output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--words"));
}

#[test]
fn missing_corpus_is_reported_and_exits_cleanly() {
    let home = tempfile::tempdir().unwrap();
    let output = gt(&home)
        .args(["--corpus", "/definitely/not/here.lang"])
        .write_stdin("")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load dictionary"));
    // nothing was shown, so no terminal setup happened
    assert!(output.stdout.is_empty());
}

#[test]
fn non_tty_stdin_is_a_terminal_error() {
    let home = tempfile::tempdir().unwrap();
    let corpus = home.path().join("words.lang");
    fs::write(&corpus, "cat\ndog\n").unwrap();

    let output = gt(&home)
        .arg("--corpus")
        .arg(&corpus)
        .args(["--words=2", "--seed=1"])
        .write_stdin("cat dog")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("terminal attributes"));
    // the typed bytes never reached the session
    assert!(!String::from_utf8_lossy(&output.stdout).contains("WPM"));
}

#[test]
fn config_file_supplies_defaults() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join("config").join("gt");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.json"),
        r#"{ "number_of_words": 3, "corpus_path": "/also/not/here.lang" }"#,
    )
    .unwrap();

    let output = gt(&home).write_stdin("").output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("/also/not/here.lang"));
}
