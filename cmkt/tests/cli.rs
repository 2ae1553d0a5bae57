//! CLI E2E Tests
//!
//! Runs the cmkt binary against files in a temporary directory. Every test
//! writes an empty `cmkt.toml` into that directory so a user configuration
//! never leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get the path to the cmkt binary
fn cmkt_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cmkt"))
}

/// Fresh workspace with an empty configuration file.
fn workspace() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    std::fs::write(temp_dir.path().join("cmkt.toml"), "").expect("Failed to write config");
    temp_dir
}

fn cmkt(dir: &Path) -> Command {
    let mut cmd = Command::new(cmkt_bin());
    cmd.current_dir(dir)
        .env_remove("CMKT_VERBOSE")
        .env_remove("CMKT_CONFIG")
        .env_remove("CMKT_NO_COLOR")
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

#[test]
fn test_cli_help() {
    let temp_dir = workspace();
    cmkt(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("highlight").and(predicate::str::contains("tokens")));
}

#[test]
fn test_cli_version() {
    let temp_dir = workspace();
    cmkt(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cmkt"));
}

#[test]
fn test_detect() {
    let temp_dir = workspace();
    cmkt(temp_dir.path())
        .args(["detect", "CMakeLists.txt", "cmake/Utils.CMAKE", "main.rs"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("CMakeLists.txt\tcmake\n")
                .and(predicate::str::contains("cmake/Utils.CMAKE\tcmake\n"))
                .and(predicate::str::contains("main.rs\t-\n")),
        );
}

#[test]
fn test_highlight_plain_reproduces_source() {
    let temp_dir = workspace();
    let source = "project(demo)\n# [[not a bracket\nset(SRCS a.cpp \"b c\")\n";
    write(temp_dir.path(), "CMakeLists.txt", source);

    cmkt(temp_dir.path())
        .args(["--no-color", "highlight", "CMakeLists.txt"])
        .assert()
        .success()
        .stdout(source);
}

#[test]
fn test_highlight_ansi_uses_config_theme() {
    let temp_dir = workspace();
    write(temp_dir.path(), "cmkt.toml", "[theme]\nkeyword = \"4\"\n");
    write(temp_dir.path(), "CMakeLists.txt", "set(X)\n");

    cmkt(temp_dir.path())
        .args(["highlight", "CMakeLists.txt"])
        .assert()
        .success()
        .stdout("\x1b[4mset\x1b[0m(X)\n");
}

#[test]
fn test_highlight_html() {
    let temp_dir = workspace();
    write(temp_dir.path(), "CMakeLists.txt", "set(X <y>)\n");

    cmkt(temp_dir.path())
        .args(["highlight", "--html", "CMakeLists.txt"])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("<pre class=\"cm-s-default\">")
                .and(predicate::str::contains("<span class=\"cm-keyword\">set</span>"))
                .and(predicate::str::contains("&lt;y&gt;")),
        );
}

#[test]
fn test_highlight_multiple_files_have_headers() {
    let temp_dir = workspace();
    write(temp_dir.path(), "a.cmake", "set(A)\n");
    write(temp_dir.path(), "b.cmake", "set(B)\n");

    cmkt(temp_dir.path())
        .args(["--no-color", "highlight", "a.cmake", "b.cmake"])
        .assert()
        .success()
        .stdout("==> a.cmake <==\nset(A)\n==> b.cmake <==\nset(B)\n");
}

#[test]
fn test_highlight_missing_file() {
    let temp_dir = workspace();
    cmkt(temp_dir.path())
        .args(["--no-color", "highlight", "nope.cmake"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read nope.cmake"));
}

#[test]
fn test_highlight_reports_backslash() {
    let temp_dir = workspace();
    write(temp_dir.path(), "CMakeLists.txt", "set(A \\)\n");

    cmkt(temp_dir.path())
        .args(["--no-color", "highlight", "CMakeLists.txt"])
        .assert()
        .success()
        .stdout("set(A \\)\n")
        .stderr(predicate::str::contains("E0001").and(predicate::str::contains("ERROR").not()));
}

#[test]
fn test_invalid_theme_is_rejected() {
    let temp_dir = workspace();
    write(temp_dir.path(), "cmkt.toml", "[theme]\ncomment = \"grey\"\n");
    write(temp_dir.path(), "CMakeLists.txt", "# hi\n");

    cmkt(temp_dir.path())
        .args(["highlight", "CMakeLists.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid color code"));
}

#[test]
fn test_explicit_config_path() {
    let temp_dir = workspace();
    let config = write(temp_dir.path(), "other.toml", "[theme]\nvariable = \"7\"\n");
    write(temp_dir.path(), "CMakeLists.txt", "${X}\n");

    cmkt(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .args(["highlight", "CMakeLists.txt"])
        .assert()
        .success()
        .stdout("\x1b[7m${X}\x1b[0m\n");
}

#[test]
fn test_tokens_text() {
    let temp_dir = workspace();
    write(temp_dir.path(), "CMakeLists.txt", "set(X)\n");

    cmkt(temp_dir.path())
        .args(["tokens", "CMakeLists.txt"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1:1\tkeyword\t\"set\"\n1:4\tplain\t\"(\"\n"));
}

fn token_json(dir: &Path, extra_args: &[&str]) -> Vec<serde_json::Value> {
    let output = cmkt(dir)
        .args(["tokens", "--json", "CMakeLists.txt"])
        .args(extra_args)
        .output()
        .expect("Failed to run cmkt");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("tokens --json should print a JSON array")
}

fn class_of<'a>(tokens: &'a [serde_json::Value], text: &str) -> &'a serde_json::Value {
    tokens
        .iter()
        .find(|token| token["text"] == text)
        .map(|token| &token["class"])
        .unwrap_or_else(|| panic!("no token {:?}", text))
}

#[test]
fn test_tokens_json_with_extra_keywords() {
    let temp_dir = workspace();
    write(temp_dir.path(), "CMakeLists.txt", "my_cmd(SPECIAL)\n");
    write(temp_dir.path(), "extra.json", r#"{ "my_cmd": ["SPECIAL"] }"#);

    let plain = token_json(temp_dir.path(), &[]);
    assert_eq!(*class_of(&plain, "my_cmd"), "keyword");
    assert!(class_of(&plain, "SPECIAL").is_null());

    let extended = token_json(temp_dir.path(), &["--keywords", "extra.json"]);
    assert_eq!(*class_of(&extended, "SPECIAL"), "keyword");
    assert_eq!(extended[0]["line"], 1);
    assert_eq!(extended[0]["column"], 1);
}

#[test]
fn test_bad_keyword_resource_is_skipped() {
    let temp_dir = workspace();
    write(temp_dir.path(), "CMakeLists.txt", "if(NOT A)\n");
    write(temp_dir.path(), "broken.json", "[1, 2]");

    let tokens = token_json(temp_dir.path(), &["--keywords", "broken.json"]);
    assert_eq!(*class_of(&tokens, "NOT"), "keyword");
}
