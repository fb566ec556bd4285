// End-to-end tests for the corec binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn corec(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("corec").expect("corec binary");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .arg("--tokens-out")
        .arg(dir.join("tokens.txt"))
        .arg("--tree-out")
        .arg(dir.join("tree.ebnf"));
    cmd
}

fn write_source(dir: &TempDir, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).expect("write source");
    path
}

#[test]
fn test_scan_prints_tokens() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(&dir, "prog.core", "int x = 10;");

    corec(dir.path())
        .arg("scan")
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Next token is: INT"))
        .stdout(predicate::str::contains("Next lexeme is 10"))
        .stdout(predicate::str::contains("TOKEN_EOF"));

    let table = fs::read_to_string(dir.path().join("tokens.txt")).expect("token table");
    assert!(table.contains("INTEGER_LITERAL"));
}

#[test]
fn test_scan_echoes_comments_but_does_not_store_them() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(&dir, "prog.core", "int x; // note\n");

    corec(dir.path())
        .arg("scan")
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Next token is: COMMENT"));

    let table = fs::read_to_string(dir.path().join("tokens.txt")).expect("token table");
    assert!(!table.contains("COMMENT"));
    assert!(table.contains("IDENTIFIER"));
}

#[test]
fn test_build_then_parse() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(&dir, "prog.core", "int main() { return 2 ^ 3; }");

    corec(dir.path()).arg("build").arg(&source).assert().success();
    let built = fs::read_to_string(dir.path().join("tree.ebnf")).expect("tree");
    assert!(built.starts_with("Program("));
    assert!(built.contains("Power("));

    fs::remove_file(dir.path().join("tree.ebnf")).expect("remove tree");
    corec(dir.path()).arg("parse").assert().success();

    let parsed = fs::read_to_string(dir.path().join("tree.ebnf")).expect("tree");
    assert_eq!(built, parsed);
}

#[test]
fn test_syntax_error_fails() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(&dir, "bad.core", "int main() { return 1 }");

    corec(dir.path())
        .arg("build")
        .arg(&source)
        .assert()
        .failure()
        .stderr(predicate::str::contains("syntax error"));

    assert!(!dir.path().join("tree.ebnf").exists());
    assert!(dir.path().join("tokens.txt").exists());
}

#[test]
fn test_lexical_error_fails_scan() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(&dir, "lex.core", "int x = 1'23;");

    corec(dir.path())
        .arg("scan")
        .arg(&source)
        .assert()
        .failure()
        .stderr(predicate::str::contains("lexical error"));

    assert!(dir.path().join("tokens.txt").exists());
}

#[test]
fn test_wrong_extension() {
    let dir = TempDir::new().expect("temp dir");
    let source = write_source(&dir, "prog.c", "int x;");

    corec(dir.path())
        .arg("build")
        .arg(&source)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a .core source file"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().expect("temp dir");

    corec(dir.path())
        .arg("scan")
        .arg(dir.path().join("nowhere.core"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("io error"));
}
