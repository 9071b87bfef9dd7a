use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn grammarguard(history: &Path) -> Command {
    let mut cmd = Command::cargo_bin("grammarguard").unwrap();
    cmd.env("GRAMMARGUARD_HISTORY_FILE", history)
        .env_remove("GRAMMARGUARD_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn check_reports_vocabulary_misspellings() {
    let dir = tempdir().unwrap();
    grammarguard(&dir.path().join("history.json"))
        .args(["check", "--no-history"])
        .write_stdin("домй бьло кошкаа")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1:1 spelling домй"))
        .stdout(predicate::str::contains("1:11 spelling кошкаа"))
        .stdout(predicate::str::contains("Potential issues found: 3"));
}

#[test]
fn check_no_fail_exits_cleanly() {
    let dir = tempdir().unwrap();
    grammarguard(&dir.path().join("history.json"))
        .args(["check", "--no-history", "--no-fail"])
        .write_stdin("wooow")
        .assert()
        .success()
        .stdout(predicate::str::contains("punctuation wooow"))
        .stdout(predicate::str::contains("→ woow"));
}

#[test]
fn check_clean_file_passes() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("clean.txt");
    fs::write(&file, "Nothing wrong here.").unwrap();

    grammarguard(&dir.path().join("history.json"))
        .args(["check", "--no-history"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found!"));
}

#[test]
fn check_skips_unsupported_documents() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("paper.pdf");
    fs::write(&file, "%PDF-1.4").unwrap();

    grammarguard(&dir.path().join("history.json"))
        .args(["check", "--no-history"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("PDF documents are not supported"))
        .stderr(predicate::str::contains("No readable input"));
}

#[test]
fn analyze_json_output() {
    let dir = tempdir().unwrap();
    let output = grammarguard(&dir.path().join("history.json"))
        .args(["analyze", "--no-history", "-o", "json"])
        .write_stdin("The cat sat on the mat. The dog ran.")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let analysis = &json["reports"][0]["analysis"];
    assert_eq!(analysis["wordCount"], 9);
    assert_eq!(analysis["sentenceCount"], 2);
    assert_eq!(analysis["commonWords"][0]["word"], "the");
    assert_eq!(json["reports"][0]["summary"], "The sat the The ran.");
}

#[test]
fn analyze_uses_requested_language() {
    let dir = tempdir().unwrap();
    grammarguard(&dir.path().join("history.json"))
        .args(["analyze", "--no-history", "-l", "ru"])
        .write_stdin("привет мир")
        .assert()
        .success()
        .stdout(predicate::str::contains("Слов: 2"))
        .stdout(predicate::str::contains("Длинные слова не найдены."));
}

#[test]
fn analyze_markdown_ignores_code() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("notes.md");
    fs::write(&file, "# Notes\n\nSome prose.\n\n```\nlet xxxx = 1;\n```\n").unwrap();

    let output = grammarguard(&dir.path().join("history.json"))
        .args(["check", "--no-history", "-o", "json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["totalErrors"], 0);
    assert_eq!(json["reports"][0]["analysis"]["wordCount"], 3);
}

#[test]
fn fix_prints_corrected_text() {
    let dir = tempdir().unwrap();
    grammarguard(&dir.path().join("history.json"))
        .args(["fix", "--no-history"])
        .write_stdin("so cooool")
        .assert()
        .success()
        .stdout("so cool\n");
}

#[test]
fn fix_prints_doubly_flagged_word_once() {
    let dir = tempdir().unwrap();
    grammarguard(&dir.path().join("history.json"))
        .args(["fix", "--no-history"])
        .write_stdin("привет вечерррм")
        .assert()
        .success()
        .stdout("привет вечеррм\n");
}

#[test]
fn fix_write_updates_plain_text_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("story.txt");
    fs::write(&file, "привет вечерррм\n").unwrap();

    grammarguard(&dir.path().join("history.json"))
        .args(["fix", "--no-history", "--write"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 correction applied to 1 file"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "привет вечеррм\n");
}

#[test]
fn history_records_lists_and_deletes() {
    let dir = tempdir().unwrap();
    let history = dir.path().join("history.json");

    grammarguard(&history)
        .args(["check", "--no-fail", "--auto-apply"])
        .write_stdin("cooool домй")
        .assert()
        .success();

    let output = grammarguard(&history)
        .args(["history", "list", "-o", "json"])
        .output()
        .unwrap();
    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["correctedText"], "cool домй");
    assert_eq!(entries[0]["errors"].as_array().unwrap().len(), 2);

    let id = entries[0]["id"].as_str().unwrap().to_string();
    grammarguard(&history)
        .args(["history", "delete", id.as_str()])
        .assert()
        .success();

    grammarguard(&history)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No history available"));
}

#[test]
fn blank_input_is_not_recorded() {
    let dir = tempdir().unwrap();
    let history = dir.path().join("history.json");

    grammarguard(&history)
        .args(["analyze"])
        .write_stdin("   ")
        .assert()
        .success();

    assert!(!history.exists());
}

#[test]
fn completion_script_is_generated() {
    let dir = tempdir().unwrap();
    grammarguard(&dir.path().join("history.json"))
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("grammarguard"));
}
