//! # EyeQA CLI List Integration Tests
//!
//! File: cli/tests/list.rs
//! Author: Christi Mahu
//!
mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_list_builtin_questions() {
    Sandbox::new()
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("what is eye tissue transplantation"))
        .stdout(predicate::str::contains("Found 86 question(s)."));
}

#[test]
fn test_list_one_category() {
    Sandbox::new()
        .cmd()
        .args(["list", "--category", "insurance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("does medicare cover eye transplants"))
        .stdout(predicate::str::contains("will it hurt").not())
        .stdout(predicate::str::contains("Found 10 question(s)."));
}

#[test]
fn test_list_unknown_category_fails() {
    Sandbox::new()
        .cmd()
        .args(["list", "--category", "astrology"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category 'astrology'"));
}

#[test]
fn test_list_starter_suggestions() {
    Sandbox::new()
        .cmd()
        .args(["list", "--suggestions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Who can donate eye tissue?"))
        .stdout(predicate::str::contains("Found 6 suggestion(s)."));
}

#[test]
fn test_list_follow_up_suggestions() {
    Sandbox::new()
        .cmd()
        .args(["list", "-s", "-c", "lifestyle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Can I play sports after recovery?"))
        .stdout(predicate::str::contains("Found 3 suggestion(s)."));
}
