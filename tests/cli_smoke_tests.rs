mod common;

use std::path::Path;

use assert_cmd::Command;
use common::temp_base;
use predicates::{prelude::PredicateBooleanExt, str::contains};

const BIN_NAME: &str = "finance_core_cli";

fn cli(base: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("FINANCE_CORE_HOME", base)
        .env("NO_COLOR", "1")
        .env("FINANCE_CORE_CLI_SCRIPT", "1");
    cmd
}

#[test]
fn help_lists_commands() {
    cli(&temp_base())
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(contains("Available commands").and(contains("resume")));
}

#[test]
fn dashboard_on_empty_store_shows_placeholders() {
    cli(&temp_base())
        .arg("dashboard")
        .assert()
        .success()
        .stdout(contains("No entries yet").and(contains("No transactions yet")));
}

#[test]
fn registered_expense_appears_in_resume_and_list() {
    let base = temp_base();
    cli(&base)
        .write_stdin("add Lunch 12 expense food\nresume\n")
        .assert()
        .success()
        .stdout(contains("Registered Lunch").and(contains("Food")).and(contains("100%")));

    cli(&base)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Lunch").and(contains("¥12")));
}

#[test]
fn unknown_command_suggests_closest_match() {
    cli(&temp_base())
        .arg("dashbord")
        .assert()
        .failure()
        .stderr(contains("Did you mean `dashboard`?"));
}
