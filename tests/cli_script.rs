use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::tempdir;

fn script(home: &Path, input: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("payoff_cli").unwrap();
    cmd.env("PAYOFF_CLI_SCRIPT", "1")
        .env("PAYOFF_HOME", home)
        .env_remove("PAYOFF_API_KEY")
        .env_remove("API_KEY")
        .env_remove("RUST_LOG")
        .write_stdin(input.to_string())
        .assert()
        .success()
}

#[test]
fn fresh_home_shows_seed_dashboard() {
    let home = tempdir().unwrap();
    script(home.path(), "dashboard\nexit\n")
        .stdout(contains("$28,700.00"))
        .stdout(contains("$4,500.00"))
        .stdout(contains("$1,300.00"))
        .stdout(contains("Chase Sapphire"))
        .stdout(contains("Priority"))
        .stdout(contains("Auto Loan"));
}

#[test]
fn added_account_survives_restart() {
    let home = tempdir().unwrap();
    script(
        home.path(),
        "account add \"Store Card\" credit_card 26.99 812.50 2024-01-15\nexit\n",
    )
    .stdout(contains("Account `Store Card` added"));

    script(home.path(), "account list\npayoff\n")
        .stdout(contains("Store Card"))
        .stdout(contains("$29,512.50"));
}

#[test]
fn payoff_ranks_highest_rate_first() {
    let home = tempdir().unwrap();
    let output = script(
        home.path(),
        "account add Low card 9.5 100 2024-01-01\naccount add High card 29.99 100 2024-01-01\npayoff\n",
    )
    .get_output()
    .stdout
    .clone();
    let text = String::from_utf8(output).unwrap();
    let high = text.rfind("High").unwrap();
    let chase = text.rfind("Chase Sapphire").unwrap();
    let low = text.rfind("Low").unwrap();
    assert!(high < chase && chase < low);
}

#[test]
fn recording_a_balance_updates_totals() {
    let home = tempdir().unwrap();
    script(home.path(), "balance 1 4000 2023-04-01\ndashboard\n")
        .stdout(contains("Recorded $4,000.00 for `Chase Sapphire` on 2023-04-01."))
        .stdout(contains("$28,200.00"))
        .stdout(contains("$1,800.00"));
}

#[test]
fn incomplete_account_is_declined() {
    let home = tempdir().unwrap();
    script(home.path(), "account add Nameless card abc 100\naccount list\n")
        .stdout(contains("Account not added"))
        .stdout(contains("Nameless").not());
}

#[test]
fn reset_requires_confirmation_and_takes_backup() {
    let home = tempdir().unwrap();
    script(home.path(), "balance 2 24000 2023-04-01\nreset\naccount list\n")
        .stdout(contains("Confirmation required"))
        .stdout(contains("Auto Loan"));

    script(home.path(), "reset --yes\naccount list\nbackup list\n")
        .stdout(contains("All accounts deleted."))
        .stdout(contains("No accounts tracked."))
        .stdout(contains("before-reset"));

    script(home.path(), "restore 1 --yes\nchart trend 2\n")
        .stdout(contains("Restored 2 account(s)"))
        .stdout(contains("$24,000.00"));
}

#[test]
fn advise_without_key_prints_setup_instructions() {
    let home = tempdir().unwrap();
    script(home.path(), "advise\nadvice wait\n")
        .stdout(contains("AI Debt Advisor"))
        .stdout(contains("key set <value>"));
}

#[test]
fn key_is_masked_and_clearable() {
    let home = tempdir().unwrap();
    script(home.path(), "key set AIzaSecretValue\nkey show\n")
        .stdout(contains("AIza****"))
        .stdout(contains("SecretValue").not());
    script(home.path(), "key clear\nkey show\n").stdout(contains("No API key stored."));
}

#[test]
fn charts_render_series() {
    let home = tempdir().unwrap();
    script(home.path(), "chart cards\nchart breakdown\nchart trend all\n")
        .stdout(contains("Total Credit Card Debt"))
        .stdout(contains("Individual Credit Card Balances"))
        .stdout(contains("2023-03-01"))
        .stdout(contains("$28,700.00"));
}

#[test]
fn unknown_command_gets_suggestion() {
    let home = tempdir().unwrap();
    script(home.path(), "dashbord\n")
        .stdout(contains("Unknown command `dashbord`"))
        .stdout(contains("Suggestion: `dashboard`?"));
}

#[test]
fn malformed_store_falls_back_to_seed() {
    let home = tempdir().unwrap();
    let data = home.path().join("store");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("debttracker_accounts.json"), "garbage").unwrap();

    script(home.path(), "account list\n").stdout(contains("Chase Sapphire"));
}
