//! End-to-end tests for the command line interface

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pocketbook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pocketbook").unwrap();
    cmd.env("POCKETBOOK_DATA_DIR", dir.path())
        .env("POCKETBOOK_LOG", "off")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn list_shows_seed_ledger() {
    let dir = TempDir::new().unwrap();

    pocketbook(&dir)
        .args(["list", "--search", "salary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("Page 1 of 1"));
}

#[test]
fn add_then_undo_across_invocations() {
    let dir = TempDir::new().unwrap();

    pocketbook(&dir)
        .args(["add", "deposit", "250", "Birthday gift", "--date", "2025-12-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added:"))
        .stdout(predicate::str::contains("Birthday gift"));

    pocketbook(&dir)
        .args(["list", "--search", "birthday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Birthday gift"));

    pocketbook(&dir)
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Undid add of 'Birthday gift'"));

    pocketbook(&dir)
        .args(["list", "--search", "birthday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));

    pocketbook(&dir)
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to undo."));
}

#[test]
fn overdrawn_withdrawal_is_rejected() {
    let dir = TempDir::new().unwrap();

    pocketbook(&dir)
        .args(["add", "withdrawal", "1000000", "Yacht"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Insufficient balance. Available: 5847.32",
        ));

    pocketbook(&dir)
        .args(["list", "--search", "yacht"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn invalid_amount_is_rejected() {
    let dir = TempDir::new().unwrap();

    pocketbook(&dir)
        .args(["add", "deposit", "0", "Nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a valid amount"));
}

#[test]
fn import_csv_file() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("bank.csv");
    std::fs::write(
        &csv,
        "Date,Amount,Description,Type\n\
         2025-12-20,200.00,Freelance Invoice,Deposit\n\
         2025-12-21,-50.00,Concert Tickets,Withdrawal\n\
         oops,1,Broken,Deposit\n",
    )
    .unwrap();

    pocketbook(&dir)
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 transactions"))
        .stdout(predicate::str::contains("Skipped 1 invalid rows"));

    pocketbook(&dir)
        .args(["list", "--search", "concert"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Concert Tickets"));

    // imports are not undoable
    pocketbook(&dir)
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to undo."));
}

#[test]
fn import_without_rows_is_an_error() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("empty.csv");
    std::fs::write(&csv, "Date,Amount,Description,Type\n").unwrap();

    pocketbook(&dir)
        .arg("import")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid CSV file"));
}

#[test]
fn export_csv_to_stdout() {
    let dir = TempDir::new().unwrap();

    pocketbook(&dir)
        .args(["export", "--format", "csv", "--output", "-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Date,Amount,Description,Type"))
        .stdout(predicate::str::contains("2025-12-01,3500.00,Salary,Deposit"));
}

#[test]
fn export_json_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("ledger.json");

    pocketbook(&dir)
        .args(["export", "--format", "json", "--pretty", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Full ledger exported to:"));

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("\"schema_version\""));
    assert!(text.contains("Salary"));
}

#[test]
fn balance_offline_without_cached_rate() {
    let dir = TempDir::new().unwrap();

    pocketbook(&dir)
        .args(["balance", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance:"))
        .stdout(predicate::str::contains("Total Income:"))
        .stdout(predicate::str::contains("—"));
}

#[test]
fn theme_toggle_is_persisted() {
    let dir = TempDir::new().unwrap();

    pocketbook(&dir)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: light"));

    pocketbook(&dir)
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to dark"));

    pocketbook(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme:            dark"));
}

#[test]
fn show_unknown_transaction() {
    let dir = TempDir::new().unwrap();

    pocketbook(&dir)
        .args(["show", "txn-ffffffff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
