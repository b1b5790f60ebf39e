use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense_tracker_cli").unwrap();
    cmd.env("EXPENSE_TRACKER_CLI_SCRIPT", "1")
        .env("EXPENSE_TRACKER_HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = TempDir::new().unwrap();
    let input = "add expense Coffee 4.50 food 2024-01-01\nsummary\nexit\n";

    cli(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Added expense"))
        .stdout(contains("-₹4.50"));

    let json = std::fs::read_to_string(home.path().join("store").join("expenses.json")).unwrap();
    assert!(json.contains("\"Coffee\""));
}

#[test]
fn records_persist_between_sessions() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("add income \"Monthly pay\" 1000 salary\nexit\n")
        .assert()
        .success();

    cli(&home)
        .write_stdin("list income\nexit\n")
        .assert()
        .success()
        .stdout(contains("Monthly pay"))
        .stdout(contains("+₹1000.00"));
}

#[test]
fn rejected_input_is_reported_without_failing() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("add expense Bad -5 food\nlist expense\nsumary\nexit\n")
        .assert()
        .success()
        .stdout(contains("Transaction not added"))
        .stdout(contains("No expenses yet"))
        .stdout(contains("Did you mean `summary`?"));
}
