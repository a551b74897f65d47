use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tally(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("TALLY_CONFIG_DIR", config_dir.path())
        .env_remove("TALLY_LOG");
    cmd
}

#[test]
fn repeat_prints_end_date() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args(["repeat", "2024-01-01", "--times", "3", "--unit", "weekly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("to 15/01/2024"));
}

#[test]
fn repeat_json_payload() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args([
            "repeat",
            "31/01/2024",
            "-n",
            "2",
            "--unit",
            "monthly",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""repetitionEndDate": "2024-03-02""#));
}

#[test]
fn repeat_rejects_bad_date() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args(["repeat", "2024-02-30", "-n", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a valid date"));
}

#[test]
fn repeat_rejects_too_many_occurrences() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args(["repeat", "2024-01-01", "-n", "400", "-u", "daily"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 365 occurrences"));
}

#[test]
fn distribute_evenly_from_stdin() {
    let dir = TempDir::new().unwrap();
    let form = r#"{"totalAmount": 5000, "categories": [
        {"id": "a", "enabled": true}, {"id": "b", "enabled": true},
        {"id": "c", "enabled": true}, {"id": "d", "enabled": true},
        {"id": "e", "enabled": true}]}"#;

    tally(&dir)
        .args(["distribute", "-", "--format", "csv"])
        .write_stdin(form)
        .assert()
        .success()
        .stdout(predicate::str::contains("a,,true,1000.0"))
        .stdout(predicate::str::contains("e,,true,1000.0"));
}

#[test]
fn distribute_without_selection_fails() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args(["distribute", "-"])
        .write_stdin(r#"{"totalAmount": 10, "categories": [{"id": "a"}]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Select at least one category"));
}

#[test]
fn currency_round_trip() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args(["currency", "format", "1234.56"])
        .assert()
        .success()
        .stdout("R$ 1.234,56\n");

    tally(&dir)
        .args(["currency", "parse", "R$ 1.234,56"])
        .assert()
        .success()
        .stdout("1234.56\n");

    tally(&dir)
        .args(["--locale", "en-US", "currency", "format", "0.01"])
        .assert()
        .success()
        .stdout("$0.01\n");
}

#[test]
fn config_init_writes_settings() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default settings"));

    assert!(dir.path().join("config.json").exists());

    tally(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Max occurrences: 365"));
}
