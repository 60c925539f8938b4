#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn desk_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("crimedesk"));
    cmd.env("CRIMEDESK_HOME", home.path().as_os_str())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

const BICYCLE: &str = r#"register -t Theft -l "5th Ave" -o "Officer Smith" -d "Stolen bicycle from porch""#;

#[test]
fn registers_and_lists_a_case() {
    let home = TempDir::new().unwrap();
    let script = format!("{}\nlist\n", BICYCLE);

    desk_cmd(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Case successfully registered with ID: CASE-",
        ))
        .stdout(predicate::str::contains("Showing 1 of 1 cases"))
        .stdout(predicate::str::contains("5th Ave"));
}

#[test]
fn validation_errors_do_not_end_the_session() {
    let home = TempDir::new().unwrap();
    let script = format!(
        "register -t Theft -l \"5th Ave\" -o \"Officer Smith\" -d short\n{}\nlist\n",
        BICYCLE
    );

    desk_cmd(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Description must be at least 10 characters long",
        ))
        .stdout(predicate::str::contains("Showing 1 of 1 cases"));
}

#[test]
fn empty_form_reports_every_message() {
    let home = TempDir::new().unwrap();

    desk_cmd(&home)
        .write_stdin("register\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Crime type is required"))
        .stderr(predicate::str::contains(
            "Location must be at least 2 characters long",
        ))
        .stderr(predicate::str::contains("Officer assignment is required"));
}

#[test]
fn export_writes_csv_with_header() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("cases.csv");
    let script = format!("{}\nexport --out {}\n", BICYCLE, out.display());

    desk_cmd(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 case(s)"));

    let csv = fs::read_to_string(&out).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("id,crimeType,location"));
    assert!(lines.next().unwrap().contains("Stolen bicycle from porch"));
}

#[test]
fn export_of_empty_session_writes_nothing() {
    let home = TempDir::new().unwrap();

    desk_cmd(&home)
        .write_stdin("export\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No cases to export."));

    assert!(!home.path().join("exports").exists());
}

#[test]
fn backup_lands_in_export_dir() {
    let home = TempDir::new().unwrap();
    let script = format!("{}\nbackup\n", BICYCLE);

    desk_cmd(&home).write_stdin(script).assert().success();

    let entries: Vec<_> = fs::read_dir(home.path().join("exports"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].starts_with("crime_system_backup_"));
    assert!(entries[0].ends_with(".json"));
}

#[test]
fn attachments_are_copied_into_uploads() {
    let home = TempDir::new().unwrap();
    let evidence = home.path().join("statement.txt");
    fs::write(&evidence, "witness statement").unwrap();
    let script = format!("{} -a {}\n", BICYCLE, evidence.display());

    desk_cmd(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file(s) attached"));

    let stored: Vec<_> = fs::read_dir(home.path().join("uploads"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].starts_with("CASE-"));
    assert!(stored[0].ends_with("_statement.txt"));
}

#[test]
fn unsupported_attachment_type_is_rejected() {
    let home = TempDir::new().unwrap();
    let evidence = home.path().join("payload.exe");
    fs::write(&evidence, "MZ").unwrap();
    let script = format!("{} -a {}\nlist\n", BICYCLE, evidence.display());

    desk_cmd(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("No cases found."));

    assert!(!home.path().join("uploads").exists());
}

#[test]
fn officers_can_be_added_and_assigned() {
    let home = TempDir::new().unwrap();
    let script = "officer add Officer Garcia\n\
                  officer add \"Officer Smith\"\n\
                  register -t Fraud -l Downtown -o \"Officer Garcia\" -d \"Forged cheques at the bank\"\n\
                  officer list\n";

    desk_cmd(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Officer Garcia added to the registry"))
        .stdout(predicate::str::contains("Officer Smith already exists!"))
        .stdout(predicate::str::contains("Case successfully registered"))
        .stdout(predicate::str::contains("6. Officer Garcia"));
}

#[test]
fn clear_needs_confirmation() {
    let home = TempDir::new().unwrap();
    let script = format!("{}\nclear\nlist\nclear --yes\nlist\n", BICYCLE);

    desk_cmd(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Run `clear --yes` to confirm."))
        .stdout(predicate::str::contains("Showing 1 of 1 cases"))
        .stdout(predicate::str::contains("(1 cases removed)"))
        .stdout(predicate::str::contains("No cases found."));
}

#[test]
fn stats_on_empty_session() {
    let home = TempDir::new().unwrap();

    desk_cmd(&home)
        .write_stdin("stats\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No data available for analysis. Add some cases first.",
        ));
}

#[test]
fn nothing_survives_the_session() {
    let home = TempDir::new().unwrap();

    desk_cmd(&home)
        .write_stdin(format!("{}\nquit\n", BICYCLE))
        .assert()
        .success();

    desk_cmd(&home)
        .write_stdin("list\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No cases found."));
}

#[test]
fn quit_stops_reading_input() {
    let home = TempDir::new().unwrap();

    desk_cmd(&home)
        .write_stdin(format!("quit\n{}\n", BICYCLE))
        .assert()
        .success()
        .stdout(predicate::str::contains("registered").not());
}

#[test]
fn script_file_is_read_instead_of_stdin() {
    let home = TempDir::new().unwrap();
    let script = home.path().join("session.txt");
    fs::write(&script, format!("# morning intake\n\n{}\nlist\n", BICYCLE)).unwrap();

    desk_cmd(&home)
        .arg("--script")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 of 1 cases"));
}

#[test]
fn config_set_applies_to_next_session() {
    let home = TempDir::new().unwrap();

    desk_cmd(&home)
        .write_stdin("config export-dir reports\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("takes effect next session"));

    desk_cmd(&home)
        .write_stdin(format!("{}\nbackup\n", BICYCLE))
        .assert()
        .success();

    assert!(home.path().join("reports").is_dir());
}

#[test]
fn unknown_command_is_reported() {
    let home = TempDir::new().unwrap();

    desk_cmd(&home)
        .write_stdin("arrest everyone\nlist\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("unrecognized subcommand"))
        .stdout(predicate::str::contains("No cases found."));
}

#[test]
fn exported_registration_time_matches_id_date_off_utc() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("cases.csv");
    let script = format!("{}\nexport --out {}\n", BICYCLE, out.display());

    desk_cmd(&home)
        .env("TZ", "Pacific/Kiritimati")
        .write_stdin(script)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    let row: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();
    let id_date = &row[0]["CASE-".len().."CASE-".len() + 8];
    let registered_date = row[8][..10].replace('-', "");
    assert_eq!(id_date, registered_date);
    assert_eq!(row[9].replace('-', ""), id_date);
}

#[test]
fn info_reports_counts_and_locations() {
    let home = TempDir::new().unwrap();

    desk_cmd(&home)
        .write_stdin(format!("info\n{}\ninfo\n", BICYCLE))
        .assert()
        .success()
        .stdout(predicate::str::contains("Last Registration: never"))
        .stdout(predicate::str::contains("Total Cases: 1"))
        .stdout(predicate::str::contains("Registered Officers: 5"))
        .stdout(predicate::str::contains("uploads"));
}
