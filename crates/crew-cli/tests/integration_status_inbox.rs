//! End-to-end coverage over a real `CREW_HOME`: create a team and a
//! couple of mailbox messages on disk exactly as `crew-lead` would,
//! then drive the CLI binary against them.

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn crew_home() -> TempDir {
    TempDir::new().unwrap()
}

fn bootstrap_team(home: &TempDir, team: &str) {
    let store = crew_lead::TeamStore::new(home.path().join(".claude"));
    store.create_team(team, "sess-1", "demo team", "/work", 1000).unwrap();
}

#[test]
fn status_reports_zero_workers_for_a_fresh_team() {
    let home = crew_home();
    bootstrap_team(&home, "demo");

    Command::cargo_bin("crew")
        .unwrap()
        .env("CREW_HOME", home.path())
        .args(["status", "demo"])
        .assert()
        .success()
        .stdout(contains("0 worker"));
}

#[test]
fn status_unknown_team_exits_nonzero() {
    let home = crew_home();

    Command::cargo_bin("crew")
        .unwrap()
        .env("CREW_HOME", home.path())
        .args(["status", "ghost"])
        .assert()
        .failure();
}

#[test]
fn inbox_json_round_trips_a_sent_message() {
    let home = crew_home();
    bootstrap_team(&home, "demo");
    let mailbox = crew_lead::Mailbox::new(home.path().join(".claude"));
    mailbox.send("demo", "team-lead", "fixer-1", "done", Some("status update".to_string()), None).unwrap();

    Command::cargo_bin("crew")
        .unwrap()
        .env("CREW_HOME", home.path())
        .args(["inbox", "demo", "team-lead", "--json"])
        .assert()
        .success()
        .stdout(contains("\"text\": \"done\""));
}

#[test]
fn inbox_unread_flag_excludes_read_messages() {
    let home = crew_home();
    bootstrap_team(&home, "demo");
    let mailbox = crew_lead::Mailbox::new(home.path().join(".claude"));
    mailbox.send("demo", "team-lead", "fixer-1", "done", None, None).unwrap();
    mailbox.drain_unread("demo", "team-lead").unwrap();

    Command::cargo_bin("crew")
        .unwrap()
        .env("CREW_HOME", home.path())
        .args(["inbox", "demo", "team-lead", "--unread"])
        .assert()
        .success()
        .stdout(contains("no unread messages"));
}

#[test]
fn backends_lists_claude_code() {
    let home = crew_home();

    Command::cargo_bin("crew")
        .unwrap()
        .env("CREW_HOME", home.path())
        .args(["backends"])
        .assert()
        .success()
        .stdout(contains("claude-code"));
}

#[test]
fn config_dumps_team_json() {
    let home = crew_home();
    bootstrap_team(&home, "demo");

    Command::cargo_bin("crew")
        .unwrap()
        .env("CREW_HOME", home.path())
        .args(["config", "demo", "--json"])
        .assert()
        .success()
        .stdout(contains("\"name\": \"demo\""));
}
