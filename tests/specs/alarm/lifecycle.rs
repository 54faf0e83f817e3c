//! Process lifecycle and lifecycle-event specs

use crate::prelude::*;

#[test]
fn lifecycle_flag_reports_replacement() {
    alarm()
        .args(&["--lifecycle", "--drain"])
        .input(&["3 Message(1) a", "1 Message(1) b"])
        .passes()
        .stdout_has("Alarm With Message Number (1) Replaced at <")
        .stdout_has(">: <1 b>")
        .fired_eq(&["(1) b"]);
}

#[test]
fn without_lifecycle_flag_no_replacement_report() {
    alarm()
        .args(&["--drain"])
        .input(&["3 Message(1) a", "1 Message(1) b"])
        .passes()
        .stdout_lacks("Replaced at");
}

#[test]
fn run_is_logged_to_state_dir() {
    let run = alarm().input(&["10 Message(1) pending"]).passes();
    let log = run.log();
    assert!(log.contains("starting alarm scheduler"), "log: {log}");
    assert!(log.contains("shutdown complete"), "log: {log}");
    assert!(log.contains("discarded=1"), "log: {log}");
}

#[test]
fn explicit_log_file_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/custom.log");
    alarm()
        .args(&["--log-file", path.to_str().unwrap()])
        .input(&["Cancel: Message(1)"])
        .passes();
    let log = std::fs::read_to_string(&path).unwrap();
    assert!(log.contains("shutdown complete"));
}
