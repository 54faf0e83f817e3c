//! Alarm scheduling specs: insert, replace, ordering

use crate::prelude::*;

#[test]
fn alarm_fires_after_receipt() {
    let run = alarm()
        .args(&["--drain"])
        .input(&["1 Message(1) hello world"])
        .passes();

    let lines = run.stdout_lines();
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert!(lines[0].starts_with("First Alarm Request With Message Number (1) Received at <"));
    assert!(lines[0].ends_with(">: <1 hello world>"));
    assert_eq!(lines[1], "(1) hello world");
}

#[test]
fn alarms_fire_in_deadline_order() {
    alarm()
        .args(&["--drain"])
        .input(&["2 Message(1) slow", "1 Message(2) fast"])
        .passes()
        .fired_eq(&["(1) fast", "(2) slow"]);
}

#[test]
fn repeated_id_replaces_pending_alarm() {
    let run = alarm()
        .args(&["--drain"])
        .input(&["3 Message(5) first", "1 Message(5) second"])
        .passes()
        .stdout_has("Replacement Alarm Request With Message Number (5) Received at <")
        .fired_eq(&["(1) second"]);
    assert_eq!(run.stdout_lines().len(), 3);
}

#[test]
fn end_of_input_without_drain_discards_pending() {
    alarm()
        .input(&["30 Message(1) never"])
        .passes()
        .stdout_has("First Alarm Request With Message Number (1)")
        .stdout_lacks("(30) never");
}

#[test]
fn prompt_is_printed_by_default() {
    alarm()
        .with_prompt()
        .input(&["Cancel: Message(1)"])
        .passes()
        .stdout_eq("Alarm> Alarm> ");
}
