//! JSON output specs

use crate::prelude::*;
use serde_json::Value;

#[test]
fn json_output_emits_one_object_per_event() {
    let run = alarm()
        .args(&["--output", "json", "--drain"])
        .input(&["1 Message(4) hi"])
        .passes();

    let events: Vec<Value> = run
        .stdout_lines()
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["type"], "alarm:received");
    assert_eq!(events[0]["id"], 4);
    assert_eq!(events[0]["seconds"], 1);
    assert_eq!(events[1]["type"], "alarm:fired");
    assert_eq!(events[1]["message"], "hi");
}

#[test]
fn json_errors_go_to_stderr() {
    let run = alarm()
        .args(&["--output", "json"])
        .input(&["Cancel: Message(2)"])
        .passes();

    let event: Value = serde_json::from_str(run.stderr().trim()).unwrap();
    assert_eq!(event["type"], "alarm:cancel_unknown");
    assert_eq!(event["id"], 2);
}
