//! Cancellation specs

use crate::prelude::*;

#[test]
fn cancelled_alarm_never_fires() {
    alarm()
        .args(&["--drain"])
        .input(&["1 Message(1) doomed", "2 Message(2) kept", "Cancel: Message(1)"])
        .passes()
        .stdout_has("Cancel Alarm Request With Message Number (1) Received at <")
        .stdout_has(">: <1 doomed>")
        .fired_eq(&["(2) kept"]);
}

#[test]
fn cancel_of_unknown_id_is_reported() {
    alarm()
        .input(&["Cancel: Message(9)"])
        .passes()
        .stdout_eq("")
        .stderr_eq("Error: No Alarm Request With Message Number (9) to Cancel!\n");
}

#[test]
fn second_cancel_is_reported() {
    alarm()
        .input(&["5 Message(3) x", "Cancel: Message(3)", "Cancel: Message(3)"])
        .passes()
        .stderr_eq(
            "Error: More Than One Request to Cancel Alarm Request With Message Number (3)!\n",
        );
}

#[test]
fn replacing_cancelled_alarm_is_rejected() {
    alarm()
        .input(&["5 Message(4) x", "Cancel: Message(4)", "1 Message(4) y"])
        .passes()
        .stderr_eq(
            "Error: Alarm Request With Message Number (4) Is Cancelled and Cannot Be Replaced!\n",
        );
}
