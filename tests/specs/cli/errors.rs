//! CLI error handling specs

use crate::prelude::*;

#[test]
fn zero_message_bound_fails_at_startup() {
    alarm()
        .args(&["--max-message-len", "0"])
        .fails()
        .stderr_has("Invalid configuration");
}

#[test]
fn unknown_output_format_fails() {
    alarm()
        .args(&["--output", "yaml"])
        .fails()
        .stderr_has("invalid value 'yaml'");
}

#[test]
fn bad_log_filter_fails() {
    alarm()
        .env("ALARM_LOG", "alarm=loud")
        .fails()
        .stderr_has("Invalid log filter");
}

#[test]
fn garbage_lines_report_bad_command_and_continue() {
    alarm()
        .args(&["--drain"])
        .input(&["hello there", "1 Message(1) still works"])
        .passes()
        .stderr_eq("Bad command\n")
        .fired_eq(&["(1) still works"]);
}

#[test]
fn overlong_message_is_rejected() {
    alarm()
        .args(&["--max-message-len", "4"])
        .input(&["1 Message(1) toolong"])
        .passes()
        .stderr_eq("Bad command\n")
        .stdout_eq("");
}

#[test]
fn message_bound_from_environment() {
    alarm()
        .env("ALARM_MAX_MESSAGE_LEN", "3")
        .input(&["1 Message(1) four"])
        .passes()
        .stderr_eq("Bad command\n");
}

#[test]
fn huge_duration_is_rejected_and_input_continues() {
    alarm()
        .args(&["--drain"])
        .input(&["18446744073709551615 Message(1) forever", "1 Message(2) ok"])
        .passes()
        .stderr_eq("Bad command\n")
        .fired_eq(&["(1) ok"]);
}
