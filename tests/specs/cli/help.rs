//! Help and version output specs

use crate::prelude::*;

#[test]
fn help_lists_flags_and_grammar() {
    alarm()
        .args(&["--help"])
        .passes()
        .stdout_has("--drain")
        .stdout_has("--output")
        .stdout_has("<seconds> Message(<id>) <text>")
        .stdout_has("Cancel: Message(<id>)");
}

#[test]
fn version_prints_name() {
    alarm().args(&["--version"]).passes().stdout_has("alarm ");
}
