//! End-to-end sessions against the compiled responder binary.
//!
//! Each test drives a whole scripted session over the child's stdin and
//! asserts the exact reply stream on stdout. Secrets reach the child
//! through its environment, so no test touches this process's own
//! environment.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const PASS_VAR: &str = "PINENTRY_KEEPASS_PASS";
const CAPTURE_DIR_VAR: &str = "PINENTRY_KEEPASS_CAPTURE_DIR";

/// Command for the binary under test with a scrubbed environment.
fn responder() -> Command {
    let mut command = Command::cargo_bin("pinentry-keepass").expect("binary under test");
    command
        .env_remove(PASS_VAR)
        .env_remove(CAPTURE_DIR_VAR)
        .env_remove("PINENTRY_KEEPASS_LOG")
        .env_remove("PINENTRY_KEEPASS_LOG_FORMAT");
    command
}

#[test]
fn greets_and_exits_cleanly_on_bye() {
    responder()
        .write_stdin("BYE\n")
        .assert()
        .success()
        .stdout("OK Your orders please\n");
}

#[test]
fn end_of_stream_without_bye_also_exits_cleanly() {
    responder()
        .write_stdin("")
        .assert()
        .success()
        .stdout("OK Your orders please\n");
}

#[test]
fn full_handshake_returns_the_configured_secret() {
    responder()
        .env(PASS_VAR, "hunter2")
        .write_stdin("SETDESC Enter the passphrase\nSETKEYINFO n/0123456789ABCDEF\nGETPIN\nBYE\n")
        .assert()
        .success()
        .stdout("OK Your orders please\nOK\nOK\nD hunter2\nOK\n");
}

#[test]
fn getpin_without_announcement_is_cancelled() {
    responder()
        .env(PASS_VAR, "hunter2")
        .write_stdin("GETPIN\nBYE\n")
        .assert()
        .success()
        .stdout("OK Your orders please\nERR Operation cancelled\n");
}

#[test]
fn getpin_without_a_configured_secret_is_cancelled() {
    responder()
        .write_stdin("SETKEYINFO n/0123456789ABCDEF\nGETPIN\nBYE\n")
        .assert()
        .success()
        .stdout("OK Your orders please\nOK\nERR Operation cancelled\n");
}

#[test]
fn empty_secret_counts_as_absent() {
    responder()
        .env(PASS_VAR, "")
        .write_stdin("SETKEYINFO n/0123456789ABCDEF\nGETPIN\nBYE\n")
        .assert()
        .success()
        .stdout("OK Your orders please\nOK\nERR Operation cancelled\n");
}

#[test]
fn getinfo_pid_reports_the_child_process() {
    responder()
        .write_stdin("GETINFO pid\nBYE\n")
        .assert()
        .success()
        .stdout(
            predicate::str::is_match("\\AOK Your orders please\nD [0-9]+\nOK\n\\z")
                .expect("valid pid pattern"),
        );
}

#[test]
fn getinfo_version_reports_the_package_version() {
    responder()
        .write_stdin("GETINFO version\nBYE\n")
        .assert()
        .success()
        .stdout(format!(
            "OK Your orders please\nD {}\nOK\n",
            env!("CARGO_PKG_VERSION")
        ));
}

#[test]
fn getinfo_flavor_reports_keepass() {
    responder()
        .write_stdin("GETINFO flavor\nBYE\n")
        .assert()
        .success()
        .stdout("OK Your orders please\nD keepass\nOK\n");
}

#[test]
fn unknown_commands_do_not_end_the_session() {
    responder()
        .write_stdin("FROBNICATE\nGETINFO flavor\nBYE\n")
        .assert()
        .success()
        .stdout("OK Your orders please\nERR Unknown command\nD keepass\nOK\n");
}

#[test]
fn administrative_commands_are_acknowledged() {
    responder()
        .write_stdin("OPTION allow-external-password-cache\nSETTITLE gpg\nSETTIMEOUT 30\nBYE\n")
        .assert()
        .success()
        .stdout("OK Your orders please\nOK\nOK\nOK\n");
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    responder()
        .write_stdin("# driving agent banner\n\nCONFIRM\nBYE\n")
        .assert()
        .success()
        .stdout("OK Your orders please\nOK\n");
}

#[test]
fn capture_directory_receives_both_raw_streams() {
    let dir = tempfile::tempdir().expect("capture dir");
    responder()
        .env(PASS_VAR, "hunter2")
        .env(CAPTURE_DIR_VAR, dir.path())
        .write_stdin("SETKEYINFO n/ABCDEF\nGETPIN\nBYE\n")
        .assert()
        .success()
        .stdout("OK Your orders please\nOK\nD hunter2\nOK\n");

    let inbound = fs::read_to_string(dir.path().join("inbound.bin")).expect("inbound capture");
    let outbound = fs::read_to_string(dir.path().join("outbound.bin")).expect("outbound capture");
    assert_eq!(inbound, "SETKEYINFO n/ABCDEF\nGETPIN\nBYE\n");
    assert_eq!(outbound, "OK Your orders please\nOK\nD hunter2\nOK\n");
}

#[test]
fn unusable_capture_directory_does_not_break_the_session() {
    responder()
        .env(CAPTURE_DIR_VAR, "/nonexistent/capture/location")
        .write_stdin("CONFIRM\nBYE\n")
        .assert()
        .success()
        .stdout("OK Your orders please\nOK\n");
}

#[test]
fn invalid_log_format_fails_startup_before_the_greeting() {
    responder()
        .env("PINENTRY_KEEPASS_LOG_FORMAT", "fancy")
        .write_stdin("BYE\n")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("invalid value 'fancy'"));
}
