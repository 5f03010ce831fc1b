//! Behaviour tests for the dispatch loop.

use std::io::{self, BufRead, Cursor, Read, Write};

use rstest::{fixture, rstest};

use crate::capture::SessionCapture;
use crate::resolver::StaticSecretResolver;

use super::*;

#[fixture]
fn resolver() -> StaticSecretResolver {
    StaticSecretResolver::new().with_entry("n/ABCDEF", "hunter2")
}

/// Runs a whole scripted session and returns the outbound bytes.
fn run_script(script: &str, resolver: &StaticSecretResolver) -> String {
    let mut output = Vec::new();
    Dispatcher::new(resolver)
        .run(
            Cursor::new(script.as_bytes()),
            &mut output,
            SessionCapture::disabled(),
        )
        .expect("session completes");
    String::from_utf8(output).expect("replies are ascii")
}

#[rstest]
fn greeting_is_the_first_reply(resolver: StaticSecretResolver) {
    let output = run_script("", &resolver);
    assert_eq!(output, "OK Your orders please\n");
}

#[rstest]
fn full_handshake_yields_the_secret(resolver: StaticSecretResolver) {
    let output = run_script("SETKEYINFO n/ABCDEF\nGETPIN\nBYE\n", &resolver);
    assert_eq!(output, "OK Your orders please\nOK\nD hunter2\nOK\n");
}

#[rstest]
fn bye_ends_the_session_without_a_reply(resolver: StaticSecretResolver) {
    let output = run_script("BYE\nGETINFO flavor\n", &resolver);
    // Nothing after the greeting: BYE is silent and the later line is
    // never read.
    assert_eq!(output, "OK Your orders please\n");
}

#[rstest]
fn unknown_command_is_rejected_and_the_session_continues(resolver: StaticSecretResolver) {
    let output = run_script("FROBNICATE\nGETINFO flavor\nBYE\n", &resolver);
    assert_eq!(
        output,
        "OK Your orders please\nERR Unknown command\nD keepass\nOK\n"
    );
}

#[rstest]
fn comments_and_blank_lines_produce_no_reply(resolver: StaticSecretResolver) {
    let output = run_script("# a comment\n\n\nCONFIRM\nBYE\n", &resolver);
    assert_eq!(output, "OK Your orders please\nOK\n");
}

#[rstest]
fn comment_lines_do_not_touch_session_state(resolver: StaticSecretResolver) {
    let output = run_script("SETKEYINFO n/ABCDEF\n# SETKEYINFO other\nGETPIN\nBYE\n", &resolver);
    assert_eq!(output, "OK Your orders please\nOK\nD hunter2\nOK\n");
}

#[rstest]
fn command_names_are_case_sensitive(resolver: StaticSecretResolver) {
    let output = run_script("getpin\nBYE\n", &resolver);
    assert_eq!(output, "OK Your orders please\nERR Unknown command\n");
}

#[rstest]
fn whitespace_only_line_splits_to_an_empty_name(resolver: StaticSecretResolver) {
    let output = run_script(" \nBYE\n", &resolver);
    assert_eq!(output, "OK Your orders please\nERR Unknown command\n");
}

#[rstest]
fn crlf_terminators_are_stripped(resolver: StaticSecretResolver) {
    let output = run_script("SETKEYINFO n/ABCDEF\r\nGETPIN\r\nBYE\r\n", &resolver);
    assert_eq!(output, "OK Your orders please\nOK\nD hunter2\nOK\n");
}

#[rstest]
fn final_line_without_terminator_is_still_dispatched(resolver: StaticSecretResolver) {
    let output = run_script("GETINFO flavor", &resolver);
    assert_eq!(output, "OK Your orders please\nD keepass\nOK\n");
}

#[test]
fn repeated_announcements_use_the_latest_identifier() {
    let with_two = StaticSecretResolver::new()
        .with_entry("first", "secret-one")
        .with_entry("second", "secret-two");
    let output = run_script("SETKEYINFO first\nSETKEYINFO second\nGETPIN\nBYE\n", &with_two);
    assert_eq!(output, "OK Your orders please\nOK\nOK\nD secret-two\nOK\n");
}

#[rstest]
fn getpin_before_any_announcement_is_cancelled(resolver: StaticSecretResolver) {
    let output = run_script("GETPIN\nBYE\n", &resolver);
    assert_eq!(output, "OK Your orders please\nERR Operation cancelled\n");
}

#[rstest]
fn empty_announcement_clears_the_identifier(resolver: StaticSecretResolver) {
    let output = run_script("SETKEYINFO n/ABCDEF\nSETKEYINFO\nGETPIN\nBYE\n", &resolver);
    assert_eq!(
        output,
        "OK Your orders please\nOK\nOK\nERR Operation cancelled\n"
    );
}

/// Inbound stream that fails after yielding its scripted lines.
struct BrokenReader {
    remaining: Cursor<Vec<u8>>,
}

impl BrokenReader {
    fn after(script: &str) -> Self {
        Self {
            remaining: Cursor::new(script.as_bytes().to_vec()),
        }
    }
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.remaining.read(buf) {
            Ok(0) => Err(io::Error::new(io::ErrorKind::ConnectionReset, "torn down")),
            other => other,
        }
    }
}

impl BufRead for BrokenReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        let buffered = self.remaining.fill_buf()?;
        if buffered.is_empty() {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "torn down"));
        }
        Ok(buffered)
    }

    fn consume(&mut self, amount: usize) {
        self.remaining.consume(amount);
    }
}

#[rstest]
fn read_failure_is_fatal(resolver: StaticSecretResolver) {
    let mut output = Vec::new();
    let error = Dispatcher::new(&resolver)
        .run(
            BrokenReader::after("CONFIRM\n"),
            &mut output,
            SessionCapture::disabled(),
        )
        .expect_err("broken inbound stream");
    assert!(matches!(error, ServeError::Read { .. }));
    // The command before the failure was still answered.
    assert_eq!(output, b"OK Your orders please\nOK\n");
}

/// Outbound stream that rejects every write.
struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[rstest]
fn write_failure_is_fatal(resolver: StaticSecretResolver) {
    let error = Dispatcher::new(&resolver)
        .run(
            Cursor::new(b"CONFIRM\n" as &[u8]),
            BrokenWriter,
            SessionCapture::disabled(),
        )
        .expect_err("broken reply stream");
    assert!(matches!(error, ServeError::Write { .. }));
}

#[rstest]
fn custom_registries_drive_dispatch(resolver: StaticSecretResolver) {
    let mut registry = CommandRegistry::new();
    registry
        .register("PING", crate::registry::CommandHandler::Acknowledge)
        .expect("register PING");
    registry
        .register("BYE", crate::registry::CommandHandler::Terminate)
        .expect("register BYE");

    let mut output = Vec::new();
    Dispatcher::with_registry(registry, &resolver)
        .run(
            Cursor::new(b"PING\nGETPIN\nBYE\n" as &[u8]),
            &mut output,
            SessionCapture::disabled(),
        )
        .expect("session completes");
    // GETPIN is not bound in this registry, so it is unknown here.
    assert_eq!(
        output,
        b"OK Your orders please\nOK\nERR Unknown command\n"
    );
}
