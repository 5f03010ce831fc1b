//! Binary entry point for the responder.

use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match pinentry_keepass::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            // Telemetry may not be installed when startup fails; report on
            // stderr directly. stdout stays clean for the protocol.
            let _ = writeln!(io::stderr(), "pinentry-keepass: {error}");
            ExitCode::FAILURE
        }
    }
}
