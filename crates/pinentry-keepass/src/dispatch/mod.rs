//! The request/response loop.
//!
//! The dispatcher reads the inbound stream one line at a time, parses each
//! line into a command name and argument string, looks the name up in the
//! registry and invokes the bound handler. Blank lines and `#` comments are
//! ignored without a reply. An unknown name is rejected with
//! `ERR Unknown command` and the session continues; only a transport
//! failure is fatal. The loop ends cleanly on `BYE` or end of stream.
//!
//! Before any input is read the dispatcher announces readiness with the
//! greeting status line, mirroring what a dialog-backed pinentry prints
//! when its driving agent connects.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use pinentry_protocol::line::CommandLine;
use pinentry_protocol::reply::{GREETING, ReplyWriter, UNKNOWN_COMMAND};

use crate::capture::{SessionCapture, TeeWriter};
use crate::commands::{self, Outcome};
use crate::errors::ServeError;
use crate::registry::CommandRegistry;
use crate::resolver::SecretResolver;
use crate::session::SessionContext;

/// Tracing target for dispatch operations.
const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Drives one protocol session from an inbound stream to a reply stream.
///
/// The dispatcher owns the registry and the session context; the resolver
/// is borrowed because it belongs to the caller's wiring, not to the
/// session.
pub struct Dispatcher<'r> {
    registry: CommandRegistry,
    session: SessionContext,
    resolver: &'r dyn SecretResolver,
}

impl<'r> Dispatcher<'r> {
    /// Creates a dispatcher with the standard command registry.
    #[must_use]
    pub fn new(resolver: &'r dyn SecretResolver) -> Self {
        Self::with_registry(CommandRegistry::standard(), resolver)
    }

    /// Creates a dispatcher with a custom registry.
    #[must_use]
    pub fn with_registry(registry: CommandRegistry, resolver: &'r dyn SecretResolver) -> Self {
        Self {
            registry,
            session: SessionContext::new(),
            resolver,
        }
    }

    /// Runs the session loop until `BYE`, end of stream, or a transport
    /// failure.
    ///
    /// The greeting is emitted and flushed before any input is read. Raw
    /// inbound and outbound bytes are duplicated into `capture`, whose
    /// failures degrade to warnings and never affect the session.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError::Read`] when the inbound stream fails other
    /// than by ending, and [`ServeError::Write`] when a reply cannot be
    /// written or flushed. Both are fatal: the protocol has no
    /// resynchronisation path, so the caller must tear the process down.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        output: W,
        capture: SessionCapture,
    ) -> Result<(), ServeError> {
        let (mut inbound_capture, outbound_capture) = capture.into_parts();
        let mut reply = ReplyWriter::new(TeeWriter::new(output, outbound_capture));

        reply.ok_with(GREETING).map_err(ServeError::write)?;
        reply.flush().map_err(ServeError::write)?;
        info!(target: DISPATCH_TARGET, "session open");

        let mut line = String::new();
        loop {
            line.clear();
            let read = input.read_line(&mut line).map_err(ServeError::read)?;
            if read == 0 {
                info!(target: DISPATCH_TARGET, "inbound stream ended");
                break;
            }
            inbound_capture.record(line.as_bytes());

            match self.dispatch_line(trim_line_ending(&line), &mut reply)? {
                Outcome::Continue => {}
                Outcome::Shutdown => {
                    info!(target: DISPATCH_TARGET, "session closed by request");
                    break;
                }
            }
        }

        reply.flush().map_err(ServeError::write)
    }

    /// Parses and executes one inbound line, then flushes the reply stream.
    fn dispatch_line<W: Write>(
        &mut self,
        request: &str,
        reply: &mut ReplyWriter<W>,
    ) -> Result<Outcome, ServeError> {
        let Some(command) = CommandLine::parse(request) else {
            // Blank and comment lines produce no reply at all.
            return Ok(Outcome::Continue);
        };

        // Argument strings may carry secret material and are never logged.
        debug!(target: DISPATCH_TARGET, command = command.name(), "dispatching");

        let outcome = match self.registry.get(command.name()) {
            Some(handler) => commands::execute(
                handler,
                command.args(),
                &mut self.session,
                self.resolver,
                reply,
            ),
            None => {
                debug!(target: DISPATCH_TARGET, command = command.name(), "unknown command");
                reply.err(UNKNOWN_COMMAND).map(|()| Outcome::Continue)
            }
        }
        .map_err(ServeError::write)?;

        reply.flush().map_err(ServeError::write)?;
        Ok(outcome)
    }
}

/// Strips the line terminator; interior whitespace is preserved for the
/// splitter.
fn trim_line_ending(line: &str) -> &str {
    let trimmed = line.strip_suffix('\n').unwrap_or(line);
    trimmed.strip_suffix('\r').unwrap_or(trimmed)
}

#[cfg(test)]
mod tests;
