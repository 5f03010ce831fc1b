//! Outbound reply grammar and writer.
//!
//! Replies come in two families: data lines (`D <payload>`) carrying a
//! value, and status lines (`OK`, `OK <message>`, `ERR <message>`)
//! terminating a request. Every request yields exactly one terminal status
//! line, optionally preceded by data lines; the caller blocks on each reply,
//! so the dispatcher flushes after every handled line.

use std::fmt::Display;
use std::io::{self, Write};

/// Status message for a command name that is not in the registry.
pub const UNKNOWN_COMMAND: &str = "Unknown command";

/// Status message for "no secret available".
///
/// An unset key identifier, a resolver miss and a user refusal all read the
/// same to the caller; the protocol deliberately does not distinguish them.
pub const OPERATION_CANCELLED: &str = "Operation cancelled";

/// Greeting message announced before any input is read.
pub const GREETING: &str = "Your orders please";

/// Writer that frames protocol replies onto an output stream.
///
/// The writer holds no session state; it only knows the reply grammar.
/// Flushing is explicit via [`flush`](Self::flush).
#[derive(Debug)]
pub struct ReplyWriter<W> {
    writer: W,
}

impl<W: Write> ReplyWriter<W> {
    /// Creates a reply writer wrapping the given output stream.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes a bare `OK` status line.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the stream fails.
    pub fn ok(&mut self) -> io::Result<()> {
        writeln!(self.writer, "OK")
    }

    /// Writes an `OK <message>` status line.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the stream fails.
    pub fn ok_with(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "OK {message}")
    }

    /// Writes an `ERR <message>` status line.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the stream fails.
    pub fn err(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "ERR {message}")
    }

    /// Writes a `D <payload>` data line. The payload is emitted verbatim.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the stream fails.
    pub fn data(&mut self, payload: impl Display) -> io::Result<()> {
        writeln!(self.writer, "D {payload}")
    }

    /// Flushes the underlying stream.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the stream fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
