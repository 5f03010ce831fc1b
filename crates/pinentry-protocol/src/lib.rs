//! Wire model for the pinentry request/response protocol.
//!
//! The protocol is a newline-delimited ASCII exchange over two byte streams:
//! the caller writes one command per line, the responder answers with zero or
//! more data lines followed by exactly one status line. This crate owns the
//! text-level pieces (splitting inbound lines into a command name and
//! argument remainder, framing outbound replies, and the fixed command
//! vocabulary) and knows nothing about session state or secret storage.
//!
//! # Example
//!
//! ```
//! use pinentry_protocol::{CommandLine, ReplyWriter};
//!
//! let command = CommandLine::parse("SETKEYINFO n/ABCDEF").expect("not ignorable");
//! assert_eq!(command.name(), "SETKEYINFO");
//! assert_eq!(command.args(), "n/ABCDEF");
//!
//! let mut out = Vec::new();
//! let mut reply = ReplyWriter::new(&mut out);
//! reply.ok().expect("write ok");
//! assert_eq!(out, b"OK\n");
//! ```

pub mod line;
pub mod reply;
pub mod vocabulary;

pub use line::CommandLine;
pub use reply::ReplyWriter;
pub use vocabulary::InfoTopic;
