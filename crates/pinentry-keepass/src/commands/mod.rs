//! Handler behaviours for the protocol commands.
//!
//! Every execution writes zero or more data lines followed by exactly one
//! terminal status line, except `BYE`, which writes nothing and signals
//! shutdown. Handler-level problems never escape as process failures: they
//! become `ERR` status lines at the point of detection, and only I/O errors
//! propagate to the dispatcher.

use std::io::{self, Write};
use std::process;
use std::str::FromStr;

use pinentry_protocol::reply::{OPERATION_CANCELLED, ReplyWriter, UNKNOWN_COMMAND};
use pinentry_protocol::vocabulary::InfoTopic;

use crate::registry::CommandHandler;
use crate::resolver::SecretResolver;
use crate::session::SessionContext;

/// Version string reported by `GETINFO version`.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Flavour token reported by `GETINFO flavor`.
const FLAVOR: &str = "keepass";

/// What the dispatcher should do after a handler completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading protocol lines.
    Continue,
    /// End the session cleanly.
    Shutdown,
}

/// Executes the handler bound to a command.
///
/// The session context is touched only by `SETKEYINFO`, the resolver only
/// by `GETPIN`; every other handler works from its arguments alone.
///
/// # Errors
///
/// Returns the underlying I/O error when writing a reply fails. Such a
/// failure is fatal to the session; the protocol has no way to resume a
/// half-written reply.
pub fn execute<W: Write>(
    handler: CommandHandler,
    args: &str,
    session: &mut SessionContext,
    resolver: &dyn SecretResolver,
    reply: &mut ReplyWriter<W>,
) -> io::Result<Outcome> {
    match handler {
        CommandHandler::Acknowledge => acknowledge(reply),
        CommandHandler::SetKeyInfo => set_key_info(args, session, reply),
        CommandHandler::GetPin => get_pin(session, resolver, reply),
        CommandHandler::GetInfo => get_info(args, reply),
        CommandHandler::Terminate => Ok(Outcome::Shutdown),
    }
}

/// Acknowledges an administrative command without acting on it.
fn acknowledge<W: Write>(reply: &mut ReplyWriter<W>) -> io::Result<Outcome> {
    reply.ok()?;
    Ok(Outcome::Continue)
}

/// Stores the announced key identifier. Always succeeds; the identifier is
/// opaque to the responder and never validated.
fn set_key_info<W: Write>(
    args: &str,
    session: &mut SessionContext,
    reply: &mut ReplyWriter<W>,
) -> io::Result<Outcome> {
    session.set_key_identifier(args);
    reply.ok()?;
    Ok(Outcome::Continue)
}

/// Resolves the secret for the announced identifier.
///
/// An unset identifier and a resolver miss both answer with the
/// cancellation status; the caller cannot tell "not found" from
/// "declined".
fn get_pin<W: Write>(
    session: &SessionContext,
    resolver: &dyn SecretResolver,
    reply: &mut ReplyWriter<W>,
) -> io::Result<Outcome> {
    let Some(identifier) = session.key_identifier() else {
        reply.err(OPERATION_CANCELLED)?;
        return Ok(Outcome::Continue);
    };

    match resolver.lookup(identifier) {
        Some(secret) => {
            reply.data(&secret)?;
            reply.ok()?;
        }
        None => reply.err(OPERATION_CANCELLED)?,
    }
    Ok(Outcome::Continue)
}

/// Answers a `GETINFO` topic query.
fn get_info<W: Write>(args: &str, reply: &mut ReplyWriter<W>) -> io::Result<Outcome> {
    match InfoTopic::from_str(args) {
        Ok(InfoTopic::Pid) => {
            reply.data(process::id())?;
            reply.ok()?;
        }
        Ok(InfoTopic::Version) => {
            reply.data(VERSION)?;
            reply.ok()?;
        }
        Ok(InfoTopic::Flavor) => {
            reply.data(FLAVOR)?;
            reply.ok()?;
        }
        Err(_) => reply.err(UNKNOWN_COMMAND)?,
    }
    Ok(Outcome::Continue)
}
