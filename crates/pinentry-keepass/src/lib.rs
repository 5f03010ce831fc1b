//! Protocol responder standing in for an interactive PIN-entry agent.
//!
//! The responder speaks the Assuan-style pinentry protocol over two byte
//! streams: commands arrive on stdin, replies leave on stdout. There is no
//! user interface. Administrative commands are acknowledged without effect
//! and the secret answering `GETPIN` comes from a [`SecretResolver`] instead
//! of a dialog. The one stateful part of the protocol is the handshake
//! between `SETKEYINFO`, which announces a key identifier, and a later
//! `GETPIN`, which asks for the matching secret.
//!
//! The crate is a library with a thin binary wrapper: [`run`] reads
//! [`Config`] from the environment, initialises telemetry, and wires the
//! process's standard streams into a [`Dispatcher`]. Telemetry goes to
//! stderr only; stdout is protocol surface.

mod capture;
mod commands;
mod config;
mod dispatch;
mod errors;
mod registry;
mod resolver;
mod session;
mod telemetry;

pub use capture::{CaptureSink, INBOUND_FILE, OUTBOUND_FILE, SessionCapture, TeeWriter};
pub use commands::Outcome;
pub use config::{Config, ConfigError, LogFormat};
pub use dispatch::Dispatcher;
pub use errors::{LaunchError, ServeError};
pub use registry::{CommandHandler, CommandRegistry, RegistryError};
pub use resolver::{EnvSecretResolver, SecretResolver, StaticSecretResolver};
pub use session::SessionContext;
pub use telemetry::{TelemetryError, TelemetryHandle};

use std::io;

/// Runs one responder session over the process's standard streams.
///
/// Returns once the caller sends `BYE` or closes stdin. The resolver is the
/// environment stand-in ([`EnvSecretResolver`]); diagnostic capture follows
/// the configuration.
///
/// # Errors
///
/// Returns a [`LaunchError`] when configuration or telemetry setup fails,
/// or when the session dies on a transport failure.
pub fn run() -> Result<(), LaunchError> {
    let config = Config::from_env()?;
    telemetry::initialise(&config)?;

    let resolver = EnvSecretResolver::default();
    let capture = SessionCapture::from_config(&config);
    let mut dispatcher = Dispatcher::new(&resolver);

    let stdin = io::stdin();
    let stdout = io::stdout();
    dispatcher.run(stdin.lock(), stdout.lock(), capture)?;
    Ok(())
}
