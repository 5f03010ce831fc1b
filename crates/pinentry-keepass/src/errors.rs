//! Transport and startup error types.
//!
//! Protocol-level rejections are not represented here: they are `ERR`
//! reply lines and the session continues. These types cover the failures
//! that stop the process: a broken transport mid-session, or a startup
//! problem before the greeting.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Fatal transport failures during a session.
///
/// Both variants end the process; the protocol has no resynchronisation
/// mechanism, so a half-broken transport cannot be resumed.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The inbound stream failed other than by ending cleanly.
    #[error("failed to read inbound line: {source}")]
    Read {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A reply could not be written or flushed.
    #[error("failed to write reply: {source}")]
    Write {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl ServeError {
    /// Wraps a read failure on the inbound stream.
    #[must_use]
    pub const fn read(source: io::Error) -> Self {
        Self::Read { source }
    }

    /// Wraps a write failure on the reply stream.
    #[must_use]
    pub const fn write(source: io::Error) -> Self {
        Self::Write { source }
    }
}

/// Errors that stop the responder before or during a session.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Configuration could not be read from the environment.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Telemetry could not be initialised.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    /// The session died on a transport failure.
    #[error(transparent)]
    Serve(#[from] ServeError),
}
