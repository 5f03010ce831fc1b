//! Environment-driven configuration.
//!
//! The protocol surface has no command-line flags, so the few knobs the
//! responder exposes come from environment variables with defaults suited
//! to running under a credential-manager agent. Secrets are not
//! configuration: the resolver owns its own variable (see
//! [`crate::EnvSecretResolver`]).

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use strum::{Display, EnumString};
use thiserror::Error;

/// Environment variable holding the tracing filter expression.
pub const LOG_FILTER_VAR: &str = "PINENTRY_KEEPASS_LOG";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_VAR: &str = "PINENTRY_KEEPASS_LOG_FORMAT";

/// Environment variable enabling diagnostic capture into a directory.
pub const CAPTURE_DIR_VAR: &str = "PINENTRY_KEEPASS_CAPTURE_DIR";

/// Default tracing filter: quiet unless something is wrong.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Supported log output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Compact,
    /// Structured JSON suitable for ingestion by logging stacks.
    Json,
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable held a value outside its accepted set.
    #[error("invalid value '{value}' for {variable}: {source}")]
    InvalidLogFormat {
        /// Variable that held the value.
        variable: &'static str,
        /// The rejected value.
        value: String,
        /// Parse failure from the format enum.
        #[source]
        source: strum::ParseError,
    },
    /// A variable held bytes that are not valid Unicode.
    #[error("{variable} is not valid unicode")]
    NotUnicode {
        /// Variable that held the bytes.
        variable: &'static str,
    },
}

/// Runtime configuration resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    log_filter: String,
    log_format: LogFormat,
    capture_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            log_format: LogFormat::default(),
            capture_dir: None,
        }
    }
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// Absent variables fall back to defaults; capture stays disabled
    /// unless [`CAPTURE_DIR_VAR`] is set.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable is present but holds an
    /// invalid or non-Unicode value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|variable| env::var_os(variable))
    }

    /// Reads configuration through an injectable variable lookup.
    pub(crate) fn from_lookup(
        lookup: &dyn Fn(&str) -> Option<OsString>,
    ) -> Result<Self, ConfigError> {
        let log_filter =
            string_var(lookup, LOG_FILTER_VAR)?.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());
        let log_format = string_var(lookup, LOG_FORMAT_VAR)?
            .map(|value| parse_log_format(&value))
            .transpose()?
            .unwrap_or_default();
        let capture_dir = lookup(CAPTURE_DIR_VAR).map(PathBuf::from);
        Ok(Self {
            log_filter,
            log_format,
            capture_dir,
        })
    }

    /// Returns the tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the diagnostic capture directory when capture is enabled.
    #[must_use]
    pub fn capture_dir(&self) -> Option<&Path> {
        self.capture_dir.as_deref()
    }
}

fn string_var(
    lookup: &dyn Fn(&str) -> Option<OsString>,
    variable: &'static str,
) -> Result<Option<String>, ConfigError> {
    lookup(variable)
        .map(|value| {
            value
                .into_string()
                .map_err(|_| ConfigError::NotUnicode { variable })
        })
        .transpose()
}

fn parse_log_format(value: &str) -> Result<LogFormat, ConfigError> {
    LogFormat::from_str(value).map_err(|source| ConfigError::InvalidLogFormat {
        variable: LOG_FORMAT_VAR,
        value: value.to_owned(),
        source,
    })
}
