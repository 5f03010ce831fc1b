//! Diagnostic capture of raw protocol bytes.
//!
//! For offline inspection the raw inbound and outbound streams can be
//! duplicated into append files. Capture is strictly a side channel: it
//! never alters protocol bytes or ordering, and its own I/O failures are
//! logged at `warn` and disable the affected sink; the session itself
//! never notices.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::warn;

use crate::config::Config;

/// Tracing target for capture operations.
const CAPTURE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::capture");

/// Inbound capture file name inside the capture directory.
pub const INBOUND_FILE: &str = "inbound.bin";

/// Outbound capture file name inside the capture directory.
pub const OUTBOUND_FILE: &str = "outbound.bin";

/// Best-effort append sink for one direction of the byte stream.
///
/// A sink that fails to open or write reports a warning and becomes inert.
#[derive(Debug, Default)]
pub struct CaptureSink {
    file: Option<File>,
    direction: &'static str,
}

impl CaptureSink {
    /// Creates a sink that records nothing.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Opens an append sink at `path`.
    ///
    /// Open failures follow the capture error policy: the failure is logged
    /// and the returned sink is inert.
    #[must_use]
    pub fn open(path: &Path, direction: &'static str) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                file: Some(file),
                direction,
            },
            Err(error) => {
                warn!(
                    target: CAPTURE_TARGET,
                    %error,
                    path = %path.display(),
                    direction,
                    "capture unavailable"
                );
                Self {
                    file: None,
                    direction,
                }
            }
        }
    }

    /// Appends raw bytes, disabling the sink on failure.
    pub fn record(&mut self, bytes: &[u8]) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        if let Err(error) = file.write_all(bytes) {
            warn!(
                target: CAPTURE_TARGET,
                %error,
                direction = self.direction,
                "capture write failed, disabling"
            );
            self.file = None;
        }
    }

    /// Returns `true` while the sink is still recording.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.file.is_some()
    }
}

/// Capture pair for one session: inbound command bytes, outbound replies.
#[derive(Debug, Default)]
pub struct SessionCapture {
    inbound: CaptureSink,
    outbound: CaptureSink,
}

impl SessionCapture {
    /// Creates a capture pair that records nothing.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Builds the capture pair described by the configuration.
    ///
    /// Without a configured capture directory both sinks are inert; with
    /// one, [`INBOUND_FILE`] and [`OUTBOUND_FILE`] are appended inside it.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        config.capture_dir().map_or_else(Self::disabled, |dir| Self {
            inbound: CaptureSink::open(&dir.join(INBOUND_FILE), "inbound"),
            outbound: CaptureSink::open(&dir.join(OUTBOUND_FILE), "outbound"),
        })
    }

    /// Splits the pair for the dispatcher: the inbound sink is fed by the
    /// read loop, the outbound sink rides inside a [`TeeWriter`].
    #[must_use]
    pub fn into_parts(self) -> (CaptureSink, CaptureSink) {
        (self.inbound, self.outbound)
    }
}

/// Writer adapter duplicating written bytes into a capture sink.
///
/// Errors from the real stream propagate untouched, and only bytes the
/// stream accepted are recorded, so the capture mirrors the wire exactly.
#[derive(Debug)]
pub struct TeeWriter<W> {
    inner: W,
    capture: CaptureSink,
}

impl<W: Write> TeeWriter<W> {
    /// Wraps a writer with a capture sink.
    #[must_use]
    pub const fn new(inner: W, capture: CaptureSink) -> Self {
        Self { inner, capture }
    }
}

impl<W: Write> Write for TeeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        if let Some(accepted) = buf.get(..written) {
            self.capture.record(accepted);
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
