//! Mutable per-session protocol state.

/// State carried across commands within one session.
///
/// The only stateful handshake in the protocol is `SETKEYINFO` announcing a
/// key identifier that a later `GETPIN` consults. The context is owned by
/// the dispatch loop and handed to handlers by mutable reference; the loop
/// is single-threaded, so no synchronisation applies.
#[derive(Debug, Default)]
pub struct SessionContext {
    key_identifier: String,
}

impl SessionContext {
    /// Creates a context with no announced key identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the announced key identifier verbatim.
    ///
    /// The identifier is never validated. An empty announcement reads back
    /// as unset; announcing again replaces the previous value.
    pub fn set_key_identifier(&mut self, identifier: impl Into<String>) {
        self.key_identifier = identifier.into();
    }

    /// Returns the announced key identifier, or `None` while unset.
    #[must_use]
    pub fn key_identifier(&self) -> Option<&str> {
        (!self.key_identifier.is_empty()).then_some(self.key_identifier.as_str())
    }
}
