//! Command registry mapping protocol names to handler behaviours.
//!
//! The registry is built once at session start and is read-only afterwards.
//! Handlers are a closed tagged set ([`CommandHandler`]) rather than boxed
//! closures, so dispatch stays exhaustive and the mapping cannot drift from
//! the protocol vocabulary unnoticed; [`CommandRegistry::standard`] is
//! checked against the full vocabulary by test.

use std::collections::HashMap;

use thiserror::Error;

use pinentry_protocol::vocabulary;

/// Behaviour bound to a command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandHandler {
    /// Reply `OK` and ignore the arguments. Administrative commands with no
    /// dialog to configure.
    Acknowledge,
    /// Store the announced key identifier in the session context.
    SetKeyInfo,
    /// Resolve and emit the secret for the announced identifier.
    GetPin,
    /// Answer metadata topic queries.
    GetInfo,
    /// End the session with no reply.
    Terminate,
}

/// Errors raised while assembling a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The command name is already bound to a handler.
    #[error("command '{name}' is already registered")]
    Duplicate {
        /// Name that was registered twice.
        name: &'static str,
    },
}

/// Immutable name-to-handler mapping for one session.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandHandler>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the standard registry covering the whole protocol vocabulary.
    #[must_use]
    pub fn standard() -> Self {
        let mut commands = HashMap::new();
        for name in vocabulary::ACKNOWLEDGED {
            commands.insert(*name, CommandHandler::Acknowledge);
        }
        commands.insert(vocabulary::SET_KEY_INFO, CommandHandler::SetKeyInfo);
        commands.insert(vocabulary::GET_PIN, CommandHandler::GetPin);
        commands.insert(vocabulary::GET_INFO, CommandHandler::GetInfo);
        commands.insert(vocabulary::BYE, CommandHandler::Terminate);
        Self { commands }
    }

    /// Binds a handler to a command name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] when the name is already bound.
    /// The vocabulary is a closed set; silent rebinding would mask drift
    /// between the protocol surface and the registry.
    pub fn register(
        &mut self,
        name: &'static str,
        handler: CommandHandler,
    ) -> Result<(), RegistryError> {
        if self.commands.contains_key(name) {
            return Err(RegistryError::Duplicate { name });
        }
        self.commands.insert(name, handler);
        Ok(())
    }

    /// Looks up the handler for a command name. Matching is exact and
    /// case-sensitive.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<CommandHandler> {
        self.commands.get(name).copied()
    }

    /// Returns the number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` when no commands are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
