//! The fixed command vocabulary.
//!
//! The protocol surface is a closed set of twenty upper-case command names.
//! Four of them carry behaviour of their own; the rest configure a user
//! interface this responder does not have and are acknowledged without
//! effect. The vocabulary lives here, next to the wire model, so the
//! registry can be checked against it and cannot drift silently.

use strum::{Display, EnumString};

/// Announces the key identifier for a later [`GET_PIN`].
pub const SET_KEY_INFO: &str = "SETKEYINFO";

/// Requests the secret for the announced key identifier.
pub const GET_PIN: &str = "GETPIN";

/// Queries responder metadata by topic, see [`InfoTopic`].
pub const GET_INFO: &str = "GETINFO";

/// Ends the session; the transport closes afterwards.
pub const BYE: &str = "BYE";

/// Administrative commands acknowledged with a bare `OK`.
///
/// Descriptions, prompts, titles, timeouts, button labels, quality-bar text
/// and repeat options all target an interactive dialog; with no dialog to
/// configure, they are accepted and dropped.
pub const ACKNOWLEDGED: &[&str] = &[
    "OPTION",
    "SETDESC",
    "SETPROMPT",
    "SETREPEAT",
    "SETREPEATERROR",
    "SETERROR",
    "SETOK",
    "SETNOTOK",
    "SETCANCEL",
    "CONFIRM",
    "MESSAGE",
    "SETQUALITYBAR",
    "SETQUALITYBAR_TT",
    "SETTITLE",
    "SETTIMEOUT",
    "CLEARPASSPHRASE",
];

/// Returns every command name in the vocabulary.
#[must_use]
pub fn all() -> Vec<&'static str> {
    let mut names = vec![SET_KEY_INFO, GET_PIN, GET_INFO, BYE];
    names.extend_from_slice(ACKNOWLEDGED);
    names
}

/// Topics accepted by `GETINFO`.
///
/// Matching is exact; the protocol uses lower-case topic tokens and any
/// other argument is rejected as an unknown command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum InfoTopic {
    /// Process identifier of the responder.
    Pid,
    /// Responder version string.
    Version,
    /// Implementation flavour token.
    Flavor,
}
