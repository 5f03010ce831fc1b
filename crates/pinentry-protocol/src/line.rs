//! Inbound protocol line model.
//!
//! One inbound line is either ignorable (blank or a `#` comment) or a
//! command invocation. An invocation splits at the first space: the prefix is
//! the command name (the whole line when no space exists) and the remainder
//! is the argument string, possibly empty. The split is purely positional;
//! leading whitespace is not trimmed, so a line starting with a space parses
//! to an empty name.

/// A parsed command invocation.
///
/// Borrows from the inbound line; the dispatcher parses, dispatches and
/// discards within one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandLine<'a> {
    name: &'a str,
    args: &'a str,
}

impl<'a> CommandLine<'a> {
    /// Parses one inbound line with its terminator already stripped.
    ///
    /// Returns `None` for ignorable lines (zero-length lines and `#`
    /// comments), which produce no reply and never reach the splitter.
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (name, args) = line.split_once(' ').unwrap_or((line, ""));
        Some(Self { name, args })
    }

    /// Returns the command name token. Matching is case-sensitive; the
    /// vocabulary uses upper-case names.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Returns the argument remainder, empty when the line had none.
    #[must_use]
    pub const fn args(&self) -> &'a str {
        self.args
    }
}
