//! Error types for the calendar CLI.
//!
//! [`CommandError`] covers everything that can be wrong with a typed line
//! before it reaches the calendar. The REPL prints it and keeps going.

use calendar_zones::ZoneError;

/// A line that could not be turned into a [`Command`](crate::command::Command).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// A `"` was opened and never closed.
    #[error("unterminated quote")]
    UnterminatedQuote,

    /// The first word is not a known command.
    #[error("unknown command {0:?} (type 'help' for a list)")]
    Unknown(String),

    /// A known command with the wrong arguments.
    #[error("usage: {usage}")]
    Usage {
        /// The correct form of the command.
        usage: &'static str,
    },

    /// `delete` was given something other than a non-negative integer.
    #[error("invalid event id {0:?}: expected a number")]
    InvalidId(String),

    /// A date, time, or zone argument did not parse.
    #[error(transparent)]
    Zone(#[from] ZoneError),
}
