//! Interactive command line for the calendar event store.
//!
//! The binary (`calendar`) is a thin wrapper: it installs logging, loads
//! [`CliConfig`], and hands stdin/stdout to a [`Repl`]. Everything else lives
//! here so it can be exercised without a terminal.
//!
//! # Commands
//!
//! ```text
//! create "Title" YYYY-MM-DD HH:MM HH:MM TZ
//! list week YYYY-MM-DD TZ
//! list all [TZ]
//! dump
//! delete ID
//! demo
//! stress
//! help
//! exit | quit
//! ```

pub mod command;
pub mod config;
pub mod demo;
pub mod error;
pub mod repl;
pub mod stress;

pub use command::Command;
pub use config::{CliConfig, ConfigError};
pub use error::CommandError;
pub use repl::{Flow, Repl};
