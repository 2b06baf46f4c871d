//! Shared type definitions for the calendar event store.
//!
//! This crate is the single source of truth for the values that cross crate
//! boundaries: the store, the time-zone helpers, and the command-line front
//! end all speak in these types.
//!
//! # Modules
//!
//! - [`ids`] -- The integer [`EventId`] handed out by the store
//! - [`time`] -- UTC [`Instant`]s and half-open [`Interval`]s
//! - [`event`] -- The stored [`Event`] record

pub mod event;
pub mod ids;
pub mod time;

// Re-export all public types at crate root for convenience.
pub use event::Event;
pub use ids::EventId;
pub use time::{Instant, Interval, IntervalError, SECONDS_PER_DAY};
