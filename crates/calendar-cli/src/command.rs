//! Tokenizing and parsing of REPL input lines.

use calendar_types::EventId;
use calendar_zones::{Zone, parse_date, parse_time};
use chrono::{NaiveDate, NaiveTime};

use crate::error::CommandError;

/// Correct form of `create`.
pub const CREATE_USAGE: &str = "create \"Title\" YYYY-MM-DD HH:MM HH:MM TZ";
/// Correct forms of `list`.
pub const LIST_USAGE: &str = "list week YYYY-MM-DD TZ | list all [TZ]";
/// Correct form of `delete`.
pub const DELETE_USAGE: &str = "delete ID";

/// One parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Book a new event from zone-local wall-clock input.
    Create {
        /// Event title.
        title: String,
        /// Local date the event starts on.
        date: NaiveDate,
        /// Local start time.
        start: NaiveTime,
        /// Local end time. Not after `start` means the next day.
        end: NaiveTime,
        /// Zone the wall-clock values are in.
        zone: Zone,
    },
    /// Events overlapping the local week containing `date`.
    ListWeek {
        /// Any date in the week.
        date: NaiveDate,
        /// Zone for week bounds and rendering.
        zone: Zone,
    },
    /// Every stored event. Falls back to the configured zone.
    ListAll {
        /// Rendering zone, if given.
        zone: Option<Zone>,
    },
    /// Every stored event as JSON.
    Dump,
    /// Remove an event.
    Delete {
        /// Event to remove.
        id: EventId,
    },
    /// Threads racing for one slot.
    Demo,
    /// Randomized multi-threaded workload plus audit.
    Stress,
    /// Command summary.
    Help,
    /// Leave the REPL.
    Exit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let tokens = tokenize(line)?;
        let words: Vec<&str> = tokens.iter().map(String::as_str).collect();

        let command = match words.as_slice() {
            [] => return Ok(None),

            ["create", title, date, start, end, zone] => Self::Create {
                title: (*title).to_owned(),
                date: parse_date(date)?,
                start: parse_time(start)?,
                end: parse_time(end)?,
                zone: zone.parse()?,
            },
            ["create", ..] => return Err(usage(CREATE_USAGE)),

            ["list", "week", date, zone] => Self::ListWeek {
                date: parse_date(date)?,
                zone: zone.parse()?,
            },
            ["list", "all"] => Self::ListAll { zone: None },
            ["list", "all", zone] => Self::ListAll {
                zone: Some(zone.parse()?),
            },
            ["list", ..] => return Err(usage(LIST_USAGE)),

            ["delete", id] => Self::Delete { id: parse_id(id)? },
            ["delete", ..] => return Err(usage(DELETE_USAGE)),

            ["dump"] => Self::Dump,
            ["demo"] => Self::Demo,
            ["stress"] => Self::Stress,
            ["help"] => Self::Help,
            ["exit" | "quit"] => Self::Exit,
            [name @ ("dump" | "demo" | "stress" | "help" | "exit" | "quit"), ..] => {
                return Err(usage(bare_usage(name)));
            }

            [other, ..] => return Err(CommandError::Unknown((*other).to_owned())),
        };
        Ok(Some(command))
    }
}

/// Split a line on whitespace. Double quotes group words and are removed.
pub fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(CommandError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn parse_id(text: &str) -> Result<EventId, CommandError> {
    text.parse::<u64>()
        .map(EventId::new)
        .map_err(|_err| CommandError::InvalidId(text.to_owned()))
}

const fn usage(usage: &'static str) -> CommandError {
    CommandError::Usage { usage }
}

fn bare_usage(name: &str) -> &'static str {
    match name {
        "dump" => "dump",
        "demo" => "demo",
        "stress" => "stress",
        "help" => "help",
        "quit" => "quit",
        _ => "exit",
    }
}
