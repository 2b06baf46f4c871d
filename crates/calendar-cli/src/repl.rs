//! The read-eval-print loop.
//!
//! [`Repl`] owns the [`Calendar`] and writes all user-facing output to a
//! generic writer, so sessions can be driven from tests with a `Vec<u8>`.
//! Diagnostics go through `tracing`, never to the writer.

use std::io::{self, BufRead, Write};

use calendar_store::{Calendar, CalendarError};
use calendar_types::{Event, Instant, Interval};
use calendar_zones::{Zone, ZoneError, event_window, utc_to_local, week_bounds};
use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::debug;

use crate::command::{Command, CREATE_USAGE, LIST_USAGE};
use crate::config::CliConfig;
use crate::{demo, stress};

const RULE: &str = "----------------------------------------";
const PROMPT: &str = "> ";

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop.
    Exit,
}

/// An interactive session over one calendar.
#[derive(Debug)]
pub struct Repl<W> {
    calendar: Calendar,
    config: CliConfig,
    out: W,
}

impl<W: Write> Repl<W> {
    /// A session with an empty calendar, writing to `out`.
    pub const fn new(config: CliConfig, out: W) -> Self {
        Self {
            calendar: Calendar::new(),
            config,
            out,
        }
    }

    /// The session's calendar.
    pub const fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Consume the session and hand back the writer.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Print the banner, then prompt and handle lines until `exit` or end of
    /// input.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        writeln!(self.out, "=== Calendar Management System ===")?;
        writeln!(self.out, "Type 'help' for commands.")?;

        // Non-UTF-8 input is decoded lossily and rejected like any other
        // malformed line.
        let mut buf = Vec::new();
        loop {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                writeln!(self.out)?;
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if self.handle_line(&line)? == Flow::Exit {
                break;
            }
        }

        writeln!(self.out, "Goodbye.")?;
        self.out.flush()
    }

    /// Parse and execute one line. Errors in the line are reported to the
    /// writer; only I/O failures are returned.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        match Command::parse(line) {
            Ok(None) => Ok(Flow::Continue),
            Ok(Some(command)) => self.execute(command),
            Err(err) => {
                debug!(error = %err, "command rejected");
                writeln!(self.out, "Error: {err}")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn execute(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::Create {
                title,
                date,
                start,
                end,
                zone,
            } => self.create(&title, date, start, end, zone)?,
            Command::ListWeek { date, zone } => self.list_week(date, zone)?,
            Command::ListAll { zone } => {
                let zone = zone.unwrap_or(self.config.display.default_zone);
                let events = self.calendar.snapshot();
                if events.is_empty() {
                    writeln!(self.out, "No events stored.")?;
                } else {
                    self.print_events(&events, zone)?;
                }
            }
            Command::Dump => self.dump()?,
            Command::Delete { id } => {
                if self.calendar.delete_event(id) {
                    writeln!(self.out, "Event {id} deleted successfully.")?;
                } else {
                    writeln!(self.out, "Error: Event {id} not found.")?;
                }
            }
            Command::Demo => self.demo()?,
            Command::Stress => self.stress()?,
            Command::Help => self.help()?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn create(
        &mut self,
        title: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        zone: Zone,
    ) -> io::Result<()> {
        let span = match event_window(date, start, end, zone) {
            Ok(span) => span,
            Err(err) => return writeln!(self.out, "Error: {err}"),
        };

        match self.calendar.create_in(title, span) {
            Ok(id) => writeln!(self.out, "Event created successfully. ID: {id}"),
            Err(CalendarError::Conflict { existing, .. }) => writeln!(
                self.out,
                "Error: Event conflicts with existing event {existing}."
            ),
            Err(err) => writeln!(self.out, "Error: {err}"),
        }
    }

    fn list_week(&mut self, date: NaiveDate, zone: Zone) -> io::Result<()> {
        let week = match week_bounds(date, zone) {
            Ok(week) => week,
            Err(err) => return writeln!(self.out, "Error: {err}"),
        };

        let events = self.calendar.events_in(&week);
        if events.is_empty() {
            return writeln!(self.out, "No events found for this week.");
        }
        writeln!(self.out, "Weekly Events ({}):", render_span(&week, zone))?;
        self.print_events(&events, zone)
    }

    fn print_events(&mut self, events: &[Event], zone: Zone) -> io::Result<()> {
        writeln!(self.out, "{RULE}")?;
        for event in events {
            match (utc_to_local(event.start(), zone), utc_to_local(event.end(), zone)) {
                (Ok(start), Ok(end)) => {
                    writeln!(self.out, "ID: {}", event.id())?;
                    writeln!(self.out, "Title: {}", event.title())?;
                    writeln!(self.out, "Start: {start} {zone}")?;
                    writeln!(self.out, "End: {end} {zone}")?;
                }
                (Err(err), _) | (_, Err(err)) => {
                    writeln!(self.out, "ID: {} (cannot display: {err})", event.id())?;
                }
            }
            writeln!(self.out, "{RULE}")?;
        }
        Ok(())
    }

    fn dump(&mut self) -> io::Result<()> {
        let events = self.calendar.snapshot();
        match serde_json::to_string_pretty(&events) {
            Ok(json) => writeln!(self.out, "{json}"),
            Err(err) => writeln!(self.out, "Error: {err}"),
        }
    }

    fn demo(&mut self) -> io::Result<()> {
        let settings = self.config.demo;
        let now = Instant::from_secs(Utc::now().timestamp());
        let Some(span) = demo::window(now, &settings) else {
            return writeln!(self.out, "Error: demo window is out of range");
        };

        writeln!(self.out, "=== Concurrency Demonstration ===")?;
        writeln!(
            self.out,
            "{} threads racing to book {}...",
            settings.threads,
            render_span(&span, Zone::Utc)
        )?;

        let report = demo::race(&self.calendar, span, settings.threads);
        for outcome in &report.outcomes {
            match &outcome.result {
                Ok(id) => writeln!(
                    self.out,
                    "Thread {}: created event ID {id}",
                    outcome.thread
                )?,
                Err(CalendarError::Conflict { existing, .. }) => writeln!(
                    self.out,
                    "Thread {}: refused (conflicts with event {existing})",
                    outcome.thread
                )?,
                Err(err) => writeln!(self.out, "Thread {}: refused ({err})", outcome.thread)?,
            }
        }
        writeln!(
            self.out,
            "Result: {} succeeded, {} failed",
            report.successes(),
            report.failures()
        )
    }

    fn stress(&mut self) -> io::Result<()> {
        let config = self.config.stress;
        writeln!(self.out, "=== Stress Test ===")?;
        writeln!(
            self.out,
            "{} threads x {} attempts (seed {})...",
            config.threads, config.attempts_per_thread, config.seed
        )?;

        let report = stress::run(&config);
        writeln!(
            self.out,
            "Created: {}, refused: {}, stored: {}",
            report.created, report.refused, report.stored
        )?;
        match report.overlap {
            None if report.is_clean() => writeln!(self.out, "Audit: OK, no overlapping events"),
            None => writeln!(self.out, "Audit: FAILED, store is inconsistent"),
            Some((first, second)) => writeln!(
                self.out,
                "Audit: FAILED, events {first} and {second} overlap"
            ),
        }
    }

    fn help(&mut self) -> io::Result<()> {
        writeln!(self.out, "Commands:")?;
        writeln!(self.out, "  {CREATE_USAGE}")?;
        writeln!(self.out, "  {LIST_USAGE}")?;
        writeln!(self.out, "  dump")?;
        writeln!(self.out, "  delete ID")?;
        writeln!(self.out, "  demo")?;
        writeln!(self.out, "  stress")?;
        writeln!(self.out, "  help")?;
        writeln!(self.out, "  exit | quit")?;
        writeln!(self.out, "Zones: {}", Zone::supported_names())
    }
}

fn render_span(span: &Interval, zone: Zone) -> String {
    let shown = |instant: Instant| {
        utc_to_local(instant, zone).unwrap_or_else(|err: ZoneError| err.to_string())
    };
    format!("{} - {} {zone}", shown(span.start()), shown(span.end()))
}
