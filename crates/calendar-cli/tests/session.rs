//! End-to-end sessions against the `calendar` binary.
//!
//! Each test pipes a script into the real executable with no config file
//! and logging switched off, then inspects stdout.

#![allow(clippy::unwrap_used)]

use std::io::Write;
use std::process::{Command, Stdio};

fn run_session(script: &str) -> String {
    run_session_with(script, &[])
}

fn run_session_with(script: &str, env: &[(&str, &str)]) -> String {
    let mut command = Command::new(env!("CARGO_BIN_EXE_calendar"));
    command
        .env("CALENDAR_CONFIG", "/nonexistent/calendar-config.yaml")
        .env("RUST_LOG", "off")
        .env_remove("CALENDAR_DEFAULT_ZONE")
        .env_remove("CALENDAR_LOG_LEVEL")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in env {
        command.env(key, value);
    }

    let mut child = command.spawn().unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn booking_and_weekly_listing() {
    let out = run_session(
        "create \"Design review\" 2024-03-12 14:00 15:00 UTC\n\
         create \"Overlaps review\" 2024-03-12 14:30 15:30 UTC\n\
         create \"Night shift\" 2024-03-12 23:00 01:00 UTC\n\
         list week 2024-03-14 UTC\n\
         exit\n",
    );

    assert!(out.contains("Event created successfully. ID: 1"));
    assert!(out.contains("Error: Event conflicts with existing event 1."));
    assert!(out.contains("Event created successfully. ID: 2"));
    assert!(out.contains("Title: Design review"));
    assert!(out.contains("End: 2024-03-13 01:00 UTC"));
    assert!(!out.contains("Overlaps review"));
}

#[test]
fn end_of_input_exits_cleanly() {
    let out = run_session("help\n");
    assert!(out.contains("Commands:"));
    assert!(out.trim_end().ends_with("Goodbye."));
}

#[test]
fn errors_do_not_end_the_session() {
    let out = run_session("delete nope\nfly away\ndelete 7\nlist all\nquit\n");
    assert!(out.contains("invalid event id \"nope\""));
    assert!(out.contains("unknown command \"fly\""));
    assert!(out.contains("Error: Event 7 not found."));
    assert!(out.contains("No events stored."));
}

#[test]
fn demo_lets_exactly_one_thread_win() {
    let out = run_session("demo\nlist all\nexit\n");
    assert!(out.contains("Result: 1 succeeded, 1 failed"), "{out}");
    assert!(out.contains("Thread 1 Event") || out.contains("Thread 2 Event"));
}

#[test]
fn stress_audit_passes() {
    let out = run_session("stress\nexit\n");
    assert!(out.contains("Audit: OK, no overlapping events"), "{out}");
}

#[test]
fn default_zone_comes_from_environment() {
    let out = run_session_with(
        "create a 2024-03-11 00:00 01:00 UTC\nlist all\nexit\n",
        &[("CALENDAR_DEFAULT_ZONE", "PST")],
    );
    assert!(out.contains("Start: 2024-03-10 16:00 PST"), "{out}");
}

#[test]
fn bad_environment_zone_fails_startup() {
    let output = Command::new(env!("CARGO_BIN_EXE_calendar"))
        .env("CALENDAR_CONFIG", "/nonexistent/calendar-config.yaml")
        .env("CALENDAR_DEFAULT_ZONE", "Mars/Olympus")
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(!output.status.success());
}
