//! Shared CLI output helpers for consistent operator-facing text.

use std::fmt::Display;

use owo_colors::OwoColorize;

const RULE_WIDTH: usize = 56;

/// Print the application name and version.
pub fn header(version: &str) {
    println!("{} {}", "marketwatch".bold(), version.dimmed());
}

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("  {:<16} {value}", label.dimmed());
}

/// Print a successful status line.
pub fn ok(message: &str) {
    println!("{} {message}", "✓".green());
}

/// Print a warning status line.
pub fn warn(message: &str) {
    println!("{} {message}", "⚠".yellow());
}

/// Print an error status line.
pub fn error(message: &str) {
    eprintln!("{} {message}", "✗".red());
}

/// Print a single-line note.
pub fn note(message: &str) {
    println!("{}", message.dimmed());
}

/// Print a multi-line block (tables, snapshots) as-is.
pub fn block(text: &str) {
    println!("{text}");
}

/// Format a value in cyan.
pub fn highlight(value: impl Display) -> String {
    format!("{}", value.to_string().cyan())
}
