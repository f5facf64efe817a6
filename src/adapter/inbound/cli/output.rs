//! Terminal output for CLI handlers.
//!
//! Three modes, fixed once from the global flags: human (colored symbols and
//! indented fields), quiet (warnings and errors only) and JSON, where every
//! message is one `{"type", "payload"}` line.

use std::fmt::Display;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};

/// Global output flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    /// Number of `-v` flags.
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self { json, quiet, verbose }
    }

    const fn mode(self) -> Mode {
        if self.json {
            Mode::Json
        } else if self.quiet {
            Mode::Quiet
        } else {
            Mode::Human
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Human,
    Quiet,
    Json,
}

static CONFIG: RwLock<OutputConfig> = RwLock::new(OutputConfig::new(false, false, 0));

/// Install the flags for the rest of the process.
pub fn configure(config: OutputConfig) {
    *CONFIG.write() = config;
}

fn mode() -> Mode {
    CONFIG.read().mode()
}

#[must_use]
pub fn is_json() -> bool {
    mode() == Mode::Json
}

#[must_use]
pub fn is_quiet() -> bool {
    mode() == Mode::Quiet
}

#[must_use]
pub fn verbosity() -> u8 {
    CONFIG.read().verbose
}

fn json_line(kind: &str, payload: Value) -> String {
    json!({ "type": kind, "payload": payload }).to_string()
}

/// Print `kind`/`payload` in JSON mode, or run `human` unless quiet.
fn emit(kind: &str, payload: impl FnOnce() -> Value, human: impl FnOnce()) {
    match mode() {
        Mode::Json => println!("{}", json_line(kind, payload())),
        Mode::Quiet => {}
        Mode::Human => human(),
    }
}

/// Program name and version, followed by a blank line.
pub fn header(version: &str) {
    emit(
        "header",
        || json!({ "app": env!("CARGO_PKG_NAME"), "version": version }),
        || println!("{} {}\n", env!("CARGO_PKG_NAME").bold(), version.dimmed()),
    );
}

pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        || json!({ "label": label, "value": value }),
        || println!("  {:<12} {}", label.dimmed(), value),
    );
}

pub fn success(message: &str) {
    emit(
        "success",
        || json!({ "message": message }),
        || println!("  {} {message}", "✓".green()),
    );
}

/// Shown in quiet mode too.
pub fn warning(message: &str) {
    if is_json() {
        println!("{}", json_line("warning", json!({ "message": message })));
    } else {
        println!("  {} {message}", "⚠".yellow());
    }
}

/// Always printed, to stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json_line("error", json!({ "message": message })));
    } else {
        eprintln!("  {} {message}", "×".red());
    }
}

pub fn section(title: &str) {
    emit(
        "section",
        || json!({ "title": title }),
        || println!("\n{}", title.bold()),
    );
}

/// Indented block of text, such as a rendered table.
pub fn lines(content: &str) {
    emit(
        "lines",
        || json!({ "content": content }),
        || content.lines().for_each(|line| println!("  {line}")),
    );
}

pub fn hint(message: &str) {
    emit(
        "hint",
        || json!({ "message": message }),
        || println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed()),
    );
}

/// Raw JSON document for commands with their own result shape.
pub fn json_output(value: Value) {
    println!("{value}");
}

/// Cyan in human mode, plain in JSON.
pub fn highlight(value: impl Display) -> String {
    if is_json() {
        value.to_string()
    } else {
        value.cyan().to_string()
    }
}

pub fn muted(value: impl Display) -> String {
    if is_json() {
        value.to_string()
    } else {
        value.dimmed().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_wins_over_quiet() {
        assert_eq!(OutputConfig::new(true, true, 0).mode(), Mode::Json);
        assert_eq!(OutputConfig::new(false, true, 0).mode(), Mode::Quiet);
        assert_eq!(OutputConfig::default().mode(), Mode::Human);
    }

    #[test]
    fn json_lines_are_tagged() {
        let line: Value = serde_json::from_str(&json_line("field", json!({ "label": "venues" }))).unwrap();
        assert_eq!(line["type"], "field");
        assert_eq!(line["payload"]["label"], "venues");
    }
}
