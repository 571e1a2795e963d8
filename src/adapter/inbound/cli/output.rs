//! Terminal output for the CLI.
//!
//! Every helper has a human rendering and a JSON rendering. In JSON mode each
//! call prints one `{"type": .., "payload": ..}` line so scripts can follow a
//! `watch` session line by line. Quiet mode hides decoration but never
//! warnings, errors, or the results themselves.

use std::fmt::Display;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};

/// Output settings taken from the global CLI flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static OUTPUT: RwLock<OutputConfig> = RwLock::new(OutputConfig::new(false, false, 0));

/// How a message behaves under `--quiet`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Level {
    Decoration,
    Important,
}

/// Apply the global flags. Called once from `main`.
pub fn configure(config: OutputConfig) {
    *OUTPUT.write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    OUTPUT.read().json
}

#[must_use]
pub fn verbosity() -> u8 {
    OUTPUT.read().verbose
}

fn emit(kind: &str, payload: Value, level: Level, human: impl FnOnce()) {
    let config = *OUTPUT.read();
    if config.json {
        println!("{}", json!({ "type": kind, "payload": payload }));
    } else if !(config.quiet && level == Level::Decoration) {
        human();
    }
}

/// Program name and version.
pub fn header(version: &str) {
    emit(
        "header",
        json!({ "app": "fairprice", "version": version }),
        Level::Decoration,
        || println!("{} {}\n", "fairprice".bold(), version.dimmed()),
    );
}

/// A `label value` pair. JSON payloads carry the value as a string.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        json!({ "label": label, "value": value }),
        Level::Important,
        || println!("  {:<14} {value}", label.dimmed()),
    );
}

pub fn section(title: &str) {
    emit("section", json!({ "title": title }), Level::Decoration, || {
        println!("\n{}", title.bold());
    });
}

pub fn success(message: &str) {
    emit("success", json!({ "message": message }), Level::Decoration, || {
        println!("  {} {message}", "✓".green());
    });
}

pub fn warning(message: &str) {
    emit("warning", json!({ "message": message }), Level::Important, || {
        println!("  {} {message}", "⚠".yellow());
    });
}

pub fn note(message: &str) {
    emit("note", json!({ "message": message }), Level::Decoration, || {
        println!("  {}", message.dimmed());
    });
}

pub fn hint(message: &str) {
    emit("hint", json!({ "message": message }), Level::Decoration, || {
        println!("  {}: {}", "hint".cyan(), message.dimmed());
    });
}

/// Indented block such as a rendered table or TOML document.
pub fn lines(content: &str) {
    emit("lines", json!({ "content": content }), Level::Important, || {
        for line in content.lines() {
            println!("  {line}");
        }
    });
}

/// Errors always go to stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else {
        eprintln!("  {} {message}", "×".red());
    }
}

/// Print a ready-made JSON document as one line.
pub fn json_output(value: Value) {
    println!("{value}");
}

fn paint(value: impl Display, style: impl FnOnce(&str) -> String) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        style(&value)
    }
}

/// A price that came from the market.
pub fn positive(value: impl Display) -> String {
    paint(value, |v| v.green().to_string())
}

/// A missing or failed result.
pub fn negative(value: impl Display) -> String {
    paint(value, |v| v.red().to_string())
}

/// A reference price standing in for the market.
pub fn highlight(value: impl Display) -> String {
    paint(value, |v| v.cyan().to_string())
}
