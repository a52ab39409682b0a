use std::fmt::Write;

use colored::Color;

use crate::{event::Event, level::Severity};

const COLOR_RESET: &str = "\x1b[0m";

pub fn level_color(level: Severity) -> Color {
    match level {
        Severity::Trace => Color::BrightBlue,
        Severity::Debug => Color::Cyan,
        Severity::Info => Color::Green,
        Severity::Warn => Color::Yellow,
        Severity::Error => Color::Red,
        Severity::Fatal => Color::Magenta,
    }
}

/// `HH:MM:SS LEVEL file:line: [function] message`
///
/// The file and function segments follow `show_file_line` / `show_function`;
/// the level name is wrapped in its ANSI color when `use_colors` is set.
pub fn format_console(event: &Event<'_>) -> String {
    let config = event.config;
    let mut line = String::with_capacity(64 + event.message.len());
    let _ = write!(line, "{} ", event.time.format("%H:%M:%S"));
    if config.use_colors {
        let _ = write!(
            line,
            "\x1b[{}m{:<5}{COLOR_RESET} ",
            level_color(event.level).to_fg_str(),
            event.level
        );
    } else {
        let _ = write!(line, "{:<5} ", event.level);
    }
    if config.show_file_line {
        let _ = write!(line, "{}:{}: ", event.file, event.line);
    }
    if config.show_function {
        let _ = write!(line, "[{}] ", event.function);
    }
    line.push_str(event.message);
    line
}

/// `YYYY-MM-DD HH:MM:SS LEVEL file:line [function]: message`, never colored.
pub fn format_file(event: &Event<'_>) -> String {
    let config = event.config;
    let mut line = String::with_capacity(64 + event.message.len());
    let _ = write!(
        line,
        "{} {:<5}",
        event.time.format("%Y-%m-%d %H:%M:%S"),
        event.level
    );
    if config.show_file_line {
        let _ = write!(line, " {}:{}", event.file, event.line);
    }
    if config.show_function {
        let _ = write!(line, " [{}]", event.function);
    }
    line.push_str(": ");
    line.push_str(event.message);
    line
}
