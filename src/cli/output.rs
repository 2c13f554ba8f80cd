use colored::Colorize;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

/// Turns ANSI colouring on or off for every later message.
pub fn set_color_enabled(enabled: bool) {
    colored::control::set_override(enabled);
}

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info | MessageKind::Section => "INFO",
        MessageKind::Success => "SUCCESS",
        MessageKind::Warning => "WARNING",
        MessageKind::Error => "ERROR",
    }
}

/// Plain text for a message, before styling.
pub fn format_line(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => format!("{}: {}", label(kind), text),
    }
}

fn styled(kind: MessageKind, line: String) -> String {
    match kind {
        MessageKind::Success => line.bright_green().to_string(),
        MessageKind::Warning => line.bright_yellow().to_string(),
        MessageKind::Error => line.bright_red().to_string(),
        MessageKind::Section => line.bold().to_string(),
        MessageKind::Info => line,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let line = styled(kind, format_line(kind, message));
    match kind {
        MessageKind::Section => println!("\n{line}"),
        _ => println!("{line}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_carry_their_label() {
        assert_eq!(format_line(MessageKind::Success, "Saved"), "SUCCESS: Saved");
        assert_eq!(format_line(MessageKind::Error, 42), "ERROR: 42");
        assert_eq!(format_line(MessageKind::Section, " Goals "), "=== Goals ===");
    }
}
