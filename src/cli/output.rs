use std::{fmt, io::IsTerminal};

use colored::Colorize;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Warning,
    Error,
}

/// Prints command output, colouring it only for terminals that accept colour.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    use_color: bool,
}

impl Formatter {
    pub fn new(color_enabled: bool) -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        Self {
            use_color: color_enabled && !no_color && std::io::stdout().is_terminal(),
        }
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Header, format!("=== {title} ===")));
    }

    pub fn print_line(&self, message: impl fmt::Display) {
        println!("{message}");
    }

    pub fn print_warning(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Warning, format!("WARNING: {message}")));
    }

    pub fn print_error(&self, message: impl fmt::Display) {
        eprintln!("{}", self.apply_style(Style::Error, format!("ERROR: {message}")));
    }

    /// Prints a row with a colour swatch when colour is on, e.g. `■ income  12.00`.
    pub fn print_swatch(&self, hex: &str, line: impl fmt::Display) {
        match parse_hex(hex).filter(|_| self.use_color) {
            Some((r, g, b)) => println!("{} {line}", "■".truecolor(r, g, b)),
            None => println!("  {line}"),
        }
    }

    pub fn print_two_column(&self, entries: &[(&str, &str)]) {
        let label_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);
        for (label, value) in entries {
            println!("  {label:<label_width$}  {value}");
        }
    }

    fn apply_style(&self, style: Style, message: impl fmt::Display) -> String {
        let text = message.to_string();
        if !self.use_color {
            return text;
        }
        match style {
            Style::Header => text.bold().to_string(),
            Style::Warning => text.yellow().to_string(),
            Style::Error => text.red().to_string(),
        }
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
