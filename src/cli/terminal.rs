//! Terminal capability detection and colouring

use owo_colors::{OwoColorize, colors::css};

/// Width the fixed-column inventory table needs.
const TABLE_WIDTH: u16 = 70;

/// Whether stdout can show colour.
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Whether the terminal is too narrow for the inventory table.
///
/// Unknown widths (pipes, files) count as wide.
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < TABLE_WIDTH)
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Banner,
    Dim,
}

fn paint(text: &str, tone: Tone) -> String {
    if !supports_color() {
        return text.to_string();
    }
    match tone {
        Tone::Success => text.fg::<css::Green>().to_string(),
        Tone::Warning => text.fg::<css::Orange>().to_string(),
        Tone::Banner => text.fg::<css::LightBlue>().bold().to_string(),
        Tone::Dim => text.dimmed().to_string(),
    }
}

/// Extension trait for colouring menu and command output
pub trait Colorize {
    /// Green, for completed actions
    fn success(&self) -> String;
    /// Amber, for rejected actions
    fn warning(&self) -> String;
    /// Bold blue, for the menu banner
    fn info(&self) -> String;
    /// Dimmed, for hints
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(self.as_ref(), Tone::Success)
    }

    fn warning(&self) -> String {
        paint(self.as_ref(), Tone::Warning)
    }

    fn info(&self) -> String {
        paint(self.as_ref(), Tone::Banner)
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), Tone::Dim)
    }
}
