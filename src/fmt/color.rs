//! The sixteen classic console colors. Names are what users type in config files and
//! on the command line; each maps onto a fixed 4-bit SGR code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named console color. `Gray` is the light non-bright white, `DarkGray` the bright black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsoleColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl ConsoleColor {
    /// Terminates any active SGR styling so subsequent text returns to the terminal default.
    pub const RESET: &'static str = "\x1b[0m";

    /// Iteration order matches the classic console palette index.
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkCyan,
        Self::DarkRed,
        Self::DarkMagenta,
        Self::DarkYellow,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Cyan,
        Self::Red,
        Self::Magenta,
        Self::Yellow,
        Self::White,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::DarkBlue => "DarkBlue",
            Self::DarkGreen => "DarkGreen",
            Self::DarkCyan => "DarkCyan",
            Self::DarkRed => "DarkRed",
            Self::DarkMagenta => "DarkMagenta",
            Self::DarkYellow => "DarkYellow",
            Self::Gray => "Gray",
            Self::DarkGray => "DarkGray",
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Cyan => "Cyan",
            Self::Red => "Red",
            Self::Magenta => "Magenta",
            Self::Yellow => "Yellow",
            Self::White => "White",
        }
    }

    /// Foreground SGR parameter (30–37 normal, 90–97 bright).
    #[must_use]
    pub const fn fg_code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::DarkRed => 31,
            Self::DarkGreen => 32,
            Self::DarkYellow => 33,
            Self::DarkBlue => 34,
            Self::DarkMagenta => 35,
            Self::DarkCyan => 36,
            Self::Gray => 37,
            Self::DarkGray => 90,
            Self::Red => 91,
            Self::Green => 92,
            Self::Yellow => 93,
            Self::Blue => 94,
            Self::Magenta => 95,
            Self::Cyan => 96,
            Self::White => 97,
        }
    }

    /// Background uses the same palette offset by 10.
    #[must_use]
    pub const fn bg_code(self) -> u8 {
        self.fg_code() + 10
    }

    #[must_use]
    pub fn fg_ansi(self) -> String {
        format!("\x1b[{}m", self.fg_code())
    }

    #[must_use]
    pub fn bg_ansi(self) -> String {
        format!("\x1b[{}m", self.bg_code())
    }
}

impl fmt::Display for ConsoleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` for names outside the sixteen-color palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl ParseColorError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown console color: '{}'", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for ConsoleColor {
    type Err = ParseColorError;

    /// Case-insensitive; `grey` spellings are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace("grey", "gray");
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == wanted)
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

/// Wraps `text` in the given colors and a trailing reset. Without any color the text comes back untouched.
#[must_use]
pub fn paint(text: &str, fg: Option<ConsoleColor>, bg: Option<ConsoleColor>) -> String {
    if fg.is_none() && bg.is_none() {
        return text.to_string();
    }
    let fg_code = fg.map(ConsoleColor::fg_ansi).unwrap_or_default();
    let bg_code = bg.map(ConsoleColor::bg_ansi).unwrap_or_default();
    let reset = ConsoleColor::RESET;
    format!("{fg_code}{bg_code}{text}{reset}")
}
