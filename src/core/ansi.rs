//! Raw ANSI SGR fragments.
//!
//! Colors come from the `colored` palette but are rendered here directly, so
//! whether a line is colored depends only on the sink and the defaults, never
//! on `colored`'s own environment detection.

use colored::Color;

pub const RESET: &str = "\x1b[0m";
pub const DIM: &str = "\x1b[2m";

/// Foreground color sequence.
pub fn fg(color: Color) -> String {
    format!("\x1b[{}m", color.to_fg_str())
}

/// Underlined foreground color sequence.
pub fn underline(color: Color) -> String {
    format!("\x1b[4;{}m", color.to_fg_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequences() {
        assert_eq!(fg(Color::Red), "\x1b[31m");
        assert_eq!(underline(Color::Green), "\x1b[4;32m");
        assert_eq!(fg(Color::BrightBlack), "\x1b[90m");
    }
}
