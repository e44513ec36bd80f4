use std::fmt::Display;

/// ANSI colors for plain (non-TUI) terminal output.
pub struct Palette;

impl Palette {
    pub const INFO: &'static str = "\x1b[36m";
    pub const WARNING: &'static str = "\x1b[33m";
    pub const SUCCESS: &'static str = "\x1b[32m";
    const DIM: &'static str = "\x1b[2m";
    const BOLD: &'static str = "\x1b[1m";
    const RESET: &'static str = "\x1b[0m";

    pub fn paint(color: &str, text: impl Display) -> String {
        format!("{color}{text}{}", Self::RESET)
    }

    pub fn dim(text: impl Display) -> String {
        Self::paint(Self::DIM, text)
    }

    pub fn bold(text: impl Display) -> String {
        Self::paint(Self::BOLD, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_wraps_with_reset() {
        assert_eq!(Palette::paint(Palette::INFO, "cardsmith"), "\u{1b}[36mcardsmith\u{1b}[0m");
        assert_eq!(Palette::dim(3), "\u{1b}[2m3\u{1b}[0m");
    }
}
