//! Quiz Style System
//!
//! Semantic colors for terminal output. All color goes through
//! [`colored`], so `--no-color` and `NO_COLOR` switch it off in one place.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::{ColoredString, Colorize, CustomColor};

/// When true, glyphs use plain ASCII instead of Unicode/emoji.
static ASCII_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_ascii_mode(enabled: bool) {
    ASCII_MODE.store(enabled, Ordering::Relaxed);
}

pub fn is_ascii_mode() -> bool {
    ASCII_MODE.load(Ordering::Relaxed)
}

/// Disable all color output, e.g. for `--no-color` or `NO_COLOR`.
pub fn disable_color() {
    colored::control::set_override(false);
}

pub struct Palette;

impl Palette {
    pub const ACCENT: CustomColor = CustomColor {
        r: 86,
        g: 182,
        b: 194,
    }; // Titles, borders
    pub const CORRECT: CustomColor = CustomColor {
        r: 144,
        g: 190,
        b: 109,
    };
    pub const WRONG: CustomColor = CustomColor {
        r: 224,
        g: 108,
        b: 117,
    };
    pub const CAUTION: CustomColor = CustomColor {
        r: 229,
        g: 192,
        b: 123,
    };
    pub const MUTED: CustomColor = CustomColor {
        r: 128,
        g: 128,
        b: 128,
    };
}

/// Semantic styling for quiz output.
pub trait QuizStyle {
    fn title(self) -> ColoredString;
    fn correct(self) -> ColoredString;
    fn wrong(self) -> ColoredString;
    fn caution(self) -> ColoredString;
    fn muted(self) -> ColoredString;
    fn emphasis(self) -> ColoredString;
}

impl QuizStyle for &str {
    fn title(self) -> ColoredString {
        self.custom_color(Palette::ACCENT).bold()
    }

    fn correct(self) -> ColoredString {
        self.custom_color(Palette::CORRECT)
    }

    fn wrong(self) -> ColoredString {
        self.custom_color(Palette::WRONG)
    }

    fn caution(self) -> ColoredString {
        self.custom_color(Palette::CAUTION)
    }

    fn muted(self) -> ColoredString {
        self.custom_color(Palette::MUTED).dimmed()
    }

    fn emphasis(self) -> ColoredString {
        self.bold()
    }
}

impl QuizStyle for &String {
    fn title(self) -> ColoredString {
        self.as_str().title()
    }

    fn correct(self) -> ColoredString {
        self.as_str().correct()
    }

    fn wrong(self) -> ColoredString {
        self.as_str().wrong()
    }

    fn caution(self) -> ColoredString {
        self.as_str().caution()
    }

    fn muted(self) -> ColoredString {
        self.as_str().muted()
    }

    fn emphasis(self) -> ColoredString {
        self.as_str().emphasis()
    }
}

/// Glyphs with ASCII fallbacks.
pub struct Glyphs;

impl Glyphs {
    pub fn check() -> &'static str {
        if is_ascii_mode() {
            "[ok]"
        } else {
            "✅"
        }
    }

    pub fn cross() -> &'static str {
        if is_ascii_mode() {
            "[x]"
        } else {
            "❌"
        }
    }

    pub fn warning() -> &'static str {
        if is_ascii_mode() {
            "[!]"
        } else {
            "⚠️"
        }
    }

    pub fn robot() -> &'static str {
        if is_ascii_mode() {
            "[ai]"
        } else {
            "🤖"
        }
    }

    pub fn books() -> &'static str {
        if is_ascii_mode() {
            "[i]"
        } else {
            "📚"
        }
    }

    pub fn bulb() -> &'static str {
        if is_ascii_mode() {
            "[?]"
        } else {
            "💡"
        }
    }

    pub fn chart() -> &'static str {
        if is_ascii_mode() {
            "[#]"
        } else {
            "📊"
        }
    }

    pub fn trophy() -> &'static str {
        if is_ascii_mode() {
            "[*]"
        } else {
            "🏆"
        }
    }
}
