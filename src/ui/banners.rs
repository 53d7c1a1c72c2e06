//! Banners and text framing for the quiz screens.

use std::fmt;

// ============================================================================
// Banner Types
// ============================================================================

/// A block of lines that can be framed and printed as one unit
pub struct Banner {
    lines: Vec<String>,
    width: usize,
}

impl Banner {
    pub fn new<S: AsRef<str>>(lines: impl IntoIterator<Item = S>) -> Self {
        let lines: Vec<String> = lines.into_iter().map(|l| l.as_ref().to_string()).collect();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Self { lines, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Add a double-line box around the banner
    pub fn boxed(&self) -> Self {
        let inner_width = self.width + 2;
        let mut framed = Vec::with_capacity(self.lines.len() + 2);

        framed.push(format!("╔{}╗", "═".repeat(inner_width)));
        for line in &self.lines {
            let padding = self.width - line.chars().count();
            framed.push(format!("║ {}{} ║", line, " ".repeat(padding)));
        }
        framed.push(format!("╚{}╝", "═".repeat(inner_width)));

        Banner::new(framed)
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

// ============================================================================
// Screens
// ============================================================================

/// Opening screen. `generator` names the model when questions are generated.
pub fn welcome_banner(language: &str, generator: Option<&str>) -> Banner {
    let mode_line = match generator {
        Some(model) => format!("Questions generated live by {}", model),
        None => "Questions from the built-in bank".to_string(),
    };
    Banner::new([
        format!("{} QUIZ", language.to_uppercase()),
        String::new(),
        format!("Test what you know about {}", language),
        mode_line,
        "Multiple game modes, statistics kept between runs".to_string(),
    ])
    .boxed()
}

pub fn farewell_banner(language: &str) -> Banner {
    Banner::new([
        "Thanks for playing!".to_string(),
        String::new(),
        format!("Keep practicing {} and come back soon.", language),
    ])
    .boxed()
}

/// Single-line header with a title centered in a rule
pub fn divider_with_text(text: &str, width: usize) -> String {
    let text_len = text.chars().count() + 2;
    if width <= text_len {
        return format!(" {} ", text);
    }
    let side_len = (width - text_len) / 2;
    let left = "─".repeat(side_len);
    let right = "─".repeat(width - side_len - text_len);
    format!("{} {} {}", left, text, right)
}

/// Filled/empty dots for `current` of `total`.
pub fn step_indicator(current: usize, total: usize) -> String {
    let filled = "●".repeat(current.min(total));
    let empty = "○".repeat(total.saturating_sub(current));
    format!("[{}{}]", filled, empty)
}

/// Wrap text to fit width
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.chars().count() + word.chars().count() < width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}
