//! Single-column bordered text table.

use colored::ColoredString;
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Total width of a rendered table, borders included.
pub const DISPLAY_WIDTH: usize = 80;

/// Width available to cell text once borders and padding are removed.
pub const CONTENT_WIDTH: usize = DISPLAY_WIDTH - 4;

/// One line of cell text.
///
/// Keeps the visible width next to the rendered string, since ANSI escape codes
/// take up bytes but no columns. Width is measured in terminal columns, so
/// wide CJK glyphs count twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    rendered: String,
    width: usize,
}

impl Line {
    pub fn plain(text: &str) -> Self {
        Self {
            rendered: text.to_string(),
            width: text.width(),
        }
    }

    /// Applies `style` to `text` when `color` is set.
    pub fn styled(text: &str, color: bool, style: impl Fn(&str) -> ColoredString) -> Self {
        if !color {
            return Self::plain(text);
        }
        Self {
            rendered: style(text).to_string(),
            width: text.width(),
        }
    }

    pub fn blank() -> Self {
        Self::plain("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone)]
struct Row {
    lines: Vec<Line>,
    align: Align,
}

/// A one-column table drawn with box characters.
#[derive(Debug, Clone, Default)]
pub struct Table {
    header: Option<Line>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(header: Line) -> Self {
        Self {
            header: Some(header),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, lines: Vec<Line>, align: Align) {
        self.rows.push(Row { lines, align });
    }

    pub fn render(&self) -> String {
        let rule = "─".repeat(DISPLAY_WIDTH - 2);
        let mut out = String::new();

        let _ = writeln!(out, "┌{rule}┐");
        let mut first = true;
        if let Some(header) = &self.header {
            write_line(&mut out, header, Align::Left);
            first = false;
        }
        for row in &self.rows {
            if !first {
                let _ = writeln!(out, "├{rule}┤");
            }
            first = false;
            for line in &row.lines {
                write_line(&mut out, line, row.align);
            }
        }
        let _ = writeln!(out, "└{rule}┘");
        out
    }
}

fn write_line(out: &mut String, line: &Line, align: Align) {
    let slack = CONTENT_WIDTH.saturating_sub(line.width);
    let (left, right) = match align {
        Align::Left => (0, slack),
        Align::Center => (slack / 2, slack - slack / 2),
    };
    let _ = writeln!(
        out,
        "│ {}{}{} │",
        " ".repeat(left),
        line.rendered,
        " ".repeat(right)
    );
}

/// Splits `text` into lines of at most `max_width` terminal columns.
///
/// Whitespace runs collapse to one space. Words wider than a line are broken
/// across lines.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for mut word in text.split_whitespace() {
        while word.width() > max_width {
            if current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            let (head, rest) = split_at_width(word, max_width);
            lines.push(head.to_string());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }

        let width = word.width();
        let needed = if current_width == 0 {
            width
        } else {
            current_width + 1 + width
        };
        if needed > max_width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        current_width += width;
        current.push_str(word);
    }

    if current_width > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits `word` after the last character that still fits in `max_width`
/// columns. The head always holds at least one character.
fn split_at_width(word: &str, max_width: usize) -> (&str, &str) {
    let mut used = 0;
    for (index, c) in word.char_indices() {
        let width = c.width().unwrap_or(0);
        if used + width > max_width {
            let index = if index == 0 { c.len_utf8() } else { index };
            return word.split_at(index);
        }
        used += width;
    }
    (word, "")
}
