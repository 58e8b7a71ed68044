//! Positioned layout of highlighted source.
//!
//! A [`Layout`] places every stretch of text at a line and display column,
//! fully styled, for consumers that draw text themselves (image encoders,
//! GUI previews). It serializes to JSON.

use pyliter_color::Color;
use pyliter_style::{Style, StyleBook, StyledToken};
use serde::{Deserialize, Serialize};
use tracing::debug;
use unicode_width::UnicodeWidthChar;

use crate::segment::segments;

/// Columns between tab stops.
pub const TAB_WIDTH: usize = 8;

/// Color of line numbers in the gutter.
pub const LINE_NUMBER_COLOR: Color = Color::new(0xa0, 0xa0, 0xa0, 0xa0);

/// Which lines to lay out and whether to number them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// First line to keep, zero-based.
    pub start_line: usize,
    /// Number of lines to keep; 0 keeps every line after `start_line`.
    pub line_count: usize,
    /// Prefix each line with its zero-based number.
    pub line_numbers: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            start_line: 0,
            line_count: 0,
            line_numbers: false,
        }
    }
}

/// A stretch of text drawn in one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Display column of the first character.
    pub column: usize,
    /// Text with tabs expanded; never contains a line break.
    pub text: String,
    pub style: Style,
}

impl Run {
    pub fn width(&self) -> usize {
        display_width(&self.text)
    }

    pub fn end_column(&self) -> usize {
        self.column + self.width()
    }
}

/// One source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Zero-based line number in the source.
    pub number: usize,
    pub runs: Vec<Run>,
}

impl Line {
    pub fn width(&self) -> usize {
        self.runs.last().map_or(0, Run::end_column)
    }

    /// The line's text with runs placed at their columns.
    pub fn text(&self) -> String {
        let mut text = String::new();
        let mut column = 0;
        for run in &self.runs {
            if run.column > column {
                text.extend(std::iter::repeat_n(' ', run.column - column));
            }
            text.push_str(&run.text);
            column = run.end_column();
        }
        text
    }
}

/// Styled source placed on a grid of lines and display columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub lines: Vec<Line>,
    /// The default style every run was drawn over.
    pub default: Style,
    /// Canvas color, from the default style.
    pub background: Option<Color>,
}

impl Layout {
    /// Lays out `source` using the styles of `tokens`.
    ///
    /// Runs carry the book's default style merged with the token style; gaps
    /// between tokens use the default style. Tokens spanning several lines
    /// are split into one run per line.
    pub fn build(
        source: &str,
        tokens: &[StyledToken],
        book: &StyleBook,
        options: &LayoutOptions,
    ) -> Self {
        let default = book.default_style();
        let total = source.split_inclusive('\n').count();
        let end = match options.line_count {
            0 => total,
            count => total.min(options.start_line.saturating_add(count)),
        };
        let first = options.start_line.min(end);

        let mut builder = Builder {
            lines: (first..end)
                .map(|number| Line {
                    number,
                    runs: Vec::new(),
                })
                .collect(),
            first,
            line: 0,
            column: 0,
            line_numbers: options.line_numbers,
        };
        builder.start_line(0);

        for segment in segments(source, tokens) {
            let style = match segment.style {
                Some(style) => default.merge(style),
                None => default,
            };
            builder.push(segment.text, style);
        }

        debug!(lines = builder.lines.len(), first, "built layout");
        Self {
            lines: builder.lines,
            default,
            background: default.background_color,
        }
    }

    /// `(columns, rows)` needed to draw every line.
    pub fn dimensions(&self) -> (usize, usize) {
        let columns = self.lines.iter().map(Line::width).max().unwrap_or(0);
        (columns, self.lines.len())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Every line's text, newline-terminated.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text() + "\n")
            .collect()
    }
}

struct Builder {
    lines: Vec<Line>,
    first: usize,
    /// Current zero-based source line.
    line: usize,
    column: usize,
    line_numbers: bool,
}

impl Builder {
    /// Moves to the start of `line`, writing its gutter if kept.
    fn start_line(&mut self, line: usize) {
        self.line = line;
        self.column = 0;
        if !self.line_numbers {
            return;
        }
        let gutter = format!("{line:>4} ");
        let width = gutter.len();
        let style = Style::new().with_color(LINE_NUMBER_COLOR);
        if let Some(current) = self.current() {
            current.runs.push(Run {
                column: 0,
                text: gutter,
                style,
            });
        }
        self.column = width;
    }

    fn current(&mut self) -> Option<&mut Line> {
        let index = self.line.checked_sub(self.first)?;
        self.lines.get_mut(index)
    }

    fn gutter_width(&self) -> usize {
        if self.line_numbers {
            format!("{:>4} ", self.line).len()
        } else {
            0
        }
    }

    fn push(&mut self, text: &str, style: Style) {
        let mut pieces = text.split('\n').peekable();
        while let Some(piece) = pieces.next() {
            let ends_line = pieces.peek().is_some();
            let piece = if ends_line {
                piece.strip_suffix('\r').unwrap_or(piece)
            } else {
                piece
            };

            if !piece.is_empty() {
                let (expanded, width) = expand_tabs(piece, self.column - self.gutter_width());
                let column = self.column;
                if let Some(current) = self.current() {
                    current.runs.push(Run {
                        column,
                        text: expanded,
                        style,
                    });
                }
                self.column += width;
            }

            if ends_line {
                self.start_line(self.line + 1);
            }
        }
    }
}

/// Expands tabs relative to `column` and returns the text and its width.
fn expand_tabs(text: &str, column: usize) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut width = 0;
    for c in text.chars() {
        if c == '\t' {
            let to_stop = TAB_WIDTH - (column + width) % TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', to_stop));
            width += to_stop;
        } else {
            out.push(c);
            width += c.width().unwrap_or(0);
        }
    }
    (out, width)
}

fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}
