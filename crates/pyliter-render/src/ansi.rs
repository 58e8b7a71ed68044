//! Terminal output with 24-bit ANSI escape sequences.
//!
//! ## Learning: SGR Sequences
//!
//! Terminals change text attributes with "Select Graphic Rendition"
//! sequences, `ESC [ <codes> m`. Codes used here:
//! - `38;2;r;g;b` foreground and `48;2;r;g;b` background truecolor
//! - `4` underline, with `58;2;r;g;b` for the underline color
//! - `1` bold, `3` italic
//! - `0` resets everything
//!
//! Each styled stretch is wrapped in its own sequence and a reset, and line
//! breaks are always left outside the escapes so backgrounds do not bleed
//! into the next line.

use pyliter_color::Color;
use pyliter_style::{Style, StyledToken};

use crate::layout::Layout;
use crate::segment::segments;

const ESC: &str = "\x1b[";
const RESET: &str = "\x1b[0m";

/// Renders styled tokens as ANSI-escaped text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnsiRenderer {
    default: Style,
    enabled: bool,
}

impl AnsiRenderer {
    /// A renderer drawing tokens over `default`, normally the book's
    /// `DEFAULT` style.
    pub fn new(default: Style) -> Self {
        Self {
            default,
            enabled: true,
        }
    }

    /// A renderer that reproduces the source without escapes.
    pub fn plain() -> Self {
        Self {
            default: Style::default(),
            enabled: false,
        }
    }

    pub fn is_plain(&self) -> bool {
        !self.enabled
    }

    /// Renders `source` with the styles of `tokens`.
    ///
    /// Gaps between tokens are drawn in the default style and tokens in the
    /// default style merged with their own.
    pub fn render(&self, source: &str, tokens: &[StyledToken]) -> String {
        let mut out = String::with_capacity(source.len() * 2);

        for segment in segments(source, tokens) {
            let style = match segment.style {
                Some(style) => self.default.merge(style),
                None => self.default,
            };
            self.write_styled(&mut out, segment.text, &style);
        }
        out
    }

    /// Renders the lines of a layout, gutter included.
    ///
    /// Runs already carry merged styles; columns skipped between runs are
    /// padded with spaces in the default style.
    pub fn render_layout(&self, layout: &Layout) -> String {
        let mut out = String::new();

        for line in &layout.lines {
            let mut column = 0;
            for run in &line.runs {
                if run.column > column {
                    let padding = " ".repeat(run.column - column);
                    self.write_styled(&mut out, &padding, &self.default);
                }
                self.write_styled(&mut out, &run.text, &run.style);
                column = run.end_column();
            }
            out.push('\n');
        }
        out
    }

    /// The escape sequence that turns `style` on; empty for an empty style
    /// or a plain renderer.
    pub fn prefix(&self, style: &Style) -> String {
        if !self.enabled {
            return String::new();
        }
        let codes = sgr_codes(style);
        if codes.is_empty() {
            String::new()
        } else {
            format!("{ESC}{}m", codes.join(";"))
        }
    }

    fn write_styled(&self, out: &mut String, text: &str, style: &Style) {
        let prefix = self.prefix(style);
        if prefix.is_empty() {
            out.push_str(text);
            return;
        }

        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let (body, cr) = match line.strip_suffix('\r') {
                Some(body) => (body, "\r"),
                None => (line, ""),
            };
            if !body.is_empty() {
                out.push_str(&prefix);
                out.push_str(body);
                out.push_str(RESET);
            }
            out.push_str(cr);
        }
    }
}

impl Default for AnsiRenderer {
    fn default() -> Self {
        Self::new(Style::default())
    }
}

/// SGR parameters for `style`, in a fixed order.
pub fn sgr_codes(style: &Style) -> Vec<String> {
    let mut codes = Vec::new();

    if let Some(color) = style.color {
        codes.push(truecolor(38, color));
    }
    if let Some(color) = style.background_color.filter(|color| color.alpha > 0) {
        codes.push(truecolor(48, color));
    }
    if let Some(color) = style.underline {
        codes.push("4".to_string());
        codes.push(truecolor(58, color));
    }
    if style.bold == Some(true) {
        codes.push("1".to_string());
    }
    if style.italic == Some(true) {
        codes.push("3".to_string());
    }
    codes
}

fn truecolor(selector: u8, color: Color) -> String {
    format!("{selector};2;{};{};{}", color.red, color.green, color.blue)
}
