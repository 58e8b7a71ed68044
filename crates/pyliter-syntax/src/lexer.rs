//! Python 3 tokenizer.
//!
//! Produces the same token stream as Python's `tokenize` module (without the
//! ENCODING token). Every token carries the byte span of its text, so the
//! source can be rebuilt exactly from the gaps between tokens plus the token
//! texts; see [`reconstruct`].

use tracing::debug;

use crate::token::{OpKind, Position, RawToken, TokenKind};
use crate::{SyntaxError, SyntaxResult};

/// Columns a tab advances to, as in the Python tokenizer.
const TAB_SIZE: usize = 8;

/// Valid string prefixes, compared case-insensitively.
const STRING_PREFIXES: [&str; 8] = ["r", "u", "b", "f", "br", "rb", "fr", "rf"];

/// Splits Python source into raw tokens.
///
/// # Errors
///
/// Returns [`SyntaxError::Tokenize`] for an unterminated single-quoted
/// string, end of input inside an open bracket, and a dedent that matches no
/// enclosing indentation level. Stray characters become
/// [`TokenKind::ErrorToken`] tokens instead.
pub fn tokenize(source: &str) -> SyntaxResult<Vec<RawToken>> {
    let tokens = Lexer::new(source).run()?;
    debug!(tokens = tokens.len(), bytes = source.len(), "tokenized source");
    Ok(tokens)
}

/// Rebuilds the source from tokens and the gaps between their spans.
///
/// For the output of [`tokenize`] this returns the original source.
pub fn reconstruct<T: AsRef<RawToken>>(source: &str, tokens: &[T]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;

    for token in tokens {
        let token = token.as_ref();
        if token.span.start < cursor {
            continue;
        }
        out.push_str(&source[cursor..token.span.start]);
        out.push_str(&token.text);
        cursor = token.span.end;
    }

    out.push_str(&source[cursor..]);
    out
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Byte offset of the first character of every physical line.
    line_starts: Vec<usize>,
    indents: Vec<usize>,
    depth: usize,
    at_line_start: bool,
    tokens: Vec<RawToken>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line_starts,
            indents: vec![0],
            depth: 0,
            at_line_start: true,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> SyntaxResult<Vec<RawToken>> {
        while self.pos < self.bytes.len() {
            if self.at_line_start && self.depth == 0 {
                self.indentation()?;
                continue;
            }

            let Some(c) = self.source[self.pos..].chars().next() else {
                break;
            };

            match c {
                ' ' | '\t' | '\x0c' => self.pos += 1,
                '\r' if self.newline_len() == 0 => self.pos += 1,
                '\n' | '\r' => {
                    let kind = if self.depth > 0 {
                        TokenKind::Nl
                    } else {
                        TokenKind::Newline
                    };
                    self.newline(kind);
                    if self.depth == 0 {
                        self.at_line_start = true;
                    }
                }
                '#' => self.comment(),
                '\\' => self.continuation(),
                '0'..='9' => self.number(),
                '.' if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => self.number(),
                '\'' | '"' => self.string(self.pos, self.pos)?,
                c if is_identifier_start(c) => match self.string_prefix_len() {
                    Some(len) => self.string(self.pos, self.pos + len)?,
                    None => self.name(),
                },
                c => self.operator_or_error(c),
            }
        }

        self.finish()
    }

    // ==================== Line Structure ====================

    /// Measures leading whitespace at the start of a logical line.
    ///
    /// Blank and comment-only lines produce COMMENT/NL tokens and are skipped;
    /// the first real line gets its INDENT or DEDENT tokens.
    fn indentation(&mut self) -> SyntaxResult<()> {
        loop {
            let line_start = self.pos;
            let mut column = 0;
            while let Some(b) = self.peek_at(0) {
                match b {
                    b' ' => column += 1,
                    b'\t' => column = (column / TAB_SIZE + 1) * TAB_SIZE,
                    b'\x0c' => column = 0,
                    _ => break,
                }
                self.pos += 1;
            }

            match self.peek_at(0) {
                None => return Ok(()),
                Some(b'#') => {
                    self.comment();
                    self.newline(TokenKind::Nl);
                    continue;
                }
                Some(b'\n' | b'\r') if self.newline_len() > 0 => {
                    self.newline(TokenKind::Nl);
                    continue;
                }
                _ => {}
            }

            self.at_line_start = false;
            let current = self.indents.last().copied().unwrap_or(0);

            if column > current {
                self.indents.push(column);
                self.push(TokenKind::Indent, line_start, self.pos);
            } else if column < current {
                while self.indents.last().is_some_and(|&level| column < level) {
                    self.indents.pop();
                    self.push(TokenKind::Dedent, self.pos, self.pos);
                }
                if self.indents.last().copied().unwrap_or(0) != column {
                    return Err(self.error_at(
                        self.pos,
                        "unindent does not match any outer indentation level",
                    ));
                }
            }
            return Ok(());
        }
    }

    /// Length of the line break at the cursor: 1 for `\n`, 2 for `\r\n`, else 0.
    fn newline_len(&self) -> usize {
        match self.peek_at(0) {
            Some(b'\n') => 1,
            Some(b'\r') if self.peek_at(1) == Some(b'\n') => 2,
            _ => 0,
        }
    }

    /// Emits a NEWLINE or NL token for the line break at the cursor.
    ///
    /// At end of input the token is empty.
    fn newline(&mut self, kind: TokenKind) {
        let start = self.pos;
        self.pos += self.newline_len();
        self.push(kind, start, self.pos);
    }

    fn comment(&mut self) {
        let start = self.pos;
        while let Some(b) = self.peek_at(0) {
            if b == b'\n' || self.newline_len() > 0 {
                break;
            }
            self.pos += 1;
        }
        self.push(TokenKind::Comment, start, self.pos);
    }

    /// Explicit line joining with a trailing backslash.
    fn continuation(&mut self) {
        let start = self.pos;
        self.pos += 1;
        match self.newline_len() {
            0 => self.push(TokenKind::ErrorToken, start, self.pos),
            len => self.pos += len,
        }
    }

    // ==================== Tokens ====================

    fn name(&mut self) {
        let start = self.pos;
        let rest = &self.source[start..];
        let len = rest
            .char_indices()
            .find(|(_, c)| !is_identifier_continue(*c))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += len;
        self.push(TokenKind::Name, start, self.pos);
    }

    fn number(&mut self) {
        let start = self.pos;
        let radix_prefix = self.peek_at(0) == Some(b'0')
            && matches!(
                self.peek_at(1),
                Some(b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
            );

        if radix_prefix {
            self.pos += 2;
            self.eat_while(|b| b.is_ascii_hexdigit() || b == b'_');
        } else {
            self.eat_while(|b| b.is_ascii_digit() || b == b'_');
            if self.peek_at(0) == Some(b'.') {
                self.pos += 1;
                self.eat_while(|b| b.is_ascii_digit() || b == b'_');
            }
            if matches!(self.peek_at(0), Some(b'e' | b'E')) {
                let sign = usize::from(matches!(self.peek_at(1), Some(b'+' | b'-')));
                if self.peek_at(1 + sign).is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 1 + sign;
                    self.eat_while(|b| b.is_ascii_digit() || b == b'_');
                }
            }
            if matches!(self.peek_at(0), Some(b'j' | b'J')) {
                self.pos += 1;
            }
        }

        self.push(TokenKind::Number, start, self.pos);
    }

    /// Length of a string prefix at the cursor, if a quote follows it.
    fn string_prefix_len(&self) -> Option<usize> {
        let rest = &self.bytes[self.pos..];
        [2, 1].into_iter().find(|&len| {
            rest.get(len).is_some_and(|&b| b == b'\'' || b == b'"')
                && STRING_PREFIXES
                    .iter()
                    .any(|prefix| prefix.as_bytes().eq_ignore_ascii_case(&rest[..len]))
        })
    }

    /// Lexes a string literal whose prefix starts at `start` and whose opening
    /// quote is at `quote_at`.
    fn string(&mut self, start: usize, quote_at: usize) -> SyntaxResult<()> {
        let quote = self.bytes[quote_at];
        let triple = self.bytes[quote_at..].starts_with(&[quote; 3]);

        let end = if triple {
            let mut i = quote_at + 3;
            loop {
                match self.bytes.get(i) {
                    // Unterminated triple-quoted strings run to end of text.
                    None => break self.bytes.len(),
                    Some(b'\\') => i += 2,
                    Some(&b) if b == quote && self.bytes[i..].starts_with(&[quote; 3]) => {
                        break i + 3;
                    }
                    Some(_) => i += 1,
                }
            }
        } else {
            let mut i = quote_at + 1;
            loop {
                match self.bytes.get(i) {
                    None | Some(b'\n') => {
                        return Err(self.error_at(start, "unterminated string literal"));
                    }
                    Some(b'\r') if self.bytes.get(i + 1) == Some(&b'\n') => {
                        return Err(self.error_at(start, "unterminated string literal"));
                    }
                    Some(b'\\') if self.bytes[i + 1..].starts_with(b"\r\n") => i += 3,
                    Some(b'\\') => i += 2,
                    Some(&b) if b == quote => break i + 1,
                    Some(_) => i += 1,
                }
            }
        };

        self.pos = end;
        self.push(TokenKind::String, start, end);
        Ok(())
    }

    fn operator_or_error(&mut self, c: char) {
        let start = self.pos;
        match OpKind::longest_prefix(&self.source[start..]) {
            Some((kind, len)) => {
                if kind.opens_bracket() {
                    self.depth += 1;
                } else if kind.closes_bracket() {
                    self.depth = self.depth.saturating_sub(1);
                }
                self.pos += len;
                self.push(TokenKind::Op, start, self.pos);
            }
            None => {
                self.pos += c.len_utf8();
                self.push(TokenKind::ErrorToken, start, self.pos);
            }
        }
    }

    // ==================== End of Input ====================

    fn finish(mut self) -> SyntaxResult<Vec<RawToken>> {
        let eof = self.source.len();

        if self.depth > 0 {
            return Err(self.error_at(eof, "EOF in multi-line statement"));
        }

        let ended = self
            .tokens
            .last()
            .is_none_or(|token| matches!(token.kind, TokenKind::Newline | TokenKind::Nl));
        if !ended {
            let at = self.position(eof);
            self.push_synthetic(TokenKind::Newline, at);
        }

        let at = Position::new(self.eof_line(), 0);
        for _ in 1..self.indents.len() {
            self.push_synthetic(TokenKind::Dedent, at);
        }
        self.push_synthetic(TokenKind::EndMarker, at);

        Ok(self.tokens)
    }

    /// Line reported for the trailing DEDENT and ENDMARKER tokens.
    fn eof_line(&self) -> usize {
        let breaks = self.line_starts.len() - 1;
        if self.source.is_empty() {
            1
        } else if self.source.ends_with('\n') {
            breaks + 1
        } else {
            breaks + 2
        }
    }

    // ==================== Helpers ====================

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn eat_while(&mut self, mut predicate: impl FnMut(u8) -> bool) {
        while self.peek_at(0).is_some_and(&mut predicate) {
            self.pos += 1;
        }
    }

    fn line_index(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    /// Converts a byte offset to a line and character column.
    fn position(&self, offset: usize) -> Position {
        let index = self.line_index(offset);
        let line_start = self.line_starts[index];
        Position::new(index + 1, self.source[line_start..offset].chars().count())
    }

    /// The physical lines overlapping `start..end`, line breaks included.
    fn physical_lines(&self, start: usize, end: usize) -> &'a str {
        let first = self.line_index(start);
        let last = self.line_index(if end > start { end - 1 } else { start });
        let from = self.line_starts[first];
        let to = self
            .line_starts
            .get(last + 1)
            .copied()
            .unwrap_or(self.source.len());
        &self.source[from..to]
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        let source = self.source;
        let text = &source[start..end];
        let line = self.physical_lines(start, end).to_string();
        let start_pos = self.position(start);
        let end_pos = match kind {
            // Line breaks end on their own line.
            TokenKind::Newline | TokenKind::Nl => {
                Position::new(start_pos.line, start_pos.column + text.chars().count())
            }
            _ => self.position(end),
        };

        self.tokens.push(RawToken {
            kind,
            text: text.to_string(),
            start: start_pos,
            end: end_pos,
            span: start..end,
            line,
        });
    }

    /// Pushes an empty token at end of input.
    fn push_synthetic(&mut self, kind: TokenKind, at: Position) {
        let eof = self.source.len();
        self.tokens.push(RawToken {
            kind,
            text: String::new(),
            start: at,
            end: at,
            span: eof..eof,
            line: String::new(),
        });
    }

    fn error_at(&self, offset: usize, message: &str) -> SyntaxError {
        let position = self.position(offset);
        SyntaxError::Tokenize {
            line: position.line,
            column: position.column,
            message: message.to_string(),
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}
