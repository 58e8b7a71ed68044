//! Splitting source into styled and unstyled stretches.

use pyliter_style::{Style, StyledToken};

/// A stretch of source text: a token, or the gap before one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    /// `None` for gaps between tokens.
    pub style: Option<&'a Style>,
}

/// Covers `source` with non-empty segments in order.
///
/// Token text is taken from the source at the token's span, so the segment
/// texts always concatenate back to `source`.
pub fn segments<'a>(source: &'a str, tokens: &'a [StyledToken]) -> Vec<Segment<'a>> {
    let mut out = Vec::with_capacity(tokens.len() * 2 + 1);
    let mut cursor = 0;

    for styled in tokens {
        let span = &styled.token.raw.span;
        if span.start < cursor || span.end > source.len() {
            continue;
        }
        if span.start > cursor {
            out.push(Segment {
                text: &source[cursor..span.start],
                style: None,
            });
        }
        if span.end > span.start {
            out.push(Segment {
                text: &source[span.clone()],
                style: Some(&styled.style),
            });
        }
        cursor = span.end;
    }

    if cursor < source.len() {
        out.push(Segment {
            text: &source[cursor..],
            style: None,
        });
    }
    out
}
