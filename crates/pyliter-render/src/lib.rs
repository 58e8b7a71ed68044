//! # Pyliter Render
//!
//! Turns Python source into highlighted output.
//!
//! ## Pipeline
//!
//! ```text
//! source ─▶ tokenize ─▶ classify ─▶ StyleBook::apply ─▶ AnsiRenderer
//!                                                   └─▶ Layout
//! ```
//!
//! [`highlight`] runs the first three stages. The result can be written to a
//! terminal with [`AnsiRenderer`] or placed on a grid with [`Layout`] for
//! drawing elsewhere.
//!
//! ## Learning: Borrowed Views
//!
//! Renderers never copy token text. [`segment::segments`] slices the
//! source text at each token span, so every output stretch is a `&str`
//! borrowed from the input for as long as the render runs.

pub mod ansi;
pub mod layout;
pub mod segment;

pub use ansi::AnsiRenderer;
pub use layout::{Layout, LayoutOptions, Line, Run};

use pyliter_style::{StyleBook, StyleError, StyledToken};
use pyliter_syntax::{Classifier, SyntaxError};

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while highlighting.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tokenizes, classifies and styles `source`.
pub fn highlight(source: &str, book: &StyleBook) -> RenderResult<Vec<StyledToken>> {
    highlight_with(source, book, &Classifier::default())
}

/// Like [`highlight`] with a custom classifier.
pub fn highlight_with(
    source: &str,
    book: &StyleBook,
    classifier: &Classifier,
) -> RenderResult<Vec<StyledToken>> {
    let raw = pyliter_syntax::tokenize(source)?;
    let classified = classifier.classify(raw);
    Ok(book.apply(classified))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyliter_color::Color;
    use pyliter_style::Style;
    use pyliter_syntax::Category;

    #[test]
    fn test_highlight_pipeline() {
        let book = StyleBook::by_name("default").unwrap();
        let tokens = highlight("class Foo:\n    def bar(self):\n        x = 1", &book).unwrap();

        let found = |text: &str| {
            tokens
                .iter()
                .find(|t| t.token.text() == text)
                .unwrap_or_else(|| panic!("no token {text}"))
        };
        assert_eq!(found("Foo").token.category, Category::ClassName);
        assert_eq!(found("bar").token.category, Category::FunctionName);
        assert_eq!(found("self").token.category, Category::SelfReference);
        assert_eq!(found("x").token.category, Category::AssignmentTarget);
        assert_eq!(found("x").style, book.resolve("LVAL"));
        assert_eq!(found("class").style.bold, Some(true));
    }

    #[test]
    fn test_highlight_reports_syntax_errors() {
        let err = highlight("f(1,", &StyleBook::default()).unwrap_err();
        assert!(matches!(err, RenderError::Syntax(_)));
    }

    #[test]
    fn test_highlight_with_custom_classifier() {
        let book = StyleBook::default()
            .with_style("SELF", Style::new().with_color(Color::opaque(1, 2, 3)));
        let classifier = Classifier::default().with_self_name("cls");
        let tokens = highlight_with("cls.x\n", &book, &classifier).unwrap();
        assert_eq!(tokens[0].token.category, Category::SelfReference);
        assert_eq!(tokens[0].style.color, Some(Color::opaque(1, 2, 3)));
    }
}
