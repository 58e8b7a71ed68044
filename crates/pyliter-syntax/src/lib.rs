//! # Pyliter Syntax
//!
//! Tokenizing and classifying Python source for highlighting.
//!
//! ## Pipeline
//!
//! ```text
//! &str ──tokenize──▶ Vec<RawToken> ──classify──▶ Vec<ClassifiedToken>
//! ```
//!
//! The [`lexer`] follows Python's own tokenizer, so layout tokens
//! (NEWLINE, NL, INDENT, DEDENT) are part of the stream. The [`classify`]
//! pass then gives each token a semantic [`Category`] such as keyword,
//! builtin, function name or assignment target.
//!
//! ## Learning: Owned Pipelines
//!
//! Each stage takes ownership of the previous stage's `Vec` and returns a new
//! one. `classify` moves every `RawToken` into its `ClassifiedToken` instead
//! of cloning, and the "previous token" is just index `i - 1` in the output
//! vector, so tokens never need references to each other.

pub mod classify;
pub mod lexer;
pub mod python;
mod token;

pub use classify::{Classifier, classify};
pub use lexer::{reconstruct, tokenize};
pub use token::{Category, ClassifiedToken, OpKind, Position, RawToken, TokenKind};

/// Result type for syntax operations
pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Errors that can occur while tokenizing source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("{message} (line {line}, column {column})")]
    Tokenize {
        line: usize,
        column: usize,
        message: String,
    },
}

/// Tokenizes and classifies source in one step.
pub fn classify_source(source: &str) -> SyntaxResult<Vec<ClassifiedToken>> {
    Ok(classify(tokenize(source)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_source() {
        let tokens = classify_source("import os\n").unwrap();
        assert_eq!(tokens[0].category, Category::Keyword);
        assert_eq!(tokens[1].category, Category::ImportName);
        assert_eq!(reconstruct("import os\n", &tokens), "import os\n");
    }

    #[test]
    fn test_error_message() {
        let err = classify_source("s = 'open").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unterminated string literal (line 1, column 4)"
        );
    }
}
