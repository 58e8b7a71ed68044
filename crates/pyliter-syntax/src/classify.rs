//! Semantic classification of raw tokens.
//!
//! ## Rules
//!
//! Each token is classified once, in source order, by the first rule that
//! matches:
//!
//! 1. a keyword NAME is [`Category::Keyword`]
//! 2. a builtin NAME is [`Category::Builtin`]
//! 3. a triple-quoted STRING is [`Category::Docstring`]
//! 4. a NAME starting with `_` is [`Category::PrivateName`]
//! 5. the self name is [`Category::SelfReference`]
//! 6. a NAME after `def`, `class` or `import` is a function, class or import name
//! 7. anything else keeps its lexer kind
//!
//! When an `=` operator is classified, the names before it on the same
//! target are re-marked as [`Category::AssignmentTarget`]. That is the only
//! time a token's category changes after it was first assigned.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::python;
use crate::token::{Category, ClassifiedToken, OpKind, RawToken, TokenKind};

/// Classifies tokens with the Python word lists.
pub fn classify(raw: Vec<RawToken>) -> Vec<ClassifiedToken> {
    Classifier::default().classify(raw)
}

/// Token classifier with configurable word sets.
#[derive(Debug, Clone)]
pub struct Classifier {
    keywords: HashSet<String>,
    builtins: HashSet<String>,
    self_name: String,
}

impl Classifier {
    /// Creates a classifier with no keywords or builtins.
    pub fn empty() -> Self {
        Self {
            keywords: HashSet::new(),
            builtins: HashSet::new(),
            self_name: python::SELF_NAME.to_string(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_builtins<I, S>(mut self, builtins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builtins = builtins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_self_name(mut self, name: impl Into<String>) -> Self {
        self.self_name = name.into();
        self
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    pub fn is_builtin(&self, word: &str) -> bool {
        self.builtins.contains(word)
    }

    /// Classifies a token stream.
    pub fn classify(&self, raw: Vec<RawToken>) -> Vec<ClassifiedToken> {
        let mut tokens: Vec<ClassifiedToken> = Vec::with_capacity(raw.len());
        let mut targets = 0;

        for token in raw {
            let category = self.category_of(&token, tokens.last());
            let exact_kind = match token.kind {
                TokenKind::Op => OpKind::from_text(&token.text),
                _ => None,
            };

            tokens.push(ClassifiedToken {
                raw: token,
                category,
                exact_kind,
            });

            if exact_kind == Some(OpKind::Equal) {
                targets += mark_assignment_targets(&mut tokens);
            }
        }

        debug!(tokens = tokens.len(), targets, "classified tokens");
        tokens
    }

    /// Category of `token` given the token classified just before it.
    fn category_of(&self, token: &RawToken, previous: Option<&ClassifiedToken>) -> Category {
        let text = token.text.as_str();

        match token.kind {
            TokenKind::Name if self.is_keyword(text) => Category::Keyword,
            TokenKind::Name if self.is_builtin(text) => Category::Builtin,
            TokenKind::String if is_docstring(text) => Category::Docstring,
            TokenKind::Name if text.starts_with('_') => Category::PrivateName,
            TokenKind::Name if text == self.self_name => Category::SelfReference,
            TokenKind::Name => previous
                .and_then(|token| python::defined_category(token.text()))
                .unwrap_or(Category::Name),
            kind => Category::from(kind),
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::empty()
            .with_keywords(python::python_keywords().iter().copied())
            .with_builtins(python::python_builtins().iter().copied())
    }
}

fn is_docstring(text: &str) -> bool {
    text.starts_with("\"\"\"") || text.starts_with("'''")
}

/// Marks the assignment targets of the `=` that ends `tokens`.
///
/// Walks back from the token before the `=`. Names are collected; `.`, `[`
/// and `]` are stepped over; `:` or `,` means the `=` is a keyword argument
/// or annotation default and nothing is marked; a keyword or anything else
/// ends the walk and the collected names are marked.
///
/// Returns the number of tokens marked.
pub fn mark_assignment_targets(tokens: &mut [ClassifiedToken]) -> usize {
    let mut candidates = Vec::new();
    let mut index = tokens.len().saturating_sub(1);

    while index > 0 {
        index -= 1;
        let token = &tokens[index];
        match token.exact_kind {
            Some(OpKind::Colon | OpKind::Comma) => return 0,
            Some(OpKind::Dot | OpKind::LSqb | OpKind::RSqb) => continue,
            _ if token.category == Category::Keyword => break,
            _ if token.kind() == TokenKind::Name => candidates.push(index),
            _ => break,
        }
    }

    for &index in &candidates {
        let token = &mut tokens[index];
        trace!(
            text = token.text(),
            from = %token.category,
            line = token.start().line,
            "marking assignment target"
        );
        token.category = Category::AssignmentTarget;
    }

    candidates.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn categories(source: &str) -> Vec<(String, Category)> {
        classify(tokenize(source).unwrap())
            .into_iter()
            .filter(|t| t.kind().is_visible())
            .map(|t| (t.raw.text, t.category))
            .collect()
    }

    fn category_of(source: &str, text: &str) -> Category {
        categories(source)
            .into_iter()
            .find(|(t, _)| t == text)
            .map(|(_, c)| c)
            .unwrap()
    }

    #[test]
    fn test_method_example() {
        use Category::*;
        let source = "class Foo:\n    def bar(self):\n        x = 1";
        assert_eq!(
            categories(source),
            vec![
                ("class".to_string(), Keyword),
                ("Foo".to_string(), ClassName),
                (":".to_string(), Op),
                ("def".to_string(), Keyword),
                ("bar".to_string(), FunctionName),
                ("(".to_string(), Op),
                ("self".to_string(), SelfReference),
                (")".to_string(), Op),
                (":".to_string(), Op),
                ("x".to_string(), AssignmentTarget),
                ("=".to_string(), Op),
                ("1".to_string(), Number),
            ]
        );
    }

    #[test]
    fn test_keyword_argument_is_not_a_target() {
        let tokens = categories("f(a, b=2)");
        assert!(tokens.iter().all(|(_, c)| *c != Category::AssignmentTarget));
        assert_eq!(category_of("f(a, b=2)", "b"), Category::Name);
    }

    #[test]
    fn test_attribute_and_subscript_targets() {
        let source = "obj.attr = 1\n";
        assert_eq!(category_of(source, "obj"), Category::AssignmentTarget);
        assert_eq!(category_of(source, "attr"), Category::AssignmentTarget);

        let source = "self.value = v\n";
        assert_eq!(category_of(source, "self"), Category::AssignmentTarget);
        assert_eq!(category_of(source, "v"), Category::Name);

        // The walk stops at the subscript's number before reaching `items`.
        let source = "items[0] = 1\n";
        assert_eq!(category_of(source, "items"), Category::Name);
    }

    #[test]
    fn test_walk_stops_at_keywords() {
        let source = "f = lambda x=1: x\n";
        assert_eq!(category_of(source, "f"), Category::AssignmentTarget);
        assert_eq!(category_of(source, "lambda"), Category::Keyword);
        assert_eq!(category_of(source, "x"), Category::AssignmentTarget);
    }

    #[test]
    fn test_annotated_default_is_not_a_target() {
        let source = "def f(x: int = 3):\n    pass\n";
        assert_eq!(category_of(source, "int"), Category::Builtin);
        assert_eq!(category_of(source, "x"), Category::Name);
    }

    #[test]
    fn test_comparison_is_not_assignment() {
        assert_eq!(category_of("a == b\n", "a"), Category::Name);
        assert_eq!(category_of("a += b\n", "a"), Category::Name);
    }

    #[test]
    fn test_rule_priority() {
        use Category::*;
        assert_eq!(category_of("x = None\n", "None"), Keyword);
        assert_eq!(category_of("print(len(x))\n", "print"), Builtin);
        assert_eq!(category_of("print(len(x))\n", "len"), Builtin);
        assert_eq!(category_of("def __init__(self): pass\n", "__init__"), PrivateName);
        assert_eq!(category_of("def list(): pass\n", "list"), Builtin);
        assert_eq!(category_of("import os\n", "os"), ImportName);
        assert_eq!(category_of("from os import path\n", "path"), ImportName);
        assert_eq!(category_of("_cache\n", "_cache"), PrivateName);
    }

    #[test]
    fn test_strings_and_docstrings() {
        use Category::*;
        assert_eq!(category_of("\"\"\"Module doc.\"\"\"\n", "\"\"\"Module doc.\"\"\""), Docstring);
        assert_eq!(category_of("x('''a''')\n", "'''a'''"), Docstring);
        assert_eq!(category_of("x('a')\n", "'a'"), String);
        assert_eq!(category_of("x(r'''a''')\n", "r'''a'''"), String);
    }

    #[test]
    fn test_exact_kind_on_operators() {
        let tokens = classify(tokenize("a[1] **= 2\n").unwrap());
        let kinds: Vec<_> = tokens.iter().filter_map(|t| t.exact_kind).collect();
        assert_eq!(kinds, vec![OpKind::LSqb, OpKind::RSqb, OpKind::DoubleStarEqual]);
        assert!(tokens
            .iter()
            .filter(|t| t.kind() != TokenKind::Op)
            .all(|t| t.exact_kind.is_none()));
    }

    #[test]
    fn test_structural_tokens_keep_their_kind() {
        let tokens = classify(tokenize("if x:\n    y\n").unwrap());
        let structural: Vec<_> = tokens
            .iter()
            .filter(|t| !t.kind().is_visible())
            .map(|t| t.category)
            .collect();
        assert_eq!(
            structural,
            vec![
                Category::Newline,
                Category::Indent,
                Category::Newline,
                Category::Dedent,
                Category::EndMarker
            ]
        );
    }

    #[test]
    fn test_custom_word_sets() {
        let classifier = Classifier::empty()
            .with_keywords(["let"])
            .with_builtins(["console"])
            .with_self_name("this");
        let tokens = classifier.classify(tokenize("let = console(this, def)\n").unwrap());
        let found: Vec<_> = tokens.iter().map(|t| t.category).take(7).collect();
        assert_eq!(
            found,
            vec![
                Category::AssignmentTarget,
                Category::Op,
                Category::Builtin,
                Category::Op,
                Category::SelfReference,
                Category::Op,
                Category::Name,
            ]
        );
    }

    #[test]
    fn test_mark_assignment_targets_at_start() {
        let mut tokens = classify(tokenize("a b =").unwrap());
        // Classification already marked both names; the walk is repeatable.
        assert_eq!(tokens[0].category, Category::AssignmentTarget);
        assert_eq!(mark_assignment_targets(&mut tokens[..3]), 2);
        assert_eq!(mark_assignment_targets(&mut tokens[..1]), 0);
        assert_eq!(mark_assignment_targets(&mut []), 0);
    }
}
