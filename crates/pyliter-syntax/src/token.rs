//! Token types produced by the lexer and the classifier.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Coarse token kinds reported by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Name,
    Op,
    String,
    Comment,
    Number,
    /// End of a logical line.
    Newline,
    /// Non-logical line break: blank lines, comment lines, breaks inside brackets.
    Nl,
    Indent,
    Dedent,
    EndMarker,
    ErrorToken,
}

impl TokenKind {
    /// Kinds that carry visible source text.
    pub fn is_visible(&self) -> bool {
        matches!(
            self,
            TokenKind::Name
                | TokenKind::Op
                | TokenKind::String
                | TokenKind::Comment
                | TokenKind::Number
                | TokenKind::ErrorToken
        )
    }
}

/// A line and column in the source.
///
/// Lines are 1-based and columns are 0-based character offsets, the
/// convention of Python's own tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A token as produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawToken {
    pub kind: TokenKind,
    pub text: String,
    pub start: Position,
    pub end: Position,
    /// Byte offsets of `text` in the source.
    pub span: Range<usize>,
    /// The physical line(s) the token appears on.
    pub line: String,
}

impl AsRef<RawToken> for RawToken {
    fn as_ref(&self) -> &RawToken {
        self
    }
}

/// Exact operator kinds, named as in Python's `token` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    LPar,
    RPar,
    LSqb,
    RSqb,
    Colon,
    Comma,
    Semi,
    Plus,
    Minus,
    Star,
    Slash,
    VBar,
    Amper,
    Less,
    Greater,
    Equal,
    Dot,
    Percent,
    LBrace,
    RBrace,
    EqEqual,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Tilde,
    Circumflex,
    LeftShift,
    RightShift,
    DoubleStar,
    PlusEqual,
    MinEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    AmperEqual,
    VBarEqual,
    CircumflexEqual,
    LeftShiftEqual,
    RightShiftEqual,
    DoubleStarEqual,
    DoubleSlash,
    DoubleSlashEqual,
    At,
    AtEqual,
    RArrow,
    Ellipsis,
    ColonEqual,
    Exclamation,
}

/// Operator text, kind and Python token name; longest operators first.
const OPERATORS: &[(&str, OpKind, &str)] = &[
    ("**=", OpKind::DoubleStarEqual, "DOUBLESTAREQUAL"),
    ("//=", OpKind::DoubleSlashEqual, "DOUBLESLASHEQUAL"),
    (">>=", OpKind::RightShiftEqual, "RIGHTSHIFTEQUAL"),
    ("<<=", OpKind::LeftShiftEqual, "LEFTSHIFTEQUAL"),
    ("...", OpKind::Ellipsis, "ELLIPSIS"),
    ("!=", OpKind::NotEqual, "NOTEQUAL"),
    ("%=", OpKind::PercentEqual, "PERCENTEQUAL"),
    ("&=", OpKind::AmperEqual, "AMPEREQUAL"),
    ("**", OpKind::DoubleStar, "DOUBLESTAR"),
    ("*=", OpKind::StarEqual, "STAREQUAL"),
    ("+=", OpKind::PlusEqual, "PLUSEQUAL"),
    ("-=", OpKind::MinEqual, "MINEQUAL"),
    ("->", OpKind::RArrow, "RARROW"),
    ("//", OpKind::DoubleSlash, "DOUBLESLASH"),
    ("/=", OpKind::SlashEqual, "SLASHEQUAL"),
    (":=", OpKind::ColonEqual, "COLONEQUAL"),
    ("<<", OpKind::LeftShift, "LEFTSHIFT"),
    ("<=", OpKind::LessEqual, "LESSEQUAL"),
    ("==", OpKind::EqEqual, "EQEQUAL"),
    (">=", OpKind::GreaterEqual, "GREATEREQUAL"),
    (">>", OpKind::RightShift, "RIGHTSHIFT"),
    ("@=", OpKind::AtEqual, "ATEQUAL"),
    ("^=", OpKind::CircumflexEqual, "CIRCUMFLEXEQUAL"),
    ("|=", OpKind::VBarEqual, "VBAREQUAL"),
    ("!", OpKind::Exclamation, "EXCLAMATION"),
    ("%", OpKind::Percent, "PERCENT"),
    ("&", OpKind::Amper, "AMPER"),
    ("(", OpKind::LPar, "LPAR"),
    (")", OpKind::RPar, "RPAR"),
    ("*", OpKind::Star, "STAR"),
    ("+", OpKind::Plus, "PLUS"),
    (",", OpKind::Comma, "COMMA"),
    ("-", OpKind::Minus, "MINUS"),
    (".", OpKind::Dot, "DOT"),
    ("/", OpKind::Slash, "SLASH"),
    (":", OpKind::Colon, "COLON"),
    (";", OpKind::Semi, "SEMI"),
    ("<", OpKind::Less, "LESS"),
    ("=", OpKind::Equal, "EQUAL"),
    (">", OpKind::Greater, "GREATER"),
    ("@", OpKind::At, "AT"),
    ("[", OpKind::LSqb, "LSQB"),
    ("]", OpKind::RSqb, "RSQB"),
    ("^", OpKind::Circumflex, "CIRCUMFLEX"),
    ("{", OpKind::LBrace, "LBRACE"),
    ("|", OpKind::VBar, "VBAR"),
    ("}", OpKind::RBrace, "RBRACE"),
    ("~", OpKind::Tilde, "TILDE"),
];

impl OpKind {
    /// Parses an exact operator spelling.
    pub fn from_text(text: &str) -> Option<OpKind> {
        OPERATORS
            .iter()
            .find(|(op, _, _)| *op == text)
            .map(|(_, kind, _)| *kind)
    }

    /// Returns the longest operator at the start of `text`.
    pub fn longest_prefix(text: &str) -> Option<(OpKind, usize)> {
        OPERATORS
            .iter()
            .find(|(op, _, _)| text.starts_with(op))
            .map(|(op, kind, _)| (*kind, op.len()))
    }

    /// Python token name, e.g. `"EQUAL"`; also the style book key.
    pub fn name(&self) -> &'static str {
        OPERATORS
            .iter()
            .find(|(_, kind, _)| kind == self)
            .map(|(_, _, name)| *name)
            .unwrap_or("OP")
    }

    pub fn opens_bracket(&self) -> bool {
        matches!(self, OpKind::LPar | OpKind::LSqb | OpKind::LBrace)
    }

    pub fn closes_bracket(&self) -> bool {
        matches!(self, OpKind::RPar | OpKind::RSqb | OpKind::RBrace)
    }
}

/// Semantic category of a classified token.
///
/// The first group mirrors [`TokenKind`]; the second group is assigned by
/// the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Name,
    Op,
    String,
    Comment,
    Number,
    Newline,
    Nl,
    Indent,
    Dedent,
    EndMarker,
    ErrorToken,

    Keyword,
    Builtin,
    Docstring,
    FunctionName,
    ClassName,
    ImportName,
    AssignmentTarget,
    PrivateName,
    SelfReference,
}

impl Category {
    pub const ALL: [Category; 20] = [
        Category::Name,
        Category::Op,
        Category::String,
        Category::Comment,
        Category::Number,
        Category::Newline,
        Category::Nl,
        Category::Indent,
        Category::Dedent,
        Category::EndMarker,
        Category::ErrorToken,
        Category::Keyword,
        Category::Builtin,
        Category::Docstring,
        Category::FunctionName,
        Category::ClassName,
        Category::ImportName,
        Category::AssignmentTarget,
        Category::PrivateName,
        Category::SelfReference,
    ];

    /// Returns the style book key for this category.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Name => "NAME",
            Category::Op => "OP",
            Category::String => "STRING",
            Category::Comment => "COMMENT",
            Category::Number => "NUMBER",
            Category::Newline => "NEWLINE",
            Category::Nl => "NL",
            Category::Indent => "INDENT",
            Category::Dedent => "DEDENT",
            Category::EndMarker => "ENDMARKER",
            Category::ErrorToken => "ERRORTOKEN",
            Category::Keyword => "KEYWORD",
            Category::Builtin => "BUILTIN",
            Category::Docstring => "DOCSTRING",
            Category::FunctionName => "FNAME",
            Category::ClassName => "CNAME",
            Category::ImportName => "INAME",
            Category::AssignmentTarget => "LVAL",
            Category::PrivateName => "HIDDEN",
            Category::SelfReference => "SELF",
        }
    }

    /// Long, self-describing alias accepted alongside [`Category::name`].
    pub fn alias(&self) -> Option<&'static str> {
        match self {
            Category::FunctionName => Some("FUNCTION_NAME"),
            Category::ClassName => Some("CLASS_NAME"),
            Category::ImportName => Some("IMPORT_NAME"),
            Category::AssignmentTarget => Some("ASSIGNMENT_TARGET"),
            Category::PrivateName => Some("PRIVATE_NAME"),
            Category::SelfReference => Some("SELF_REFERENCE"),
            _ => None,
        }
    }

    /// Parses a style book key (case-sensitive) or its alias.
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.name() == name || category.alias() == Some(name))
    }
}

impl From<TokenKind> for Category {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Name => Category::Name,
            TokenKind::Op => Category::Op,
            TokenKind::String => Category::String,
            TokenKind::Comment => Category::Comment,
            TokenKind::Number => Category::Number,
            TokenKind::Newline => Category::Newline,
            TokenKind::Nl => Category::Nl,
            TokenKind::Indent => Category::Indent,
            TokenKind::Dedent => Category::Dedent,
            TokenKind::EndMarker => Category::EndMarker,
            TokenKind::ErrorToken => Category::ErrorToken,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexer token with its semantic category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedToken {
    pub raw: RawToken,
    pub category: Category,
    /// Set for operator tokens.
    pub exact_kind: Option<OpKind>,
}

impl ClassifiedToken {
    pub fn kind(&self) -> TokenKind {
        self.raw.kind
    }

    pub fn text(&self) -> &str {
        &self.raw.text
    }

    pub fn start(&self) -> Position {
        self.raw.start
    }

    pub fn end(&self) -> Position {
        self.raw.end
    }

    pub fn span(&self) -> Range<usize> {
        self.raw.span.clone()
    }
}

impl AsRef<RawToken> for ClassifiedToken {
    fn as_ref(&self) -> &RawToken {
        &self.raw
    }
}
