//! # Pyliter Style
//!
//! Style books map token categories to visual attributes.
//!
//! ## Style Book Format
//!
//! A style book is a table of tables keyed by category name, written in
//! TOML (or JSON):
//!
//! ```toml
//! [DEFAULT]
//! color = "white"
//! background_color = "#272822"
//!
//! [KEYWORD]
//! color = [249, 38, 114]
//! bold = true
//!
//! [EQUAL]
//! underline = 0xff0000ff
//! ```
//!
//! `DEFAULT` is required. Category keys are `NAME`, `KEYWORD`, `FNAME`, ...
//! and operator keys like `EQUAL` refine the `OP` style for one operator.
//!
//! ## Learning: Two-Phase Decoding
//!
//! Files deserialize into [`RawStyle`], whose colors are still
//! [`pyliter_color::ColorSpec`] values. Decoding them is a second step so a
//! bad color reports the category and attribute it came from instead of a
//! bare serde error.

mod book;
pub mod builtin;
mod style;

pub use book::{DEFAULT_CATEGORY, StyleBook, StyledToken};
pub use style::{RawStyle, Style};

use pyliter_color::ColorError;

/// Result type for style operations
pub type StyleResult<T> = Result<T, StyleError>;

/// Errors that can occur while loading or saving style books.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("style book has no DEFAULT entry")]
    MissingDefault,

    #[error("invalid {attribute} for {category}: {source}")]
    InvalidColor {
        category: String,
        attribute: &'static str,
        source: ColorError,
    },

    #[error("category {0} is defined more than once")]
    DuplicateCategory(String),

    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
