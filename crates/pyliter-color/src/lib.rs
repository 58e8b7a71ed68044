//! # Pyliter Color
//!
//! 32-bit RGBA colors for syntax highlighting styles.
//!
//! ## Representations
//!
//! A [`Color`] is four 8-bit channels. Every other representation is derived
//! from those channels:
//! - `#rrggbbaa` hex strings and packed `u32` values
//! - normalized floats in `[0, 1]`
//! - HSL, HSV and CMYK
//! - names from the [`catalog`]
//!
//! ## Learning: Saturating Arithmetic
//!
//! Out-of-range inputs never fail. Integers are clamped to `0..=255` and
//! floats to `0.0..=1.0` before conversion, so constructors that cannot
//! fail return `Color` directly instead of `Result<Color, _>`.

pub mod catalog;
mod color;
mod spec;

pub use catalog::{Catalog, Layer};
pub use color::Color;
pub use spec::{Attempt, ColorSpec, Interpretation};

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;

/// Errors that can occur while decoding colors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("cannot decode '{0}'")]
    Decode(String),

    #[error("color name not found: {0}")]
    NameNotFound(String),

    #[error("expected 3 or 4 channels, found {0}")]
    InvalidChannels(usize),

    #[error("no interpretation of {spec} is a color ({} attempts)", .attempts.len())]
    Unrecognized { spec: String, attempts: Vec<Attempt> },
}
