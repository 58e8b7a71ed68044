//! General-purpose color specifications as they appear in configuration.
//!
//! A style book may write a color as an integer, a catalog name, a hex
//! string or a channel array. Any other value (a float, a boolean, a table)
//! is still accepted as [`ColorSpec::Other`] so that it fails during color
//! decoding, where the caller knows which attribute it belongs to.
//! [`ColorSpec::resolve`] tries each
//! [`Interpretation`] in a fixed order and keeps the outcome of every failed
//! attempt so the final error explains what was tried.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Color, ColorError, ColorResult};

/// A color value before interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Integer(i64),
    Channels(Vec<i64>),
    Text(String),
    /// A value of no supported shape; no interpretation accepts it.
    Other(serde_json::Value),
}

/// One way of reading a [`ColorSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpretation {
    Integer,
    Name,
    Hex,
    Channels,
}

impl Interpretation {
    /// Priority order used by [`ColorSpec::resolve`].
    pub const ORDER: [Interpretation; 4] = [
        Interpretation::Integer,
        Interpretation::Name,
        Interpretation::Hex,
        Interpretation::Channels,
    ];
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Interpretation::Integer => "integer",
            Interpretation::Name => "name",
            Interpretation::Hex => "hex",
            Interpretation::Channels => "channels",
        };
        f.write_str(name)
    }
}

/// The failed outcome of one interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub interpretation: Interpretation,
    pub error: ColorError,
}

impl ColorSpec {
    /// Returns the first successful interpretation in [`Interpretation::ORDER`].
    pub fn resolve(&self) -> ColorResult<Color> {
        let mut attempts = Vec::with_capacity(Interpretation::ORDER.len());

        for interpretation in Interpretation::ORDER {
            match self.interpret(interpretation) {
                Ok(color) => return Ok(color),
                Err(error) => attempts.push(Attempt {
                    interpretation,
                    error,
                }),
            }
        }

        tracing::debug!(spec = %self, "no color interpretation succeeded");
        Err(ColorError::Unrecognized {
            spec: self.to_string(),
            attempts,
        })
    }

    /// Reads the spec one specific way.
    ///
    /// A spec of the wrong shape for the interpretation fails with
    /// [`ColorError::Decode`], e.g. an integer offered to hex decoding.
    pub fn interpret(&self, interpretation: Interpretation) -> ColorResult<Color> {
        match (interpretation, self) {
            (Interpretation::Integer, ColorSpec::Integer(value)) => u32::try_from(*value)
                .map(Color::from_value)
                .map_err(|_| ColorError::Decode(value.to_string())),
            (Interpretation::Name, ColorSpec::Text(name)) => Color::from_name(name),
            (Interpretation::Hex, ColorSpec::Text(hex)) => Color::from_hex(hex),
            (Interpretation::Channels, ColorSpec::Channels(channels)) => match channels.as_slice() {
                [r, g, b] => Ok(Color::from_channels(*r, *g, *b, 255)),
                [r, g, b, a] => Ok(Color::from_channels(*r, *g, *b, *a)),
                other => Err(ColorError::InvalidChannels(other.len())),
            },
            (_, spec) => Err(ColorError::Decode(spec.to_string())),
        }
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSpec::Integer(value) => write!(f, "{value}"),
            ColorSpec::Channels(channels) => write!(f, "{channels:?}"),
            ColorSpec::Text(text) => write!(f, "{text:?}"),
            ColorSpec::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(text: &str) -> Self {
        ColorSpec::Text(text.to_string())
    }
}

impl From<i64> for ColorSpec {
    fn from(value: i64) -> Self {
        ColorSpec::Integer(value)
    }
}

impl From<Vec<i64>> for ColorSpec {
    fn from(channels: Vec<i64>) -> Self {
        ColorSpec::Channels(channels)
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        ColorSpec::Text(color.hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_priority() {
        assert_eq!(
            ColorSpec::from(0xff0000ff_i64).resolve().unwrap(),
            Color::opaque(255, 0, 0)
        );
        assert_eq!(ColorSpec::from("teal").resolve().unwrap(), Color::opaque(0, 128, 128));
        assert_eq!(ColorSpec::from("0x00ff0080").resolve().unwrap(), Color::new(0, 255, 0, 128));
        assert_eq!(
            ColorSpec::from(vec![300, 20, -5]).resolve().unwrap(),
            Color::opaque(255, 20, 0)
        );
    }

    #[test]
    fn test_text_tries_name_then_hex() {
        assert_eq!(ColorSpec::from("bed").resolve().unwrap(), Color::opaque(0xbb, 0xee, 0xdd));
        assert_eq!(ColorSpec::from("beige").resolve().unwrap(), Color::opaque(245, 245, 220));
    }

    #[test]
    fn test_unrecognized_lists_attempts() {
        let err = ColorSpec::from("not-a-color").resolve().unwrap_err();
        let ColorError::Unrecognized { spec, attempts } = err else {
            panic!("expected Unrecognized");
        };
        assert_eq!(spec, "\"not-a-color\"");
        let tried: Vec<_> = attempts.iter().map(|a| a.interpretation).collect();
        assert_eq!(tried, Interpretation::ORDER.to_vec());
        assert!(matches!(attempts[1].error, ColorError::NameNotFound(_)));
        assert!(matches!(attempts[2].error, ColorError::Decode(_)));
    }

    #[test]
    fn test_wrong_shapes() {
        let integer = ColorSpec::Integer(0xFFAABBCC);
        assert!(matches!(integer.interpret(Interpretation::Hex), Err(ColorError::Decode(_))));
        assert!(ColorSpec::Integer(-1).resolve().is_err());
        assert!(ColorSpec::Integer(i64::from(u32::MAX) + 1).resolve().is_err());
        assert_eq!(
            ColorSpec::from(vec![1, 2]).interpret(Interpretation::Channels),
            Err(ColorError::InvalidChannels(2))
        );
    }

    #[test]
    fn test_deserialize_untagged() {
        let spec: ColorSpec = serde_json::from_str("16711935").unwrap();
        assert_eq!(spec, ColorSpec::Integer(16711935));
        let spec: ColorSpec = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(spec, ColorSpec::Channels(vec![1, 2, 3, 4]));
        let spec: ColorSpec = serde_json::from_str("\"#abc\"").unwrap();
        assert_eq!(spec, ColorSpec::Text("#abc".to_string()));
    }

    #[test]
    fn test_unsupported_shapes_fail_to_resolve() {
        for text in ["1.5", "[0.5, 0.5, 0.5]", "true", "{}", "[\"red\", 1, 2]"] {
            let spec: ColorSpec = serde_json::from_str(text).unwrap();
            assert!(matches!(spec, ColorSpec::Other(_)), "{text} parsed as {spec:?}");

            let err = spec.resolve().unwrap_err();
            let ColorError::Unrecognized { attempts, .. } = err else {
                panic!("expected Unrecognized for {text}");
            };
            assert!(attempts.iter().all(|a| matches!(a.error, ColorError::Decode(_))));
        }

        let spec: ColorSpec = serde_json::from_str("1.5").unwrap();
        assert_eq!(spec.to_string(), "1.5");
    }
}
