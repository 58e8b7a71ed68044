//! Visual attributes for a single category.

use pyliter_color::{Color, ColorSpec};
use serde::{Deserialize, Serialize};

use crate::{StyleError, StyleResult};

/// Resolved visual attributes.
///
/// Unset attributes inherit from whatever style this one is merged over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,

    /// Underline color; underlined when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<Color>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_underline(mut self, color: Color) -> Self {
        self.underline = Some(color);
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    /// True when no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Layers `over` on top of `self`; attributes set in `over` win.
    pub fn merge(&self, over: &Style) -> Style {
        Style {
            color: over.color.or(self.color),
            background_color: over.background_color.or(self.background_color),
            underline: over.underline.or(self.underline),
            bold: over.bold.or(self.bold),
            italic: over.italic.or(self.italic),
        }
    }

    /// Makes the background fully transparent, keeping its RGB.
    pub fn transparent(mut self) -> Self {
        self.background_color = self.background_color.map(|color| color.with_alpha(0));
        self
    }
}

/// A style as written in a style book file, before color decoding.
///
/// Color attributes accept anything [`ColorSpec`] does: integers, catalog
/// names, hex strings and channel arrays. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<ColorSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
}

impl RawStyle {
    /// Decodes every color attribute.
    ///
    /// `category` is only used to report which entry failed.
    pub fn resolve(&self, category: &str) -> StyleResult<Style> {
        let decode = |attribute: &'static str, spec: &Option<ColorSpec>| {
            spec.as_ref()
                .map(|spec| {
                    Color::from_any(spec).map_err(|source| StyleError::InvalidColor {
                        category: category.to_string(),
                        attribute,
                        source,
                    })
                })
                .transpose()
        };

        Ok(Style {
            color: decode("color", &self.color)?,
            background_color: decode("background_color", &self.background_color)?,
            underline: decode("underline", &self.underline)?,
            bold: self.bold,
            italic: self.italic,
        })
    }
}

impl From<Style> for RawStyle {
    fn from(style: Style) -> Self {
        Self {
            color: style.color.map(ColorSpec::from),
            background_color: style.background_color.map(ColorSpec::from),
            underline: style.underline.map(ColorSpec::from),
            bold: style.bold,
            italic: style.italic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_overlay() {
        let base = Style::new()
            .with_color(Color::WHITE)
            .with_background(Color::BLACK)
            .with_bold(false);
        let over = Style::new().with_color(Color::opaque(255, 0, 0)).with_bold(true);

        let merged = base.merge(&over);
        assert_eq!(merged.color, Some(Color::opaque(255, 0, 0)));
        assert_eq!(merged.background_color, Some(Color::BLACK));
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.italic, None);

        assert_eq!(base.merge(&Style::new()), base);
    }

    #[test]
    fn test_is_empty() {
        assert!(Style::new().is_empty());
        assert!(!Style::new().with_italic(false).is_empty());
    }

    #[test]
    fn test_transparent_keeps_rgb() {
        let style = Style::new().with_background(Color::opaque(10, 20, 30)).transparent();
        assert_eq!(style.background_color, Some(Color::new(10, 20, 30, 0)));
        assert_eq!(Style::new().transparent(), Style::new());
    }

    #[test]
    fn test_raw_style_resolves_every_spec_shape() {
        let raw = RawStyle {
            color: Some(ColorSpec::from("Alice Blue")),
            background_color: Some(ColorSpec::from(vec![1, 2, 3])),
            underline: Some(ColorSpec::from(0x00ff00ff_i64)),
            bold: Some(true),
            italic: None,
        };
        let style = raw.resolve("KEYWORD").unwrap();
        assert_eq!(style.color, Some(Color::opaque(240, 248, 255)));
        assert_eq!(style.background_color, Some(Color::opaque(1, 2, 3)));
        assert_eq!(style.underline, Some(Color::opaque(0, 255, 0)));
        assert_eq!(style.bold, Some(true));
    }

    #[test]
    fn test_raw_style_reports_failing_attribute() {
        let raw = RawStyle {
            underline: Some(ColorSpec::from("#12345")),
            ..RawStyle::default()
        };
        let err = raw.resolve("STRING").unwrap_err();
        assert!(matches!(
            err,
            StyleError::InvalidColor { ref category, attribute: "underline", .. } if category == "STRING"
        ));
    }

    #[test]
    fn test_round_trip_through_raw() {
        let style = Style::new().with_color(Color::new(1, 2, 3, 4)).with_italic(true);
        assert_eq!(RawStyle::from(style).resolve("X").unwrap(), style);
    }
}
