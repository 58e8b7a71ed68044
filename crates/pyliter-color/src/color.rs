//! The [`Color`] value type.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog;
use crate::spec::ColorSpec;
use crate::{ColorError, ColorResult};

/// Largest value of an 8-bit channel.
pub const CHANNEL_MAX: u8 = u8::MAX;

/// Name reported for colors missing from the catalog.
pub const UNNAMED: &str = "unnamed";

/// A 32-bit RGBA color: 8 bits each for red, green, blue and alpha.
///
/// Two colors are equal when all four channels are equal. Ordering and
/// hashing use the packed [`Color::value`], so a `Color` sorts the same way
/// its `0xRRGGBBAA` integer does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, CHANNEL_MAX);
    pub const WHITE: Color = Color::new(CHANNEL_MAX, CHANNEL_MAX, CHANNEL_MAX, CHANNEL_MAX);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Opaque color from three channels.
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, CHANNEL_MAX)
    }

    // ==================== Constructors ====================

    /// Builds a color from integer channels, clamping each to `0..=255`.
    pub fn from_channels(red: i64, green: i64, blue: i64, alpha: i64) -> Self {
        Self::new(
            clamp_channel(red),
            clamp_channel(green),
            clamp_channel(blue),
            clamp_channel(alpha),
        )
    }

    /// Looks up an opaque color by catalog name.
    ///
    /// Whitespace anywhere in `name` is ignored and matching is
    /// case-insensitive, so `"Alice Blue"` finds `aliceblue`.
    pub fn from_name(name: &str) -> ColorResult<Self> {
        Self::from_name_with_alpha(name, CHANNEL_MAX)
    }

    /// Looks up a color by catalog name with an explicit alpha channel.
    pub fn from_name_with_alpha(name: &str, alpha: u8) -> ColorResult<Self> {
        let key = catalog::normalize_name(name);
        let (red, green, blue) = catalog::lookup(&key)
            .ok_or_else(|| ColorError::NameNotFound(name.to_string()))?;
        Ok(Self::new(red, green, blue, alpha))
    }

    /// Decodes a hex color string.
    ///
    /// Accepts an optional `#` or `0x` prefix followed by 3 (`RGB`),
    /// 4 (`RGBA`), 6 (`RRGGBB`) or 8 (`RRGGBBAA`) hex digits. Short forms
    /// scale each nibble to a full byte, so `#f00` is `#ff0000ff`. Forms
    /// without alpha are opaque.
    pub fn from_hex(spec: &str) -> ColorResult<Self> {
        let digits = spec
            .strip_prefix('#')
            .or_else(|| spec.strip_prefix("0x"))
            .unwrap_or(spec);

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::Decode(spec.to_string()));
        }

        let bytes = digits.as_bytes();
        let channels: Vec<u8> = match bytes.len() {
            3 | 4 => bytes.iter().map(|&b| nibble(b) * 17).collect(),
            6 | 8 => bytes
                .chunks(2)
                .map(|pair| nibble(pair[0]) << 4 | nibble(pair[1]))
                .collect(),
            _ => return Err(ColorError::Decode(spec.to_string())),
        };

        let alpha = channels.get(3).copied().unwrap_or(CHANNEL_MAX);
        Ok(Self::new(channels[0], channels[1], channels[2], alpha))
    }

    /// Unpacks a `0xRRGGBBAA` integer.
    pub const fn from_value(value: u32) -> Self {
        let [red, green, blue, alpha] = value.to_be_bytes();
        Self::new(red, green, blue, alpha)
    }

    /// Builds a color from normalized channels, clamping each to `[0, 1]`.
    pub fn from_scale(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self::new(
            scale_channel(red),
            scale_channel(green),
            scale_channel(blue),
            scale_channel(alpha),
        )
    }

    /// Builds a color from hue (degrees), saturation, lightness and alpha.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        let (h, s, l) = (normalize_hue(hue), unit(saturation), unit(lightness));

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let (r, g, b) = hue_sector(h, chroma);
        let m = l - chroma / 2.0;

        Self::from_scale(r + m, g + m, b + m, alpha)
    }

    /// Builds a color from hue (degrees), saturation, value and alpha.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64, alpha: f64) -> Self {
        let (h, s, v) = (normalize_hue(hue), unit(saturation), unit(value));

        let chroma = v * s;
        let (r, g, b) = hue_sector(h, chroma);
        let m = v - chroma;

        Self::from_scale(r + m, g + m, b + m, alpha)
    }

    /// Builds a color from cyan, magenta, yellow, key (black) and alpha.
    pub fn from_cmyk(cyan: f64, magenta: f64, yellow: f64, key: f64, alpha: f64) -> Self {
        let k = unit(key);
        Self::from_scale(
            (1.0 - unit(cyan)) * (1.0 - k),
            (1.0 - unit(magenta)) * (1.0 - k),
            (1.0 - unit(yellow)) * (1.0 - k),
            alpha,
        )
    }

    /// Tries every interpretation of a configuration value in priority
    /// order and returns the first color produced.
    pub fn from_any(spec: &ColorSpec) -> ColorResult<Self> {
        spec.resolve()
    }

    /// Returns a copy with a different alpha channel.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self::new(self.red, self.green, self.blue, alpha)
    }

    // ==================== Derived Representations ====================

    /// Eight lowercase hex digits prefixed with `#`: `#rrggbbaa`.
    pub fn hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            self.red, self.green, self.blue, self.alpha
        )
    }

    /// The color packed into a `0xRRGGBBAA` integer.
    pub const fn value(&self) -> u32 {
        u32::from_be_bytes([self.red, self.green, self.blue, self.alpha])
    }

    pub const fn rgba(&self) -> (u8, u8, u8, u8) {
        (self.red, self.green, self.blue, self.alpha)
    }

    pub const fn rgb(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Normalized channels rounded to two decimal places.
    pub fn rgba_f(&self) -> (f64, f64, f64, f64) {
        (
            channel_scale(self.red),
            channel_scale(self.green),
            channel_scale(self.blue),
            channel_scale(self.alpha),
        )
    }

    pub fn rgb_f(&self) -> (f64, f64, f64) {
        let (r, g, b, _) = self.rgba_f();
        (r, g, b)
    }

    /// Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
    ///
    /// Achromatic colors report hue and saturation 0.
    pub fn hsl(&self) -> (f64, f64, f64) {
        let (max, min, delta) = self.extremes();
        let lightness = (max + min) / 2.0;
        let saturation = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - (2.0 * lightness - 1.0).abs())
        };
        (self.hue(max, delta), saturation, lightness)
    }

    /// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
    pub fn hsv(&self) -> (f64, f64, f64) {
        let (max, _, delta) = self.extremes();
        let saturation = if max == 0.0 { 0.0 } else { delta / max };
        (self.hue(max, delta), saturation, max)
    }

    /// Cyan, magenta, yellow and key in `[0, 1]`. Black is `(0, 0, 0, 1)`.
    pub fn cmyk(&self) -> (f64, f64, f64, f64) {
        let (r, g, b) = self.unit_rgb();
        let key = 1.0 - r.max(g).max(b);
        if key >= 1.0 {
            return (0.0, 0.0, 0.0, 1.0);
        }
        let ink = |channel: f64| (1.0 - channel - key) / (1.0 - key);
        (ink(r), ink(g), ink(b), key)
    }

    /// Catalog name of the RGB triple, or `"unnamed"`. Alpha is ignored.
    pub fn name(&self) -> &'static str {
        catalog::reverse_lookup(self.rgb()).unwrap_or(UNNAMED)
    }

    /// Every catalog name for the RGB triple, including alternate spellings
    /// shadowed by [`Color::name`].
    pub fn names(&self) -> Vec<&'static str> {
        catalog::names_for(self.rgb())
    }

    fn unit_rgb(&self) -> (f64, f64, f64) {
        let unit = |channel: u8| f64::from(channel) / f64::from(CHANNEL_MAX);
        (unit(self.red), unit(self.green), unit(self.blue))
    }

    fn extremes(&self) -> (f64, f64, f64) {
        let (r, g, b) = self.unit_rgb();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        (max, min, max - min)
    }

    fn hue(&self, max: f64, delta: f64) -> f64 {
        if delta == 0.0 {
            return 0.0;
        }
        let (r, g, b) = self.unit_rgb();
        let hue = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        normalize_hue(hue)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl PartialOrd for Color {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Color {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self::from_value(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.value()
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Parses a catalog name or hex string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorSpec::Text(s.to_string()).resolve()
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let spec = ColorSpec::deserialize(deserializer)?;
        spec.resolve().map_err(serde::de::Error::custom)
    }
}

// ==================== Channel Helpers ====================

fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, i64::from(CHANNEL_MAX)) as u8
}

/// Clamps to `[0, 1]`; NaN becomes 0.
fn unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

fn scale_channel(value: f64) -> u8 {
    (unit(value) * f64::from(CHANNEL_MAX)).round() as u8
}

fn channel_scale(channel: u8) -> f64 {
    (f64::from(channel) / f64::from(CHANNEL_MAX) * 100.0).round() / 100.0
}

fn nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

/// Wraps a hue into `[0, 360)`.
fn normalize_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let hue = hue.rem_euclid(360.0);
    // rem_euclid can round a tiny negative input up to exactly 360
    if hue >= 360.0 { 0.0 } else { hue }
}

/// RGB offsets (before adding `m`) for the 60° sector containing `hue`.
///
/// Sectors are half-open `[60k, 60(k+1))`, so each hue lands in exactly one.
fn hue_sector(hue: f64, chroma: f64) -> (f64, f64, f64) {
    let h = hue / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    match h.floor() as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PALETTE: &[((u8, u8, u8, u8), &str, (f64, f64, f64, f64), &str)] = &[
        ((255, 0, 0, 255), "#ff0000ff", (1.0, 0.0, 0.0, 1.0), "red"),
        ((255, 0, 0, 0), "#ff000000", (1.0, 0.0, 0.0, 0.0), "red"),
        ((0, 128, 0, 255), "#008000ff", (0.0, 0.5, 0.0, 1.0), "green"),
        ((0, 128, 0, 0), "#00800000", (0.0, 0.5, 0.0, 0.0), "green"),
        ((0, 255, 0, 255), "#00ff00ff", (0.0, 1.0, 0.0, 1.0), "lime"),
        ((0, 0, 255, 255), "#0000ffff", (0.0, 0.0, 1.0, 1.0), "blue"),
        ((255, 255, 255, 255), "#ffffffff", (1.0, 1.0, 1.0, 1.0), "white"),
        ((255, 255, 255, 0), "#ffffff00", (1.0, 1.0, 1.0, 0.0), "white"),
        ((0, 0, 0, 255), "#000000ff", (0.0, 0.0, 0.0, 1.0), "black"),
        ((0, 0, 0, 0), "#00000000", (0.0, 0.0, 0.0, 0.0), "black"),
    ];

    fn check(color: Color, expected: &((u8, u8, u8, u8), &str, (f64, f64, f64, f64), &str)) {
        let (rgba, hex, floats, name) = expected;
        assert_eq!(color.rgba(), *rgba);
        assert_eq!(color.hex(), *hex);
        assert_eq!(color.rgba_f(), *floats);
        assert_eq!(color.name(), *name);
    }

    #[test]
    fn test_palette_constructors() {
        for entry in PALETTE {
            let (r, g, b, a) = entry.0;
            check(Color::new(r, g, b, a), entry);
            check(Color::from_name_with_alpha(entry.3, a).unwrap(), entry);
            check(Color::from_hex(entry.1).unwrap(), entry);
            check(Color::from_value(u32::from_str_radix(&entry.1[1..], 16).unwrap()), entry);
            let (fr, fg, fb, fa) = entry.2;
            check(Color::from_scale(fr, fg, fb, fa), entry);
        }
    }

    #[test]
    fn test_channels_clamp() {
        assert_eq!(Color::from_channels(256, 256, 256, 256).rgba(), (255, 255, 255, 255));
        assert_eq!(Color::from_channels(-1, -1, -1, -1).rgba(), (0, 0, 0, 0));
        assert_eq!(Color::from_channels(i64::MAX, 12, i64::MIN, 300).rgba(), (255, 12, 0, 255));
    }

    #[test]
    fn test_scale_clamps() {
        assert_eq!(Color::from_scale(-1.0, -2.5, 1.1, f64::NAN).rgba(), (0, 0, 255, 0));
        assert_eq!(Color::from_scale(0.25, 0.5, 0.0, 1.0).rgb(), (64, 128, 0));
    }

    #[test]
    fn test_short_hex_scaling() {
        assert_eq!(Color::from_hex("#f00").unwrap().hex(), "#ff0000ff");
        assert_eq!(Color::from_hex("#000f").unwrap().hex(), "#000000ff");
        assert_eq!(Color::from_hex("#0000").unwrap().hex(), "#00000000");
        assert_eq!(Color::from_hex("#f000").unwrap().hex(), "#ff000000");

        let digits = "0123456789abcdef";
        for (i, d) in digits.chars().enumerate() {
            let expected = format!("#0000{:02x}ff", i * 17);
            assert_eq!(Color::from_hex(&format!("#00{d}")).unwrap().hex(), expected);
            let expected = format!("#{:02x}0000ff", i * 17);
            assert_eq!(Color::from_hex(&format!("#{d}00")).unwrap().hex(), expected);
        }
    }

    #[test]
    fn test_hex_prefixes_and_case() {
        for spec in ["#aabbccdd", "#AABBCCDD", "aabbccdd", "AABBCCDD", "0xaabbccdd", "0xAABBCCDD"] {
            assert_eq!(Color::from_hex(spec).unwrap().hex(), "#aabbccdd", "{spec}");
        }
        assert_eq!(Color::from_hex("#123456").unwrap().rgba(), (0x12, 0x34, 0x56, 0xff));
    }

    #[test]
    fn test_invalid_hex_rejected() {
        for spec in ["", "#", "f", "ff", "fffff", "fffffff", "fffffffff", "foobar", "#ggg", "0x", "ÿÿÿ", "#0xfff", "0x#fff"] {
            assert!(
                matches!(Color::from_hex(spec), Err(ColorError::Decode(_))),
                "{spec:?} should not decode"
            );
        }
    }

    #[test]
    fn test_name_lookup_normalizes() {
        let color = Color::from_name(" Alice\tBlue\r\n").unwrap();
        assert_eq!(color.rgb(), (240, 248, 255));
        assert_eq!(color.name(), "aliceblue");

        let err = Color::from_name("mojojojo fruit salad").unwrap_err();
        assert_eq!(err, ColorError::NameNotFound("mojojojo fruit salad".to_string()));
    }

    #[test]
    fn test_unnamed_and_alternate_names() {
        assert_eq!(Color::new(11, 22, 33, 44).name(), UNNAMED);

        let cyan = Color::from_name("cyan").unwrap();
        assert_eq!(cyan.name(), "aqua");
        assert_eq!(cyan.names(), vec!["aqua", "cyan"]);
    }

    #[test]
    fn test_hsl_known_values() {
        assert_eq!(Color::from_hsl(0.0, 1.0, 0.5, 1.0).rgb(), (255, 0, 0));
        assert_eq!(Color::from_hsl(120.0, 1.0, 0.25, 1.0).rgb(), (0, 128, 0));
        assert_eq!(Color::from_hsl(-120.0, 1.0, 0.5, 1.0).rgb(), (0, 0, 255));
        assert_eq!(Color::from_hsl(360.0, 1.0, 0.5, 1.0).rgb(), (255, 0, 0));
        assert_eq!(Color::from_hsl(0.0, 0.0, 0.5, 0.5).rgba(), (128, 128, 128, 128));

        let (h, s, l) = Color::opaque(255, 0, 0).hsl();
        assert_eq!((h, s, l), (0.0, 1.0, 0.5));
        assert_eq!(Color::opaque(128, 128, 128).hsl().1, 0.0);
    }

    #[test]
    fn test_sector_boundaries() {
        let expected = [
            (0.0, (255, 0, 0)),
            (60.0, (255, 255, 0)),
            (120.0, (0, 255, 0)),
            (180.0, (0, 255, 255)),
            (240.0, (0, 0, 255)),
            (300.0, (255, 0, 255)),
        ];
        for (hue, rgb) in expected {
            assert_eq!(Color::from_hsv(hue, 1.0, 1.0, 1.0).rgb(), rgb, "hue {hue}");
            assert_eq!(Color::from_hsl(hue, 1.0, 0.5, 1.0).rgb(), rgb, "hue {hue}");
        }
    }

    #[test]
    fn test_cmyk() {
        assert_eq!(Color::opaque(255, 0, 0).cmyk(), (0.0, 1.0, 1.0, 0.0));
        assert_eq!(Color::BLACK.cmyk(), (0.0, 0.0, 0.0, 1.0));
        assert_eq!(Color::from_cmyk(0.0, 1.0, 1.0, 0.0, 1.0).rgb(), (255, 0, 0));
        assert_eq!(Color::from_cmyk(0.0, 0.0, 0.0, 1.0, 1.0).rgb(), (0, 0, 0));
    }

    #[test]
    fn test_catalog_colors_round_trip_through_hsl_and_hsv() {
        for layer in catalog::layers() {
            for (name, (r, g, b)) in layer.entries {
                let color = Color::opaque(*r, *g, *b);
                let (h, s, l) = color.hsl();
                let alpha = color.rgba_f().3;
                assert_eq!(Color::from_hsl(h, s, l, alpha).rgba(), color.rgba(), "hsl {name}");
                let (h, s, v) = color.hsv();
                assert_eq!(Color::from_hsv(h, s, v, alpha).rgba(), color.rgba(), "hsv {name}");
            }
        }
    }

    #[test]
    fn test_ordering_and_hash_follow_value() {
        use std::collections::HashSet;

        let low = Color::new(0, 0, 0, 255);
        let high = Color::new(0, 0, 1, 0);
        assert!(low < high);
        assert_eq!(low.max(high), high);

        let set: HashSet<Color> = [low, high, Color::from_value(0x000000ff)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_serde_uses_hex_and_specs() {
        let json = serde_json::to_string(&Color::opaque(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#ff0000ff\"");

        let parsed: Color = serde_json::from_str("\"navy\"").unwrap();
        assert_eq!(parsed.rgb(), (0, 0, 128));
        let parsed: Color = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(parsed.rgba(), (1, 2, 3, 255));
        assert!(serde_json::from_str::<Color>("\"not a color\"").is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("red".parse::<Color>().unwrap(), Color::opaque(255, 0, 0));
        assert_eq!("#0f0".parse::<Color>().unwrap(), Color::opaque(0, 255, 0));
        assert!("chartreuse-ish".parse::<Color>().is_err());
    }

    proptest! {
        #[test]
        fn prop_channels_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), a in any::<u8>()) {
            let color = Color::from_channels(r.into(), g.into(), b.into(), a.into());
            prop_assert_eq!(color.rgba(), (r, g, b, a));
            prop_assert_eq!(Color::from_hex(&color.hex()).unwrap(), color);
            prop_assert_eq!(Color::from_value(color.value()), color);
        }

        #[test]
        fn prop_hsv_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let color = Color::opaque(r, g, b);
            let (h, s, v) = color.hsv();
            prop_assert_eq!(Color::from_hsv(h, s, v, 1.0), color);
            let (h, s, l) = color.hsl();
            prop_assert_eq!(Color::from_hsl(h, s, l, 1.0), color);
        }
    }
}
