use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// sRGB color, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{0}`: expected a CSS color name, #rgb or #rrggbb")]
pub struct ColorParseError(pub String);

const NAMED_COLORS: &[(&str, u32)] = &[
    ("aqua", 0x00ffff),
    ("black", 0x000000),
    ("blue", 0x0000ff),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkgray", 0xa9a9a9),
    ("darkgrey", 0xa9a9a9),
    ("fuchsia", 0xff00ff),
    ("gold", 0xffd700),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("grey", 0x808080),
    ("hotpink", 0xff69b4),
    ("indigo", 0x4b0082),
    ("lightblue", 0xadd8e6),
    ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightgrey", 0xd3d3d3),
    ("lime", 0x00ff00),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("navy", 0x000080),
    ("olive", 0x808000),
    ("orange", 0xffa500),
    ("pink", 0xffc0cb),
    ("purple", 0x800080),
    ("red", 0xff0000),
    ("royalblue", 0x4169e1),
    ("salmon", 0xfa8072),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("steelblue", 0x4682b4),
    ("teal", 0x008080),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("white", 0xffffff),
    ("yellow", 0xffff00),
];

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self::from_bytes([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8])
    }

    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(
            bytes[0] as f32 / 255.0,
            bytes[1] as f32 / 255.0,
            bytes[2] as f32 / 255.0,
        )
    }

    /// Look up a CSS color name, ignoring case
    pub fn named(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        NAMED_COLORS
            .binary_search_by_key(&lower.as_str(), |(n, _)| *n)
            .ok()
            .map(|i| Self::from_hex(NAMED_COLORS[i].1))
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to linear light for shading
    pub fn to_linear(self) -> [f32; 3] {
        self.to_array().map(srgb_to_linear)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ColorParseError(s.to_string());

        let Some(hex) = trimmed.strip_prefix('#') else {
            return Rgb::named(trimmed).ok_or_else(err);
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        match hex.len() {
            6 => u32::from_str_radix(hex, 16).map(Rgb::from_hex).map_err(|_| err()),
            3 => {
                let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16).map(Rgb::from_hex).map_err(|_| err())
            }
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_bytes();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_are_sorted() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_named_lookup_ignores_case() {
        assert_eq!(Rgb::named("lightBlue"), Rgb::named("lightblue"));
        assert_eq!(Rgb::named("lightBlue").unwrap().to_bytes(), [0xad, 0xd8, 0xe6]);
        assert_eq!(Rgb::named("HotPink").unwrap().to_bytes(), [0xff, 0x69, 0xb4]);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#ffa500".parse::<Rgb>().unwrap().to_bytes(), [0xff, 0xa5, 0x00]);
        assert_eq!("#0f0".parse::<Rgb>().unwrap().to_bytes(), [0x00, 0xff, 0x00]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
        assert!("not-a-color".parse::<Rgb>().is_err());
        assert!("".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(Rgb::named("orange").unwrap().to_string(), "#ffa500");
    }

    #[test]
    fn test_linear_conversion() {
        let linear = Rgb::WHITE.to_linear();
        assert!(linear.iter().all(|c| (c - 1.0).abs() < 1e-6));

        let mid = Rgb::new(0.5, 0.5, 0.5).to_linear();
        assert!((mid[0] - 0.214).abs() < 0.001);
    }

    #[test]
    fn test_serde_as_string() {
        let color: Rgb = serde_json::from_str("\"orange\"").unwrap();
        assert_eq!(color.to_bytes(), [0xff, 0xa5, 0x00]);
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#ffa500\"");
        assert!(serde_json::from_str::<Rgb>("\"nope\"").is_err());
    }
}
