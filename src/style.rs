//! Closed style vocabularies: colors, line styles, markers, legend placement

use serde::{Deserialize, Serialize};

/// Line dash pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// Marker symbol drawn at each raw data point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Circle,
    Square,
    Triangle,
    Diamond,
}

/// Where a panel draws its legend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    UpperLeft,
    #[default]
    UpperRight,
    LowerLeft,
    LowerRight,
    Top,
    Bottom,
    Hidden,
}

/// RGB color stored as `#RRGGBB`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(String);

/// Default series colors, one per family (blue, pink, green, purple, ...)
const PALETTE: [(&str, &str); 8] = [
    ("blue", "#1888F8"),
    ("pink", "#F03888"),
    ("green", "#10D878"),
    ("purple", "#7840F8"),
    ("orange", "#F87800"),
    ("cyan", "#58B8F0"),
    ("gold", "#E8D800"),
    ("red", "#C82828"),
];

impl Color {
    /// Parse `#RRGGBB` (case-insensitive) or a palette name
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(&(_, hex)) = PALETTE.iter().find(|(name, _)| name.eq_ignore_ascii_case(text)) {
            return Some(Self(hex.to_string()));
        }
        let digits = text.strip_prefix('#')?;
        if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(format!("#{}", digits.to_ascii_uppercase())))
        } else {
            None
        }
    }

    /// Palette color for the n-th series, wrapping around
    pub fn palette(index: usize) -> Self {
        Self(PALETTE[index % PALETTE.len()].1.to_string())
    }

    pub fn hex(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::palette(0)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_and_names() {
        assert_eq!(Color::parse("#68b4ff").unwrap().hex(), "#68B4FF");
        assert_eq!(Color::parse("Green").unwrap().hex(), "#10D878");
        assert!(Color::parse("#12345").is_none());
        assert!(Color::parse("chartreuse").is_none());
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(Color::palette(0), Color::palette(PALETTE.len()));
    }
}
