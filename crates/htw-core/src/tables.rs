//! Static style tables
//!
//! Named fonts and colours accepted by the style parameters. Both tables
//! deserialize from their display value or their variant name, so a config
//! file can say either `font = "黑体"` or `font = "hei_ti"`.

use serde::{Deserialize, Serialize};

/// Chinese font families with their installed font names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChineseFont {
    /// 宋体
    SongTi,
    /// 仿宋GB2312, the body text default
    FangSongGb2312,
    /// 黑体, the heading default
    HeiTi,
    /// 楷体
    KaiTi,
    /// 隶书
    LiShu,
    /// 幼圆
    YouYuan,
}

impl ChineseFont {
    pub const ALL: [ChineseFont; 6] = [
        Self::SongTi,
        Self::FangSongGb2312,
        Self::HeiTi,
        Self::KaiTi,
        Self::LiShu,
        Self::YouYuan,
    ];

    /// Font name as written to `w:rFonts`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SongTi => "宋体",
            Self::FangSongGb2312 => "仿宋GB2312",
            Self::HeiTi => "黑体",
            Self::KaiTi => "楷体",
            Self::LiShu => "隶书",
            Self::YouYuan => "幼圆",
        }
    }

    /// Look up a font by its installed name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl std::fmt::Display for ChineseFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named RGB colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
    Red,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 5] = [Self::Black, Self::White, Self::Red, Self::Green, Self::Blue];

    /// Six-digit hex value without `#`
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Black => "000000",
            Self::White => "FFFFFF",
            Self::Red => "FF0000",
            Self::Green => "00FF00",
            Self::Blue => "0000FF",
        }
    }

    /// Look up a colour by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "black" => Some(Self::Black),
            "white" => Some(Self::White),
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "blue" => Some(Self::Blue),
            _ => None,
        }
    }
}

/// Normalize a colour given as a name, `#RRGGBB` or `RRGGBB`
///
/// Returns `None` for blank or unrecognized input.
pub fn parse_color(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Some(color) = Color::from_name(value) {
        return Some(color.hex().to_string());
    }
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(hex.to_ascii_uppercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_names() {
        assert_eq!(ChineseFont::FangSongGb2312.as_str(), "仿宋GB2312");
        assert_eq!(ChineseFont::HeiTi.as_str(), "黑体");
        assert_eq!(ChineseFont::from_name("楷体"), Some(ChineseFont::KaiTi));
        assert_eq!(ChineseFont::from_name("Arial"), None);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::Black.hex(), "000000");
        assert_eq!(Color::White.hex(), "FFFFFF");
        assert_eq!(Color::from_name("RED"), Some(Color::Red));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("blue").as_deref(), Some("0000FF"));
        assert_eq!(parse_color("#ff8800").as_deref(), Some("FF8800"));
        assert_eq!(parse_color("00ff00").as_deref(), Some("00FF00"));
        assert_eq!(parse_color("   "), None);
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("purple"), None);
    }
}
