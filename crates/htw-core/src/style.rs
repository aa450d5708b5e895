//! Style parameters and their resolution
//!
//! Callers describe formatting with [`StyleParams`], where every field may be
//! left unset. [`StyleParams::resolve`] fills in the defaults for the kind of
//! block being written, so renderers only ever see a complete
//! [`ResolvedStyle`].

use htw_ooxml::RunProperties;
use serde::{Deserialize, Serialize};

use crate::tables::{parse_color, ChineseFont, Color};

/// Font size used when none (or a non-positive one) is requested
pub const DEFAULT_FONT_SIZE: u32 = 16;

/// First-line indent used when the requested size is not positive, in twips
pub const DEFAULT_FIRST_LINE_INDENT: i64 = 420;

/// Kind of text block, which selects the default font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading,
}

impl BlockKind {
    pub fn default_font(&self) -> ChineseFont {
        match self {
            Self::Paragraph => ChineseFont::FangSongGb2312,
            Self::Heading => ChineseFont::HeiTi,
        }
    }
}

/// Requested formatting for a run of text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleParams {
    /// Font name; unset uses the block kind's default
    pub font_family: Option<String>,
    /// Size in points; zero or negative uses 16
    pub font_size: i32,
    pub bold: bool,
    /// Colour name or RGB hex; unset or blank is black
    pub color: Option<String>,
}

impl StyleParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn font(self, font: ChineseFont) -> Self {
        self.font_family(font.as_str())
    }

    pub fn font_size(mut self, points: i32) -> Self {
        self.font_size = points;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Fill in every unset value for `kind`
    pub fn resolve(&self, kind: BlockKind) -> ResolvedStyle {
        let font_family = match self.font_family.as_deref().map(str::trim) {
            Some(family) if !family.is_empty() => family.to_string(),
            _ => kind.default_font().as_str().to_string(),
        };

        let font_size = if self.font_size > 0 {
            self.font_size as u32
        } else {
            DEFAULT_FONT_SIZE
        };

        let color = match self.color.as_deref() {
            Some(value) if !value.trim().is_empty() => parse_color(value).unwrap_or_else(|| {
                log::warn!("Unrecognized color '{}', using black", value);
                Color::Black.hex().to_string()
            }),
            _ => Color::Black.hex().to_string(),
        };

        ResolvedStyle {
            font_family,
            font_size,
            bold: self.bold,
            color,
        }
    }
}

/// Formatting with every value populated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub font_family: String,
    /// Size in points, always positive
    pub font_size: u32,
    pub bold: bool,
    /// Six-digit RGB hex
    pub color: String,
}

impl ResolvedStyle {
    pub fn to_run_properties(&self) -> RunProperties {
        RunProperties {
            bold: self.bold,
            font_family: Some(self.font_family.clone()),
            font_size: Some(self.font_size),
            color: Some(self.color.clone()),
        }
    }
}

/// First-line indent of a body paragraph for a requested font size
///
/// Two characters wide: `size * 2 * 20` twips, or 420 when the requested
/// size is not positive.
pub fn first_line_indent(requested_size: i32) -> i64 {
    if requested_size > 0 {
        i64::from(requested_size) * 2 * 20
    } else {
        DEFAULT_FIRST_LINE_INDENT
    }
}
