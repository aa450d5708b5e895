//! Embedded pictures
//!
//! Pictures are registered with a [`Docx`](crate::Docx) through
//! [`Docx::add_picture`](crate::Docx::add_picture), which stores the bytes
//! under `word/media/` and hands back a [`Picture`] handle. The handle is
//! then placed into a run, where it is written as an inline `<w:drawing>`.

use crate::units::EMU_PER_PIXEL;

/// Picture encodings the document container accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PictureFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl PictureFormat {
    /// Look up a format by file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" | "jpe" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "bmp" | "dib" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    /// Canonical file extension used for media part names
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// MIME content type registered in `[Content_Types].xml`
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }

    /// Whether `data` starts with this format's signature
    pub fn matches_signature(&self, data: &[u8]) -> bool {
        match self {
            Self::Png => data.starts_with(b"\x89PNG\r\n\x1a\n"),
            Self::Jpeg => data.starts_with(&[0xFF, 0xD8, 0xFF]),
            Self::Gif => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
            Self::Bmp => data.starts_with(b"BM"),
            Self::Tiff => data.starts_with(b"II*\0") || data.starts_with(b"MM\0*"),
        }
    }
}

/// Handle to a picture registered with a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    /// Unique drawing ID within the document (`wp:docPr/@id`)
    pub id: u32,
    /// Relationship ID of the media part (e.g. `rId3`)
    pub rel_id: String,
    /// Display name shown by word processors
    pub name: String,
    /// Encoding of the stored bytes
    pub format: PictureFormat,
    /// Width in EMUs
    pub width_emu: i64,
    /// Height in EMUs
    pub height_emu: i64,
}

impl Picture {
    /// Width in pixels at 96 DPI
    pub fn width_px(&self) -> i64 {
        self.width_emu / EMU_PER_PIXEL
    }

    /// Height in pixels at 96 DPI
    pub fn height_px(&self) -> i64 {
        self.height_emu / EMU_PER_PIXEL
    }
}
