//! In-memory WordprocessingML document
//!
//! `Docx` is an append-only model of the parts htw writes: body paragraphs,
//! one footer per footer kind, page margins and embedded media. Paragraphs
//! and runs are created through their owners (`add_paragraph`, `add_run`)
//! and configured through `&mut` setters; nothing is serialized until
//! [`Docx::to_bytes`] or [`Docx::save`].
//!
//! # Example
//!
//! ```
//! use htw_ooxml::{Alignment, Docx, HeaderFooterType, RunProperties};
//!
//! let mut doc = Docx::new();
//! let para = doc.add_paragraph();
//! para.set_first_line_indent(640);
//! para.add_run().set_text("正文").set_font_size(16);
//!
//! let footer = doc.create_footer(HeaderFooterType::Default);
//! let para = footer.add_paragraph();
//! para.set_alignment(Alignment::Center);
//! para.add_page_number_field(&RunProperties::default());
//!
//! let bytes = doc.to_bytes()?;
//! assert!(!bytes.is_empty());
//! # Ok::<(), htw_ooxml::OoxmlError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OoxmlError, Result};
use crate::field::{FieldCharType, PAGE_FIELD_INSTRUCTION};
use crate::picture::{Picture, PictureFormat};
use crate::relationships::Relationships;

/// Paragraph justification (`w:jc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
    /// Justified on both margins
    Both,
}

impl Alignment {
    /// `w:jc/@w:val`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Both => "both",
        }
    }
}

/// Which pages a header or footer applies to (`w:footerReference/@w:type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderFooterType {
    /// Every page not covered by a more specific kind
    #[default]
    Default,
    First,
    Even,
}

impl HeaderFooterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::First => "first",
            Self::Even => "even",
        }
    }
}

/// Page margins in twentieths of a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMargins {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

/// Character formatting of a run (`w:rPr`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunProperties {
    pub bold: bool,
    /// Font applied to every script slot
    pub font_family: Option<String>,
    /// Size in points; written as half-points
    pub font_size: Option<u32>,
    /// RGB hex without `#`
    pub color: Option<String>,
}

impl RunProperties {
    /// Whether writing these properties would produce an empty `w:rPr`
    pub fn is_empty(&self) -> bool {
        !self.bold && self.font_family.is_none() && self.font_size.is_none() && self.color.is_none()
    }
}

/// One piece of run content, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunContent {
    /// Literal text (`w:t`)
    Text(String),
    /// Complex field boundary (`w:fldChar`)
    FieldChar(FieldCharType),
    /// Field instruction text (`w:instrText`)
    InstrText(String),
    /// Inline picture (`w:drawing`)
    Picture(Picture),
}

/// A run of uniformly formatted content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    properties: RunProperties,
    content: Vec<RunContent>,
}

impl Run {
    /// Replace the run's text, keeping any non-text content
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.content.retain(|c| !matches!(c, RunContent::Text(_)));
        self.content.push(RunContent::Text(text.into()));
        self
    }

    pub fn set_bold(&mut self, bold: bool) -> &mut Self {
        self.properties.bold = bold;
        self
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) -> &mut Self {
        self.properties.font_family = Some(family.into());
        self
    }

    /// Font size in points
    pub fn set_font_size(&mut self, points: u32) -> &mut Self {
        self.properties.font_size = Some(points);
        self
    }

    /// Text colour as six hex digits (`FF0000`)
    pub fn set_color(&mut self, hex: impl Into<String>) -> &mut Self {
        self.properties.color = Some(hex.into());
        self
    }

    /// Replace all character formatting at once
    pub fn set_properties(&mut self, properties: RunProperties) -> &mut Self {
        self.properties = properties;
        self
    }

    /// Append a field boundary marker
    pub fn add_field_char(&mut self, kind: FieldCharType) -> &mut Self {
        self.content.push(RunContent::FieldChar(kind));
        self
    }

    /// Append field instruction text
    pub fn add_instr_text(&mut self, instruction: impl Into<String>) -> &mut Self {
        self.content.push(RunContent::InstrText(instruction.into()));
        self
    }

    /// Place a registered picture in this run
    pub fn add_picture(&mut self, picture: Picture) -> &mut Self {
        self.content.push(RunContent::Picture(picture));
        self
    }

    pub fn properties(&self) -> &RunProperties {
        &self.properties
    }

    pub fn content(&self) -> &[RunContent] {
        &self.content
    }

    /// Concatenated literal text of the run
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                RunContent::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// A paragraph (`w:p`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    alignment: Option<Alignment>,
    first_line_indent: Option<i64>,
    runs: Vec<Run>,
}

impl Paragraph {
    /// Append a new, empty run and return it
    pub fn add_run(&mut self) -> &mut Run {
        let index = self.runs.len();
        self.runs.push(Run::default());
        &mut self.runs[index]
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> &mut Self {
        self.alignment = Some(alignment);
        self
    }

    /// First-line indentation in twentieths of a point
    pub fn set_first_line_indent(&mut self, twips: i64) -> &mut Self {
        self.first_line_indent = Some(twips);
        self
    }

    /// Append a live page number field formatted with `properties`
    ///
    /// Produces three runs: a `begin` field char, the `PAGE` instruction
    /// carrying `properties`, and an `end` field char.
    pub fn add_page_number_field(&mut self, properties: &RunProperties) -> &mut Self {
        self.add_run().add_field_char(FieldCharType::Begin);
        self.add_run()
            .set_properties(properties.clone())
            .add_instr_text(PAGE_FIELD_INSTRUCTION);
        self.add_run().add_field_char(FieldCharType::End);
        self
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn first_line_indent(&self) -> Option<i64> {
        self.first_line_indent
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Concatenated literal text of all runs
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }
}

/// A footer part (`w:ftr`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Footer {
    kind: HeaderFooterType,
    paragraphs: Vec<Paragraph>,
}

impl Footer {
    /// Append a new paragraph to the footer
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        let index = self.paragraphs.len();
        self.paragraphs.push(Paragraph::default());
        &mut self.paragraphs[index]
    }

    pub fn kind(&self) -> HeaderFooterType {
        self.kind
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }
}

/// A media part waiting to be packaged
#[derive(Debug, Clone)]
pub(crate) struct MediaFile {
    /// Path inside the package (`word/media/image1.png`)
    pub path: String,
    pub format: PictureFormat,
    pub data: Vec<u8>,
}

/// A word-processing document under construction
#[derive(Debug, Clone, Default)]
pub struct Docx {
    pub(crate) body: Vec<Paragraph>,
    pub(crate) footers: Vec<Footer>,
    pub(crate) margins: Option<PageMargins>,
    pub(crate) media: Vec<MediaFile>,
    /// Relationships of `word/document.xml` known before packaging
    pub(crate) relationships: Relationships,
}

impl Docx {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new paragraph to the body and return it
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        let index = self.body.len();
        self.body.push(Paragraph::default());
        &mut self.body[index]
    }

    /// Create an empty footer of the given kind
    ///
    /// A document carries at most one footer per kind; creating another
    /// replaces the previous one.
    pub fn create_footer(&mut self, kind: HeaderFooterType) -> &mut Footer {
        self.footers.retain(|f| f.kind != kind);
        let index = self.footers.len();
        self.footers.push(Footer {
            kind,
            paragraphs: Vec::new(),
        });
        &mut self.footers[index]
    }

    /// Set the section's page margins
    pub fn set_page_margins(&mut self, margins: PageMargins) {
        self.margins = Some(margins);
    }

    /// Register picture bytes with the document
    ///
    /// The bytes must carry the signature of `format` and the extent must be
    /// positive; otherwise the picture is rejected with
    /// [`OoxmlError::InvalidPicture`]. The returned handle is placed with
    /// [`Run::add_picture`].
    pub fn add_picture(
        &mut self,
        data: Vec<u8>,
        format: PictureFormat,
        name: &str,
        width_emu: i64,
        height_emu: i64,
    ) -> Result<Picture> {
        if data.is_empty() {
            return Err(OoxmlError::InvalidPicture(format!("{}: no data", name)));
        }
        if !format.matches_signature(&data) {
            return Err(OoxmlError::InvalidPicture(format!(
                "{}: data is not {}",
                name,
                format.content_type()
            )));
        }
        if width_emu <= 0 || height_emu <= 0 {
            return Err(OoxmlError::InvalidPicture(format!(
                "{}: extent {}x{} EMU is not positive",
                name, width_emu, height_emu
            )));
        }

        let id = self.media.len() as u32 + 1;
        let target = format!("media/image{}.{}", id, format.extension());
        let rel_id = self.relationships.add_image(&target);
        self.media.push(MediaFile {
            path: format!("word/{}", target),
            format,
            data,
        });

        Ok(Picture {
            id,
            rel_id,
            name: name.to_string(),
            format,
            width_emu,
            height_emu,
        })
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.body
    }

    pub fn footers(&self) -> &[Footer] {
        &self.footers
    }

    /// The footer applied to all pages, if installed
    pub fn default_footer(&self) -> Option<&Footer> {
        self.footers
            .iter()
            .find(|f| f.kind == HeaderFooterType::Default)
    }

    pub fn page_margins(&self) -> Option<PageMargins> {
        self.margins
    }

    /// Number of embedded media parts
    pub fn media_count(&self) -> usize {
        self.media.len()
    }

    /// Package the document as DOCX bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        crate::writer::DocxWriter::new(self).package().to_bytes()
    }

    /// Package the document and write it to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::writer::DocxWriter::new(self)
            .package()
            .write_to_file(path)
    }
}
