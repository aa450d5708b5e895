//! # htw-ooxml
//!
//! A small WordprocessingML (DOCX) model for htw.
//!
//! This crate provides:
//! - An in-memory document of paragraphs, runs, footers and pictures
//! - Complex fields, used for live page numbers
//! - Packaging into a DOCX ZIP container
//! - A read-back summary of a packaged document
//!
//! ## Example
//!
//! ```no_run
//! use htw_ooxml::{Alignment, Docx, HeaderFooterType, RunProperties};
//!
//! let mut doc = Docx::new();
//! doc.add_paragraph().add_run().set_text("Hello").set_font_size(16);
//! doc.create_footer(HeaderFooterType::Default)
//!     .add_paragraph()
//!     .set_alignment(Alignment::Center)
//!     .add_page_number_field(&RunProperties::default());
//! doc.save("hello.docx")?;
//! # Ok::<(), htw_ooxml::OoxmlError>(())
//! ```

pub mod archive;
pub mod document;
pub mod error;
pub mod field;
pub mod inspect;
pub mod picture;
pub mod relationships;
pub mod units;
mod writer;

pub use archive::OoxmlArchive;
pub use document::{
    Alignment, Docx, Footer, HeaderFooterType, PageMargins, Paragraph, Run, RunContent,
    RunProperties,
};
pub use error::{OoxmlError, Result};
pub use field::{FieldCharType, PAGE_FIELD_INSTRUCTION};
pub use inspect::{inspect_docx, inspect_part, DocxSummary, ParagraphSummary, PartSummary, RunItem};
pub use picture::{Picture, PictureFormat};
pub use relationships::Relationships;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
