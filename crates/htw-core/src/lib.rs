//! # htw-core
//!
//! Conversion of restricted HTML (`<p>`, `<h1>`, `<img>`) into a
//! word-processing document.
//!
//! ## Example
//!
//! ```no_run
//! use htw_core::{convert, install_footer, StyleParams};
//! use htw_ooxml::Docx;
//!
//! let mut doc = Docx::new();
//! let report = convert(&mut doc, "<h1>Title</h1><p>Body</p>")?;
//! install_footer(&mut doc, &StyleParams::new(), None, "第", "页");
//! doc.save("out.docx")?;
//! println!("{} blocks", report.blocks());
//! # Ok::<(), htw_core::ConvertError>(())
//! ```

pub mod classify;
pub mod config;
pub mod convert;
pub mod descriptor;
pub mod embed;
pub mod error;
pub mod fetch;
pub mod footer;
pub mod page;
pub mod render;
pub mod style;
pub mod tables;

pub use classify::{classify, Block, BlockClassifier, DEFAULT_SELECTOR};
pub use config::HtwConfig;
pub use convert::{convert, ConversionReport, ConvertOptions, Converter, FooterOptions, ImageDefaults};
pub use descriptor::ImageDescriptor;
pub use embed::{embed_image, embed_image_with, ImageOutcome};
pub use error::{ConvertError, Result};
pub use fetch::{FetchError, HttpFetcher, ImageFetcher};
pub use footer::install_footer;
pub use page::{cm_to_twips, set_page_margins, set_page_margins_cm};
pub use render::{render_heading, render_paragraph};
pub use style::{BlockKind, ResolvedStyle, StyleParams};
pub use tables::{ChineseFont, Color};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
