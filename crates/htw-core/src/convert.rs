//! HTML to document conversion
//!
//! A [`Converter`] classifies the HTML, then renders each block in source
//! order: paragraphs and headings as styled text, images through the
//! embedder. Page setup (footer, margins) is applied separately with
//! [`Converter::apply_page_setup`], once per document.

use std::time::Duration;

use htw_ooxml::{Alignment, Docx, PageMargins};
use serde::Serialize;

use crate::classify::{Block, BlockClassifier, DEFAULT_SELECTOR};
use crate::descriptor::ImageDescriptor;
use crate::embed::{embed_image, embed_image_with, ImageOutcome};
use crate::error::Result;
use crate::fetch::{FetchError, HttpFetcher, ImageFetcher};
use crate::footer::install_footer;
use crate::render::{render_heading, render_paragraph};
use crate::style::StyleParams;

/// Defaults applied to every image found in the HTML
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageDefaults {
    /// Width in centimetres; non-positive uses 16.2
    pub width: f64,
    /// Height in centimetres; non-positive uses 10.01
    pub height: f64,
    pub download_error_message: Option<String>,
    pub decode_error_message: Option<String>,
    pub include_url_in_error: Option<bool>,
}

impl ImageDefaults {
    /// Descriptor for one image source
    pub fn descriptor(&self, url: &str) -> ImageDescriptor {
        let mut image = ImageDescriptor::new(url)
            .with_width(self.width)
            .with_height(self.height);
        if let Some(ref message) = self.download_error_message {
            image = image.with_download_error_message(message);
        }
        if let Some(ref message) = self.decode_error_message {
            image = image.with_decode_error_message(message);
        }
        if let Some(include) = self.include_url_in_error {
            image = image.with_url_in_error(include);
        }
        image
    }
}

/// Page-number footer settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FooterOptions {
    pub style: StyleParams,
    /// Unset is centered
    pub alignment: Option<Alignment>,
    pub prefix: String,
    pub suffix: String,
}

/// Everything a conversion can be tuned with
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// CSS selector choosing the blocks to convert
    pub selector: String,
    /// Style of `<p>` blocks
    pub body: StyleParams,
    /// Style of `<h1>` blocks
    pub heading: StyleParams,
    pub image: ImageDefaults,
    /// Timeout of the default HTTP fetcher; unset waits indefinitely
    pub image_timeout: Option<Duration>,
    /// Footer installed by [`Converter::apply_page_setup`]
    pub footer: Option<FooterOptions>,
    /// Margins set by [`Converter::apply_page_setup`], in twips
    pub margins: Option<PageMargins>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_string(),
            body: StyleParams::default(),
            heading: StyleParams::default(),
            image: ImageDefaults::default(),
            image_timeout: None,
            footer: None,
            margins: None,
        }
    }
}

/// Counts of what a conversion wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub paragraphs: usize,
    pub headings: usize,
    /// Images embedded as pictures
    pub images: usize,
    /// Images replaced by a fallback message
    pub image_failures: usize,
}

impl ConversionReport {
    /// Number of blocks converted
    pub fn blocks(&self) -> usize {
        self.paragraphs + self.headings + self.images + self.image_failures
    }
}

/// HTML to document converter
#[derive(Default)]
pub struct Converter {
    options: ConvertOptions,
    fetcher: Option<Box<dyn ImageFetcher>>,
}

impl Converter {
    /// Converter with default options and the HTTP fetcher
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Fetch images through `fetcher` instead of HTTP
    pub fn with_fetcher(mut self, fetcher: impl ImageFetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Append the blocks of `html` to `doc`
    ///
    /// Fails only on an invalid selector; image failures, including an HTTP
    /// client that cannot be created, become fallback text and are counted
    /// in the report.
    pub fn convert(&self, doc: &mut Docx, html: &str) -> Result<ConversionReport> {
        let classifier = BlockClassifier::new(html, &self.options.selector)?;

        let http = if self.fetcher.is_none()
            && classifier.blocks().any(|b| matches!(b, Block::Image { .. }))
        {
            Some(
                HttpFetcher::with_timeout(self.options.image_timeout).map_err(|e| {
                    log::warn!("HTTP client unavailable, images will not be fetched: {}", e);
                    e.to_string()
                }),
            )
        } else {
            None
        };

        let mut report = ConversionReport::default();
        for (index, block) in classifier.blocks().enumerate() {
            log::debug!("Block {}: {}", index, block.kind());
            match block {
                Block::Paragraph { text } => {
                    render_paragraph(doc, &self.options.body, &text);
                    report.paragraphs += 1;
                }
                Block::Heading { text } => {
                    render_heading(doc, &self.options.heading, &text);
                    report.headings += 1;
                }
                Block::Image { url } => {
                    let image = self.options.image.descriptor(&url);
                    let outcome = match (&self.fetcher, &http) {
                        (Some(custom), _) => embed_image_with(doc, &image, custom.as_ref()),
                        (None, Some(Ok(http))) => embed_image_with(doc, &image, http),
                        (None, Some(Err(message))) => embed_without_client(doc, &image, message),
                        (None, None) => embed_image(doc, &image),
                    };
                    match outcome {
                        ImageOutcome::Embedded(_) => report.images += 1,
                        _ => report.image_failures += 1,
                    }
                }
            }
        }

        log::info!(
            "Converted {} blocks ({} image failures)",
            report.blocks(),
            report.image_failures
        );
        Ok(report)
    }

    /// Install the configured footer and margins
    pub fn apply_page_setup(&self, doc: &mut Docx) {
        if let Some(ref footer) = self.options.footer {
            install_footer(
                doc,
                &footer.style,
                footer.alignment,
                &footer.prefix,
                &footer.suffix,
            );
        }
        if let Some(margins) = self.options.margins {
            doc.set_page_margins(margins);
        }
    }
}

/// Write the download fallback for an image when no HTTP client exists
fn embed_without_client(doc: &mut Docx, image: &ImageDescriptor, message: &str) -> ImageOutcome {
    let unavailable = |_: &str| -> std::result::Result<Vec<u8>, FetchError> {
        Err(FetchError::Other(message.to_string()))
    };
    embed_image_with(doc, image, &unavailable)
}

/// Convert `html` into `doc` with default options
pub fn convert(doc: &mut Docx, html: &str) -> Result<ConversionReport> {
    Converter::new().convert(doc, html)
}
