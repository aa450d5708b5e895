//! HTML block classification
//!
//! Walks an HTML fragment with a CSS selector and yields the content blocks
//! the converter understands, in source order. Everything else is dropped.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// Selector used when none is configured
pub const DEFAULT_SELECTOR: &str = "p, img, h1";

/// One recognized content block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Body text from `<p>`
    Paragraph { text: String },
    /// Heading text from `<h1>`
    Heading { text: String },
    /// Image source from `<img src>`; empty when the attribute is missing
    Image { url: String },
}

impl Block {
    /// Short label for listings and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::Heading { .. } => "heading",
            Self::Image { .. } => "image",
        }
    }

    fn from_element(element: ElementRef<'_>) -> Option<Self> {
        match element.value().name() {
            "p" => Some(Self::Paragraph {
                text: flatten_text(element),
            }),
            "h1" => Some(Self::Heading {
                text: flatten_text(element),
            }),
            "img" => Some(Self::Image {
                url: element.value().attr("src").unwrap_or("").to_string(),
            }),
            _ => None,
        }
    }
}

/// A parsed HTML document paired with a block selector
///
/// Parsing happens once in [`BlockClassifier::new`]; every call to
/// [`blocks`](Self::blocks) walks the tree again from the start.
pub struct BlockClassifier {
    html: Html,
    selector: Selector,
}

impl BlockClassifier {
    /// Parse `html` and compile `selector`
    ///
    /// Malformed HTML is accepted as the parser repairs it; an invalid
    /// selector is an error.
    pub fn new(html: &str, selector: &str) -> Result<Self> {
        let selector = Selector::parse(selector).map_err(|e| ConvertError::Selector {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            html: Html::parse_document(html),
            selector,
        })
    }

    /// Lazily yield recognized blocks in document order
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.html
            .select(&self.selector)
            .filter_map(Block::from_element)
    }
}

/// Classify `html` into a list of blocks
pub fn classify(html: &str, selector: &str) -> Result<Vec<Block>> {
    Ok(BlockClassifier::new(html, selector)?.blocks().collect())
}

/// Descendant text with runs of HTML whitespace collapsed to one space
///
/// Only ASCII whitespace and no-break space collapse; other Unicode spaces
/// such as U+3000 are content and kept as written.
fn flatten_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    text.split(is_collapsible_space)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_collapsible_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C' | '\u{a0}')
}
