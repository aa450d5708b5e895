//! Configuration file (`htw.toml`)
//!
//! ```toml
//! selector = "p, img, h1"
//!
//! [body]
//! font_size = 16
//!
//! [heading]
//! font_family = "黑体"
//! bold = true
//!
//! [image]
//! width = 16.2
//! height = 10.01
//! include_url = false
//! timeout_secs = 10
//!
//! [footer]
//! prefix = "第"
//! suffix = "页"
//! alignment = "center"
//!
//! [margins]
//! left = 2.0
//! right = 2.0
//! ```

use std::path::Path;
use std::time::Duration;

use htw_ooxml::{Alignment, PageMargins};
use serde::{Deserialize, Serialize};

use crate::classify::DEFAULT_SELECTOR;
use crate::convert::{ConvertOptions, FooterOptions, ImageDefaults};
use crate::error::{ConvertError, Result};
use crate::page::cm_to_twips;
use crate::style::StyleParams;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HtwConfig {
    /// Selector choosing the blocks to convert
    pub selector: String,
    /// Style of body paragraphs
    pub body: StyleParams,
    /// Style of headings
    pub heading: StyleParams,
    pub image: ImageSettings,
    pub footer: FooterSettings,
    pub margins: MarginSettings,
}

impl Default for HtwConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_string(),
            body: StyleParams::default(),
            heading: StyleParams::default(),
            image: ImageSettings::default(),
            footer: FooterSettings::default(),
            margins: MarginSettings::default(),
        }
    }
}

impl HtwConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Read configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConvertError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Converter options described by this configuration
    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            selector: self.selector.clone(),
            body: self.body.clone(),
            heading: self.heading.clone(),
            image: ImageDefaults {
                width: self.image.width,
                height: self.image.height,
                download_error_message: self.image.download_error_message.clone(),
                decode_error_message: self.image.decode_error_message.clone(),
                include_url_in_error: Some(self.image.include_url),
            },
            image_timeout: self.image.timeout_secs.map(Duration::from_secs),
            footer: self.footer.enabled.then(|| FooterOptions {
                style: self.footer.style.clone(),
                alignment: Some(self.footer.alignment),
                prefix: self.footer.prefix.clone(),
                suffix: self.footer.suffix.clone(),
            }),
            margins: self.margins.to_page_margins(),
        }
    }
}

/// `[image]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageSettings {
    /// Width in centimetres
    pub width: f64,
    /// Height in centimetres
    pub height: f64,
    pub download_error_message: Option<String>,
    pub decode_error_message: Option<String>,
    /// Append the image URL to error messages
    pub include_url: bool,
    /// HTTP timeout; unset waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: crate::descriptor::DEFAULT_WIDTH_CM,
            height: crate::descriptor::DEFAULT_HEIGHT_CM,
            download_error_message: None,
            decode_error_message: None,
            include_url: true,
            timeout_secs: None,
        }
    }
}

/// `[footer]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FooterSettings {
    /// Install a page-number footer
    pub enabled: bool,
    pub prefix: String,
    pub suffix: String,
    pub alignment: Alignment,
    #[serde(flatten)]
    pub style: StyleParams,
}

impl Default for FooterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: String::new(),
            suffix: String::new(),
            alignment: Alignment::Center,
            style: StyleParams::default(),
        }
    }
}

/// `[margins]` section, in centimetres
///
/// Margins are only set when all four are given.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarginSettings {
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
}

impl MarginSettings {
    pub fn to_page_margins(&self) -> Option<PageMargins> {
        match (self.left, self.right, self.top, self.bottom) {
            (Some(left), Some(right), Some(top), Some(bottom)) => Some(PageMargins {
                left: cm_to_twips(left),
                right: cm_to_twips(right),
                top: cm_to_twips(top),
                bottom: cm_to_twips(bottom),
            }),
            (None, None, None, None) => None,
            _ => {
                log::warn!("Ignoring [margins]: left, right, top and bottom must all be set");
                None
            }
        }
    }
}
