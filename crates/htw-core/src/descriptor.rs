//! Image descriptors
//!
//! An [`ImageDescriptor`] says where an image comes from, how large it should
//! be on the page, and what to write instead when it cannot be embedded.
//! Unset or invalid values are stored as given and resolved by the getters.

/// Default image width in centimetres
pub const DEFAULT_WIDTH_CM: f64 = 16.2;

/// Default image height in centimetres
pub const DEFAULT_HEIGHT_CM: f64 = 10.01;

/// Largest width or height accepted, the DrawingML extent limit
pub const MAX_DIMENSION_CM: f64 = 75_758_450.0;

/// Fallback text used when no error message is configured
pub const DEFAULT_ERROR_MESSAGE: &str = "解析图片失败!";

/// One image to embed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageDescriptor {
    url: String,
    width: f64,
    height: f64,
    download_error_message: Option<String>,
    decode_error_message: Option<String>,
    include_url_in_error: Option<bool>,
}

impl ImageDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Target width in centimetres
    pub fn with_width(mut self, cm: f64) -> Self {
        self.width = cm;
        self
    }

    /// Target height in centimetres
    pub fn with_height(mut self, cm: f64) -> Self {
        self.height = cm;
        self
    }

    /// Message written when the image cannot be fetched
    pub fn with_download_error_message(mut self, message: impl Into<String>) -> Self {
        self.download_error_message = Some(message.into());
        self
    }

    /// Message written when the image cannot be decoded or embedded
    pub fn with_decode_error_message(mut self, message: impl Into<String>) -> Self {
        self.decode_error_message = Some(message.into());
        self
    }

    /// Whether error messages end with the image URL
    pub fn with_url_in_error(mut self, include: bool) -> Self {
        self.include_url_in_error = Some(include);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Width in centimetres; 16.2 unless a usable width was set
    pub fn width(&self) -> f64 {
        usable_dimension(self.width).unwrap_or(DEFAULT_WIDTH_CM)
    }

    /// Height in centimetres; 10.01 unless a usable height was set
    pub fn height(&self) -> f64 {
        usable_dimension(self.height).unwrap_or(DEFAULT_HEIGHT_CM)
    }

    pub fn include_url_in_error(&self) -> bool {
        self.include_url_in_error.unwrap_or(true)
    }

    /// Resolved text for a failed fetch
    pub fn download_error_message(&self) -> String {
        self.error_message(self.download_error_message.as_deref())
    }

    /// Resolved text for a failed decode or embed
    pub fn decode_error_message(&self) -> String {
        self.error_message(self.decode_error_message.as_deref())
    }

    fn error_message(&self, configured: Option<&str>) -> String {
        let mut message = configured.unwrap_or(DEFAULT_ERROR_MESSAGE).to_string();
        if self.include_url_in_error() {
            message.push_str(&self.url);
        }
        message
    }
}

/// Positive, finite and within the extent limit
fn usable_dimension(cm: f64) -> Option<f64> {
    (cm.is_finite() && cm > 0.0 && cm <= MAX_DIMENSION_CM).then_some(cm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let image = ImageDescriptor::new("http://a/b.png");
        assert_eq!(image.width(), 16.2);
        assert_eq!(image.height(), 10.01);

        let image = image.with_width(-1.0).with_height(0.0);
        assert_eq!(image.width(), 16.2);
        assert_eq!(image.height(), 10.01);
    }

    #[test]
    fn test_unusable_dimensions_use_defaults() {
        let image = ImageDescriptor::new("u")
            .with_width(f64::INFINITY)
            .with_height(1e300);
        assert_eq!(image.width(), 16.2);
        assert_eq!(image.height(), 10.01);

        let image = image.with_width(f64::NAN).with_height(f64::NEG_INFINITY);
        assert_eq!(image.width(), 16.2);
        assert_eq!(image.height(), 10.01);
    }

    #[test]
    fn test_explicit_dimensions() {
        let image = ImageDescriptor::new("u").with_width(5.0).with_height(3.5);
        assert_eq!(image.width(), 5.0);
        assert_eq!(image.height(), 3.5);
    }

    #[test]
    fn test_default_messages_include_url() {
        let image = ImageDescriptor::new("http://a/b.png");
        assert_eq!(image.download_error_message(), "解析图片失败!http://a/b.png");
        assert_eq!(image.decode_error_message(), "解析图片失败!http://a/b.png");
    }

    #[test]
    fn test_custom_messages_without_url() {
        let image = ImageDescriptor::new("http://a/b.png")
            .with_download_error_message("download failed")
            .with_decode_error_message("bad image")
            .with_url_in_error(false);
        assert_eq!(image.download_error_message(), "download failed");
        assert_eq!(image.decode_error_message(), "bad image");
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let image = ImageDescriptor::new("x");
        assert_eq!(image.download_error_message(), image.download_error_message());
    }
}
