//! Image embedding
//!
//! Fetches an image, re-encodes it to the codec named by its URL, and places
//! it in a paragraph of its own at the descriptor's size. Any failure is
//! logged and replaced by a three-paragraph text fallback; nothing here
//! fails the conversion.

use std::io::Cursor;

use htw_ooxml::units::cm_to_emu;
use htw_ooxml::{Docx, OoxmlError, Picture, PictureFormat};
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

use crate::descriptor::ImageDescriptor;
use crate::fetch::{FetchError, HttpFetcher, ImageFetcher};
use crate::render::render_paragraph;
use crate::style::StyleParams;

/// Errors met between fetched bytes and a placed picture
#[derive(Error, Debug)]
pub(crate) enum ImageError {
    #[error("Download failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Cannot decode or encode image: {0}")]
    Codec(#[from] image::ImageError),

    #[error("Unknown image format (extension '{0}')")]
    UnknownFormat(String),

    #[error("Cannot embed image: {0}")]
    Embed(#[from] OoxmlError),
}

/// What [`embed_image`] wrote to the document
#[derive(Debug, Clone, PartialEq)]
pub enum ImageOutcome {
    /// The picture was placed in a new paragraph
    Embedded(Picture),
    /// Fetching failed; the download message was written instead
    DownloadFailed { message: String },
    /// Decoding, encoding or embedding failed; the decode message was written instead
    DecodeFailed { message: String },
}

impl ImageOutcome {
    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded(_))
    }
}

/// Embed an image fetched over HTTP
pub fn embed_image(doc: &mut Docx, image: &ImageDescriptor) -> ImageOutcome {
    match HttpFetcher::new() {
        Ok(fetcher) => embed_image_with(doc, image, &fetcher),
        Err(e) => download_failed(doc, image, &ImageError::Fetch(e)),
    }
}

/// Embed an image using `fetcher` as the byte source
pub fn embed_image_with(
    doc: &mut Docx,
    image: &ImageDescriptor,
    fetcher: &dyn ImageFetcher,
) -> ImageOutcome {
    let bytes = match fetcher.fetch(image.url()) {
        Ok(bytes) => bytes,
        Err(e) => return download_failed(doc, image, &ImageError::Fetch(e)),
    };

    match place_picture(doc, image, &bytes) {
        Ok(picture) => ImageOutcome::Embedded(picture),
        Err(e) => {
            log::warn!("Failed to embed image {}: {}", image.url(), e);
            let message = image.decode_error_message();
            write_fallback(doc, &message);
            ImageOutcome::DecodeFailed { message }
        }
    }
}

fn download_failed(doc: &mut Docx, image: &ImageDescriptor, error: &ImageError) -> ImageOutcome {
    log::warn!("Failed to download image {}: {}", image.url(), error);
    let message = image.download_error_message();
    write_fallback(doc, &message);
    ImageOutcome::DownloadFailed { message }
}

fn place_picture(
    doc: &mut Docx,
    image: &ImageDescriptor,
    bytes: &[u8],
) -> Result<Picture, ImageError> {
    let extension = url_extension(image.url());
    log::info!("Image extension: {}", extension);

    let (data, format) = reencode(bytes, &extension)?;
    let name = match PictureFormat::from_extension(&extension) {
        Some(_) => format!("image.{}", extension.to_ascii_lowercase()),
        None => format!("image.{}", format.extension()),
    };

    let picture = doc.add_picture(
        data,
        format,
        &name,
        cm_to_emu(image.width()),
        cm_to_emu(image.height()),
    )?;
    doc.add_paragraph().add_run().add_picture(picture.clone());
    Ok(picture)
}

/// Decode `bytes` and encode them again in the codec named by `extension`
///
/// The source codec is sniffed from the content, falling back to the
/// extension. When the extension names no codec the document accepts, the
/// sniffed codec is kept.
fn reencode(bytes: &[u8], extension: &str) -> Result<(Vec<u8>, PictureFormat), ImageError> {
    let unknown = || ImageError::UnknownFormat(extension.to_string());

    let source = image::guess_format(bytes)
        .ok()
        .or_else(|| ImageFormat::from_extension(extension))
        .ok_or_else(unknown)?;
    let decoded = image::load_from_memory_with_format(bytes, source)?;

    let target = PictureFormat::from_extension(extension)
        .or_else(|| picture_format(source))
        .ok_or_else(unknown)?;

    let mut buffer = Vec::new();
    let pixels = match target {
        // JPEG carries no alpha channel
        PictureFormat::Jpeg => DynamicImage::ImageRgb8(decoded.to_rgb8()),
        _ => DynamicImage::ImageRgba8(decoded.to_rgba8()),
    };
    pixels.write_to(&mut Cursor::new(&mut buffer), image_format(target))?;

    Ok((buffer, target))
}

/// Text after the last `.` of the URL's final path segment
fn url_extension(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let segment = path.rsplit('/').next().unwrap_or("");
    match segment.rfind('.') {
        Some(dot) => segment[dot + 1..].to_string(),
        None => String::new(),
    }
}

fn picture_format(format: ImageFormat) -> Option<PictureFormat> {
    match format {
        ImageFormat::Png => Some(PictureFormat::Png),
        ImageFormat::Jpeg => Some(PictureFormat::Jpeg),
        ImageFormat::Gif => Some(PictureFormat::Gif),
        ImageFormat::Bmp => Some(PictureFormat::Bmp),
        ImageFormat::Tiff => Some(PictureFormat::Tiff),
        _ => None,
    }
}

fn image_format(format: PictureFormat) -> ImageFormat {
    match format {
        PictureFormat::Png => ImageFormat::Png,
        PictureFormat::Jpeg => ImageFormat::Jpeg,
        PictureFormat::Gif => ImageFormat::Gif,
        PictureFormat::Bmp => ImageFormat::Bmp,
        PictureFormat::Tiff => ImageFormat::Tiff,
    }
}

/// Blank line, message, blank line, all in body style
fn write_fallback(doc: &mut Docx, message: &str) {
    let params = StyleParams::default();
    render_paragraph(doc, &params, "");
    render_paragraph(doc, &params, message);
    render_paragraph(doc, &params, "");
}
