//! Conversion Tests
//!
//! HTML in, packaged DOCX out, read back through `inspect_docx`. Images are
//! served by a stub fetcher so no test touches the network.

use std::io::Cursor;

use htw_core::{
    classify, install_footer, ConvertOptions, Converter, FetchError, HtwConfig, ImageDefaults,
    StyleParams, DEFAULT_SELECTOR,
};
use htw_ooxml::{inspect_docx, Alignment, Docx, OoxmlArchive, RunItem};
use image::{DynamicImage, ImageFormat, RgbaImage};

fn png_bytes() -> Vec<u8> {
    let img = RgbaImage::from_pixel(8, 8, image::Rgba([0, 128, 255, 255]));
    let mut buffer = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

/// Serves a PNG for URLs under `https://img/`, fails everything else
fn stub_fetcher() -> impl Fn(&str) -> Result<Vec<u8>, FetchError> {
    let png = png_bytes();
    move |url: &str| {
        if url.starts_with("https://img/") {
            Ok(png.clone())
        } else {
            Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            })
        }
    }
}

// =============================================================================
// Block order
// =============================================================================

#[test]
fn test_one_block_per_element_in_order() {
    let html = r#"
        <html><body>
            <h1>报告</h1>
            <p>第一段</p>
            <img src="https://img/chart.png">
            <table><tr><td>ignored</td></tr></table>
            <p>第二段</p>
        </body></html>"#;

    let mut doc = Docx::new();
    let report = Converter::new()
        .with_fetcher(stub_fetcher())
        .convert(&mut doc, html)
        .unwrap();

    assert_eq!(report.headings, 1);
    assert_eq!(report.paragraphs, 2);
    assert_eq!(report.images, 1);
    assert_eq!(report.image_failures, 0);
    assert_eq!(report.blocks(), classify(html, DEFAULT_SELECTOR).unwrap().len());

    let summary = inspect_docx(&doc.to_bytes().unwrap()).unwrap();
    let body = &summary.body.paragraphs;
    assert_eq!(body.len(), 4);
    assert_eq!(body[0].text(), "报告");
    assert_eq!(body[1].text(), "第一段");
    assert_eq!(body[2].pictures().count(), 1);
    assert_eq!(body[3].text(), "第二段");
    assert_eq!(summary.media.len(), 1);
}

// =============================================================================
// Styling
// =============================================================================

#[test]
fn test_heading_and_paragraph_styles() {
    let mut doc = Docx::new();
    htw_core::convert(&mut doc, "<h1>标题</h1><p>正文</p>").unwrap();

    let summary = inspect_docx(&doc.to_bytes().unwrap()).unwrap();
    let heading = &summary.body.paragraphs[0];
    assert_eq!(heading.first_line_indent, None);
    assert_eq!(heading.runs[0].font_family.as_deref(), Some("黑体"));
    assert_eq!(heading.runs[0].font_size, Some(16));

    let body = &summary.body.paragraphs[1];
    assert_eq!(body.first_line_indent, Some(420));
    assert_eq!(body.runs[0].font_family.as_deref(), Some("仿宋GB2312"));
    assert_eq!(body.runs[0].color.as_deref(), Some("000000"));
}

#[test]
fn test_pasted_control_characters_stay_readable() {
    let mut doc = Docx::new();
    htw_core::convert(&mut doc, "<p>a\u{0B}b\u{01}c</p>").unwrap();
    let bytes = doc.to_bytes().unwrap();

    let archive = OoxmlArchive::from_bytes(&bytes).unwrap();
    let xml = archive.get_string("word/document.xml").unwrap();
    assert!(!xml.chars().any(|c| c < ' ' && !matches!(c, '\t' | '\n' | '\r')));

    let summary = inspect_docx(&bytes).unwrap();
    let text = summary.body.paragraphs[0].text();
    assert!(text.starts_with('a') && text.ends_with('c'), "{}", text);
}

#[test]
fn test_ideographic_indent_written() {
    let mut doc = Docx::new();
    htw_core::convert(&mut doc, "<p>\u{3000}\u{3000}正文</p>").unwrap();

    let summary = inspect_docx(&doc.to_bytes().unwrap()).unwrap();
    assert_eq!(summary.body.paragraphs[0].text(), "\u{3000}\u{3000}正文");
}

#[test]
fn test_sized_paragraph_indent() {
    let options = ConvertOptions {
        body: StyleParams::new().font_size(14),
        ..Default::default()
    };
    let mut doc = Docx::new();
    Converter::new()
        .with_options(options)
        .convert(&mut doc, "<p>x</p>")
        .unwrap();

    let summary = inspect_docx(&doc.to_bytes().unwrap()).unwrap();
    assert_eq!(summary.body.paragraphs[0].first_line_indent, Some(560));
    assert_eq!(summary.body.paragraphs[0].runs[0].font_size, Some(14));
}

// =============================================================================
// Images
// =============================================================================

#[test]
fn test_image_size_from_defaults() {
    let options = ConvertOptions {
        image: ImageDefaults {
            width: 5.0,
            height: -2.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut doc = Docx::new();
    Converter::new()
        .with_options(options)
        .with_fetcher(stub_fetcher())
        .convert(&mut doc, r#"<img src="https://img/a.png">"#)
        .unwrap();

    let summary = inspect_docx(&doc.to_bytes().unwrap()).unwrap();
    let pictures: Vec<&RunItem> = summary.body.paragraphs[0].pictures().collect();
    assert_eq!(
        pictures,
        vec![&RunItem::Picture {
            name: "image.png".to_string(),
            cx: 1_800_000,
            cy: 3_603_600,
        }]
    );
}

#[test]
fn test_failed_image_fallback_paragraphs() {
    let mut doc = Docx::new();
    let report = Converter::new()
        .with_fetcher(stub_fetcher())
        .convert(&mut doc, r#"<p>前</p><img src="https://elsewhere/x.png"><p>后</p>"#)
        .unwrap();
    assert_eq!(report.image_failures, 1);

    let summary = inspect_docx(&doc.to_bytes().unwrap()).unwrap();
    let texts: Vec<String> = summary.body.paragraphs.iter().map(|p| p.text()).collect();
    assert_eq!(
        texts,
        vec!["前", "", "解析图片失败!https://elsewhere/x.png", "", "后"]
    );
    assert!(summary.media.is_empty());
}

// =============================================================================
// Footer and page setup
// =============================================================================

#[test]
fn test_footer_page_field() {
    let mut doc = Docx::new();
    htw_core::convert(&mut doc, "<p>body</p>").unwrap();
    install_footer(&mut doc, &StyleParams::new(), None, "第", "页");

    let summary = inspect_docx(&doc.to_bytes().unwrap()).unwrap();
    assert_eq!(summary.footers.len(), 1);
    assert_eq!(summary.footers[0].paragraphs.len(), 1);

    let footer = &summary.footers[0].paragraphs[0];
    assert_eq!(footer.alignment, Some(Alignment::Center));
    let items: Vec<&RunItem> = footer.runs.iter().flat_map(|r| r.items.iter()).collect();
    assert_eq!(
        items,
        vec![
            &RunItem::Text { text: "第".to_string() },
            &RunItem::FieldChar { field: "begin".to_string() },
            &RunItem::Instruction { text: r"PAGE  \* MERGEFORMAT".to_string() },
            &RunItem::FieldChar { field: "end".to_string() },
            &RunItem::Text { text: "页".to_string() },
        ]
    );
}

#[test]
fn test_config_driven_conversion() {
    let config = HtwConfig::from_toml_str(
        r#"
[heading]
bold = true

[footer]
suffix = " / end"
alignment = "left"

[margins]
left = 2.54
right = 2.54
top = 2.54
bottom = 2.54
"#,
    )
    .unwrap();

    let converter = Converter::new().with_options(config.to_options());
    let mut doc = Docx::new();
    converter.convert(&mut doc, "<h1>T</h1>").unwrap();
    converter.apply_page_setup(&mut doc);

    let summary = inspect_docx(&doc.to_bytes().unwrap()).unwrap();
    assert!(summary.body.paragraphs[0].runs[0].bold);
    assert_eq!(summary.footers[0].paragraphs[0].alignment, Some(Alignment::Left));
    assert_eq!(summary.margins.unwrap().left, 1440);
}
