//! Paragraph and heading rendering
//!
//! Each call appends exactly one paragraph holding exactly one text run.

use htw_ooxml::{Docx, Paragraph};

use crate::style::{first_line_indent, BlockKind, StyleParams};

/// Append a body paragraph
///
/// The first line is indented by two characters of the requested size, or
/// 420 twips when the size is left to its default.
pub fn render_paragraph<'d>(doc: &'d mut Docx, params: &StyleParams, text: &str) -> &'d mut Paragraph {
    let para = render_text(doc, params, BlockKind::Paragraph, text);
    para.set_first_line_indent(first_line_indent(params.font_size));
    para
}

/// Append a heading paragraph (no first-line indent)
pub fn render_heading<'d>(doc: &'d mut Docx, params: &StyleParams, text: &str) -> &'d mut Paragraph {
    render_text(doc, params, BlockKind::Heading, text)
}

fn render_text<'d>(
    doc: &'d mut Docx,
    params: &StyleParams,
    kind: BlockKind,
    text: &str,
) -> &'d mut Paragraph {
    let style = params.resolve(kind);
    let para = doc.add_paragraph();
    para.add_run()
        .set_text(text)
        .set_properties(style.to_run_properties());
    para
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ChineseFont;

    #[test]
    fn test_render_paragraph_defaults() {
        let mut doc = Docx::new();
        render_paragraph(&mut doc, &StyleParams::new(), "正文");

        let para = &doc.paragraphs()[0];
        assert_eq!(para.runs().len(), 1);
        assert_eq!(para.text(), "正文");
        assert_eq!(para.first_line_indent(), Some(420));

        let props = para.runs()[0].properties();
        assert_eq!(props.font_family.as_deref(), Some("仿宋GB2312"));
        assert_eq!(props.font_size, Some(16));
        assert!(!props.bold);
    }

    #[test]
    fn test_render_paragraph_sized() {
        let mut doc = Docx::new();
        render_paragraph(&mut doc, &StyleParams::new().font_size(12), "x");
        assert_eq!(doc.paragraphs()[0].first_line_indent(), Some(480));
        assert_eq!(doc.paragraphs()[0].runs()[0].properties().font_size, Some(12));
    }

    #[test]
    fn test_render_heading() {
        let mut doc = Docx::new();
        render_heading(&mut doc, &StyleParams::new().bold(true), "标题");

        let para = &doc.paragraphs()[0];
        assert_eq!(para.first_line_indent(), None);
        let props = para.runs()[0].properties();
        assert_eq!(props.font_family.as_deref(), Some(ChineseFont::HeiTi.as_str()));
        assert!(props.bold);
    }

    #[test]
    fn test_render_empty_text() {
        let mut doc = Docx::new();
        render_paragraph(&mut doc, &StyleParams::new(), "");
        assert_eq!(doc.paragraphs().len(), 1);
        assert_eq!(doc.paragraphs()[0].runs().len(), 1);
        assert_eq!(doc.paragraphs()[0].text(), "");
    }
}
