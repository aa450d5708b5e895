//! DOCX packaging
//!
//! Turns a [`Docx`] into the parts of a WordprocessingML package:
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! word/document.xml
//! word/_rels/document.xml.rels
//! word/footerN.xml
//! word/media/imageN.<ext>
//! ```

use crate::archive::{OoxmlArchive, DOCUMENT_PART, DOCUMENT_RELS_PART};
use crate::document::{Docx, Footer, HeaderFooterType, Paragraph, Run, RunContent, RunProperties};
use crate::field::SPACE_PRESERVE;
use crate::picture::{Picture, PictureFormat};
use crate::relationships::Relationships;

const NS_DECLARATIONS: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture""#
);

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CONTENT_TYPE_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CONTENT_TYPE_FOOTER: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml";

/// Default header/footer distance from the page edge, in twips
const HEADER_DISTANCE: i64 = 851;
const FOOTER_DISTANCE: i64 = 992;

/// Serializes one document into a package
pub(crate) struct DocxWriter<'a> {
    doc: &'a Docx,
    /// XML output buffer for the part being written
    output: String,
    /// Document relationships, extended with footers during packaging
    relationships: Relationships,
}

impl<'a> DocxWriter<'a> {
    pub(crate) fn new(doc: &'a Docx) -> Self {
        Self {
            doc,
            output: String::new(),
            relationships: doc.relationships.clone(),
        }
    }

    /// Build every part of the package
    pub(crate) fn package(mut self) -> OoxmlArchive {
        let mut archive = OoxmlArchive::new();

        let mut footer_refs = Vec::new();
        for (index, footer) in self.doc.footers.iter().enumerate() {
            let target = format!("footer{}.xml", index + 1);
            let rel_id = self.relationships.add_footer(&target);
            archive.set_string(format!("word/{}", target), self.generate_footer_xml(footer));
            footer_refs.push((footer.kind(), rel_id));
        }

        let document_xml = self.generate_document_xml(&footer_refs);
        archive.set_string(DOCUMENT_PART, document_xml);
        archive.set_string(DOCUMENT_RELS_PART, self.relationships.to_xml());

        for media in &self.doc.media {
            archive.set(media.path.clone(), media.data.clone());
        }

        archive.set_string("[Content_Types].xml", self.generate_content_types());
        archive.set_string("_rels/.rels", package_relationships());

        archive
    }

    /// Generate word/document.xml
    fn generate_document_xml(&mut self, footer_refs: &[(HeaderFooterType, String)]) -> String {
        self.output.clear();
        self.output.push_str(XML_DECLARATION);
        self.output.push('\n');
        self.output
            .push_str(&format!("<w:document {}>\n<w:body>\n", NS_DECLARATIONS));

        for para in &self.doc.body {
            self.generate_paragraph(para);
        }

        self.generate_section_properties(footer_refs);

        self.output.push_str("</w:body>\n</w:document>");
        std::mem::take(&mut self.output)
    }

    /// Generate a footer part
    fn generate_footer_xml(&mut self, footer: &Footer) -> String {
        self.output.clear();
        self.output.push_str(XML_DECLARATION);
        self.output.push('\n');
        self.output.push_str(&format!("<w:ftr {}>\n", NS_DECLARATIONS));

        if footer.paragraphs().is_empty() {
            // A footer part must hold at least one block
            self.output.push_str("<w:p/>\n");
        }
        for para in footer.paragraphs() {
            self.generate_paragraph(para);
        }

        self.output.push_str("</w:ftr>");
        std::mem::take(&mut self.output)
    }

    /// Generate the trailing `w:sectPr` of the body
    fn generate_section_properties(&mut self, footer_refs: &[(HeaderFooterType, String)]) {
        if footer_refs.is_empty() && self.doc.margins.is_none() {
            return;
        }

        self.output.push_str("<w:sectPr>\n");
        for (kind, rel_id) in footer_refs {
            self.output.push_str(&format!(
                "<w:footerReference w:type=\"{}\" r:id=\"{}\"/>\n",
                kind.as_str(),
                rel_id
            ));
        }
        if let Some(margins) = self.doc.margins {
            self.output.push_str(&format!(
                "<w:pgMar w:top=\"{}\" w:right=\"{}\" w:bottom=\"{}\" w:left=\"{}\" w:header=\"{}\" w:footer=\"{}\" w:gutter=\"0\"/>\n",
                margins.top, margins.right, margins.bottom, margins.left, HEADER_DISTANCE, FOOTER_DISTANCE
            ));
        }
        self.output.push_str("</w:sectPr>\n");
    }

    /// Generate XML for a paragraph
    fn generate_paragraph(&mut self, para: &Paragraph) {
        self.output.push_str("<w:p>\n");

        if para.first_line_indent().is_some() || para.alignment().is_some() {
            self.output.push_str("<w:pPr>");
            if let Some(indent) = para.first_line_indent() {
                self.output
                    .push_str(&format!("<w:ind w:firstLine=\"{}\"/>", indent));
            }
            if let Some(alignment) = para.alignment() {
                self.output
                    .push_str(&format!("<w:jc w:val=\"{}\"/>", alignment.as_str()));
            }
            self.output.push_str("</w:pPr>\n");
        }

        for run in para.runs() {
            self.generate_run(run);
        }

        self.output.push_str("</w:p>\n");
    }

    /// Generate XML for a run
    fn generate_run(&mut self, run: &Run) {
        self.output.push_str("<w:r>");
        self.generate_run_properties(run.properties());

        for content in run.content() {
            match content {
                RunContent::Text(text) => {
                    self.output.push_str(&format!(
                        "<w:t xml:space=\"{}\">{}</w:t>",
                        SPACE_PRESERVE,
                        escape_xml(text)
                    ));
                }
                RunContent::FieldChar(kind) => {
                    self.output.push_str(&format!(
                        "<w:fldChar w:fldCharType=\"{}\"/>",
                        kind.as_str()
                    ));
                }
                RunContent::InstrText(instruction) => {
                    self.output.push_str(&format!(
                        "<w:instrText xml:space=\"{}\">{}</w:instrText>",
                        SPACE_PRESERVE,
                        escape_xml(instruction)
                    ));
                }
                RunContent::Picture(picture) => self.generate_drawing(picture),
            }
        }

        self.output.push_str("</w:r>\n");
    }

    /// Generate `w:rPr`, in schema order
    fn generate_run_properties(&mut self, props: &RunProperties) {
        if props.is_empty() {
            return;
        }

        self.output.push_str("<w:rPr>");
        if let Some(ref family) = props.font_family {
            let family = escape_xml(family);
            self.output.push_str(&format!(
                "<w:rFonts w:ascii=\"{0}\" w:hAnsi=\"{0}\" w:eastAsia=\"{0}\" w:cs=\"{0}\"/>",
                family
            ));
        }
        if props.bold {
            self.output.push_str("<w:b/><w:bCs/>");
        }
        if let Some(ref color) = props.color {
            self.output
                .push_str(&format!("<w:color w:val=\"{}\"/>", escape_xml(color)));
        }
        if let Some(size) = props.font_size {
            let half_points = size * 2;
            self.output.push_str(&format!(
                "<w:sz w:val=\"{0}\"/><w:szCs w:val=\"{0}\"/>",
                half_points
            ));
        }
        self.output.push_str("</w:rPr>");
    }

    /// Generate an inline `w:drawing` for a registered picture
    fn generate_drawing(&mut self, picture: &Picture) {
        let name = escape_xml(&picture.name);
        self.output.push_str("<w:drawing>\n");
        self.output.push_str(&format!(
            r#"<wp:inline distT="0" distB="0" distL="0" distR="0">
<wp:extent cx="{cx}" cy="{cy}"/>
<wp:effectExtent l="0" t="0" r="0" b="0"/>
<wp:docPr id="{id}" name="{name}"/>
<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>
<a:graphic>
<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">
<pic:pic>
<pic:nvPicPr><pic:cNvPr id="{id}" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>
<pic:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>
<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>
</pic:pic>
</a:graphicData>
</a:graphic>
</wp:inline>
"#,
            cx = picture.width_emu,
            cy = picture.height_emu,
            id = picture.id,
            name = name,
            rel_id = picture.rel_id,
        ));
        self.output.push_str("</w:drawing>");
    }

    /// Generate [Content_Types].xml
    fn generate_content_types(&self) -> String {
        let mut xml = String::from(XML_DECLARATION);
        xml.push_str(
            "\n<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\n",
        );
        xml.push_str("  <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\n");
        xml.push_str("  <Default Extension=\"xml\" ContentType=\"application/xml\"/>\n");

        let mut formats: Vec<PictureFormat> = Vec::new();
        for media in &self.doc.media {
            if !formats.contains(&media.format) {
                formats.push(media.format);
            }
        }
        for format in formats {
            xml.push_str(&format!(
                "  <Default Extension=\"{}\" ContentType=\"{}\"/>\n",
                format.extension(),
                format.content_type()
            ));
        }

        xml.push_str(&format!(
            "  <Override PartName=\"/{}\" ContentType=\"{}\"/>\n",
            DOCUMENT_PART, CONTENT_TYPE_DOCUMENT
        ));
        for index in 0..self.doc.footers.len() {
            xml.push_str(&format!(
                "  <Override PartName=\"/word/footer{}.xml\" ContentType=\"{}\"/>\n",
                index + 1,
                CONTENT_TYPE_FOOTER
            ));
        }

        xml.push_str("</Types>");
        xml
    }
}

/// Generate _rels/.rels
fn package_relationships() -> String {
    let mut rels = Relationships::new();
    rels.add(DOCUMENT_PART, Relationships::TYPE_OFFICE_DOCUMENT);
    rels.to_xml()
}

/// Escape special XML characters
///
/// Characters XML 1.0 cannot carry (C0 controls other than tab, LF and CR,
/// U+FFFE, U+FFFF) are dropped.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            c if c < ' ' || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => escaped.push(c),
        }
    }
    escaped
}
