//! Reading a packaged document back
//!
//! Produces a flat summary of the body and footers: paragraphs, their runs
//! and what each run carries. Used by the `inspect` command and by tests
//! that check what a conversion actually wrote.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;

use crate::archive::OoxmlArchive;
use crate::document::{Alignment, PageMargins, RunProperties};
use crate::error::{OoxmlError, Result};
use crate::field::FieldCharType;
use crate::relationships::Relationships;

/// One piece of run content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunItem {
    Text { text: String },
    FieldChar { field: String },
    Instruction { text: String },
    Picture { name: String, cx: i64, cy: i64 },
}

/// A run with its formatting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub bold: bool,
    pub font_family: Option<String>,
    /// Size in points
    pub font_size: Option<u32>,
    pub color: Option<String>,
    pub items: Vec<RunItem>,
}

impl RunSummary {
    /// Formatting as run properties
    pub fn properties(&self) -> RunProperties {
        RunProperties {
            bold: self.bold,
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            color: self.color.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParagraphSummary {
    pub alignment: Option<Alignment>,
    /// First-line indent in twips
    pub first_line_indent: Option<i64>,
    pub runs: Vec<RunSummary>,
}

impl ParagraphSummary {
    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        let mut text = String::new();
        for run in &self.runs {
            for item in &run.items {
                if let RunItem::Text { text: t } = item {
                    text.push_str(t);
                }
            }
        }
        text
    }

    /// Pictures placed in this paragraph
    pub fn pictures(&self) -> impl Iterator<Item = &RunItem> {
        self.runs
            .iter()
            .flat_map(|r| r.items.iter())
            .filter(|item| matches!(item, RunItem::Picture { .. }))
    }
}

/// Paragraphs of one part (body or footer)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartSummary {
    pub paragraphs: Vec<ParagraphSummary>,
}

/// Summary of a whole package
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocxSummary {
    pub body: PartSummary,
    pub footers: Vec<PartSummary>,
    pub margins: Option<PageMargins>,
    /// Media part paths, sorted
    pub media: Vec<String>,
}

/// Summarize a DOCX package
pub fn inspect_docx(bytes: &[u8]) -> Result<DocxSummary> {
    let archive = OoxmlArchive::from_bytes(bytes)?;
    let (body, margins) = parse_part(archive.document_xml()?)?;

    let rels = match archive.document_rels_xml() {
        Some(xml) => Relationships::parse(xml)?,
        None => Relationships::new(),
    };

    let mut footers = Vec::new();
    for target in rels.targets_of_type(Relationships::TYPE_FOOTER) {
        let path = format!("word/{}", target.trim_start_matches('/'));
        let xml = archive
            .get(&path)
            .ok_or_else(|| OoxmlError::MissingFile(path.clone()))?;
        footers.push(parse_part(xml)?.0);
    }

    let media = archive
        .file_list()
        .into_iter()
        .filter(|path| path.starts_with("word/media/"))
        .map(str::to_string)
        .collect();

    Ok(DocxSummary {
        body,
        footers,
        margins,
        media,
    })
}

/// Summarize a single `document.xml` or `footerN.xml` part
pub fn inspect_part(xml: &[u8]) -> Result<PartSummary> {
    Ok(parse_part(xml)?.0)
}

fn parse_part(xml: &[u8]) -> Result<(PartSummary, Option<PageMargins>)> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut part = PartSummary::default();
    let mut margins = None;
    let mut paragraph: Option<ParagraphSummary> = None;
    let mut run: Option<RunSummary> = None;
    let mut in_text = false;
    let mut in_instr = false;
    let mut picture_name = String::new();
    let mut picture_extent = (0, 0);

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match event {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"p" => paragraph = Some(ParagraphSummary::default()),
                b"r" => run = Some(RunSummary::default()),
                b"t" => in_text = true,
                b"instrText" => in_instr = true,
                b"drawing" => {
                    picture_name.clear();
                    picture_extent = (0, 0);
                }
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"p" => part.paragraphs.push(ParagraphSummary::default()),
                b"jc" => {
                    if let Some(p) = paragraph.as_mut() {
                        p.alignment = attr(e, b"val").as_deref().and_then(parse_alignment);
                    }
                }
                b"ind" => {
                    if let Some(p) = paragraph.as_mut() {
                        p.first_line_indent = attr(e, b"firstLine").and_then(|v| v.parse().ok());
                    }
                }
                b"rFonts" => {
                    if let Some(r) = run.as_mut() {
                        r.font_family = attr(e, b"eastAsia").or_else(|| attr(e, b"ascii"));
                    }
                }
                b"b" => {
                    if let Some(r) = run.as_mut() {
                        r.bold = !matches!(attr(e, b"val").as_deref(), Some("0" | "false"));
                    }
                }
                b"color" => {
                    if let Some(r) = run.as_mut() {
                        r.color = attr(e, b"val");
                    }
                }
                b"sz" => {
                    if let Some(r) = run.as_mut() {
                        r.font_size = attr(e, b"val")
                            .and_then(|v| v.parse::<u32>().ok())
                            .map(|half_points| half_points / 2);
                    }
                }
                b"fldChar" => {
                    let kind = attr(e, b"fldCharType");
                    if let (Some(r), Some(kind)) = (run.as_mut(), kind) {
                        if FieldCharType::parse(&kind).is_some() {
                            r.items.push(RunItem::FieldChar { field: kind });
                        }
                    }
                }
                b"extent" => {
                    picture_extent = (
                        attr(e, b"cx").and_then(|v| v.parse().ok()).unwrap_or(0),
                        attr(e, b"cy").and_then(|v| v.parse().ok()).unwrap_or(0),
                    );
                }
                b"docPr" => picture_name = attr(e, b"name").unwrap_or_default(),
                b"pgMar" => {
                    let twips = |name: &[u8]| attr(e, name).and_then(|v| v.parse().ok()).unwrap_or(0);
                    margins = Some(PageMargins {
                        left: twips(b"left"),
                        right: twips(b"right"),
                        top: twips(b"top"),
                        bottom: twips(b"bottom"),
                    });
                }
                _ => {}
            },
            Event::Text(ref e) => {
                if in_text || in_instr {
                    let text = e.unescape()?.into_owned();
                    if let Some(r) = run.as_mut() {
                        if in_text {
                            r.items.push(RunItem::Text { text });
                        } else {
                            r.items.push(RunItem::Instruction { text });
                        }
                    }
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"instrText" => in_instr = false,
                b"drawing" => {
                    if let Some(r) = run.as_mut() {
                        r.items.push(RunItem::Picture {
                            name: std::mem::take(&mut picture_name),
                            cx: picture_extent.0,
                            cy: picture_extent.1,
                        });
                    }
                }
                b"r" => {
                    if let (Some(p), Some(r)) = (paragraph.as_mut(), run.take()) {
                        p.runs.push(r);
                    }
                }
                b"p" => {
                    if let Some(p) = paragraph.take() {
                        part.paragraphs.push(p);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok((part, margins))
}

/// Value of the attribute with the given local name
fn attr(e: &BytesStart, local: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.local_name().as_ref() == local)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

fn parse_alignment(value: &str) -> Option<Alignment> {
    match value {
        "left" | "start" => Some(Alignment::Left),
        "center" => Some(Alignment::Center),
        "right" | "end" => Some(Alignment::Right),
        "both" => Some(Alignment::Both),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Docx, HeaderFooterType};

    #[test]
    fn test_inspect_part_text_and_format() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:pPr><w:ind w:firstLine="640"/><w:jc w:val="center"/></w:pPr>
<w:r><w:rPr><w:rFonts w:eastAsia="黑体"/><w:b/><w:sz w:val="44"/></w:rPr><w:t xml:space="preserve">Tom &amp; Jerry</w:t></w:r>
</w:p>
<w:p/>
</w:body></w:document>"#;

        let part = inspect_part(xml.as_bytes()).unwrap();
        assert_eq!(part.paragraphs.len(), 2);

        let first = &part.paragraphs[0];
        assert_eq!(first.alignment, Some(Alignment::Center));
        assert_eq!(first.first_line_indent, Some(640));
        assert_eq!(first.text(), "Tom & Jerry");
        assert!(first.runs[0].bold);
        assert_eq!(first.runs[0].font_family.as_deref(), Some("黑体"));
        assert_eq!(first.runs[0].font_size, Some(22));

        assert!(part.paragraphs[1].runs.is_empty());
    }

    #[test]
    fn test_inspect_docx_footer() {
        let mut doc = Docx::new();
        doc.add_paragraph().add_run().set_text("body");
        let props = RunProperties {
            color: Some("FF0000".to_string()),
            ..Default::default()
        };
        let para = doc.create_footer(HeaderFooterType::Default).add_paragraph();
        para.set_alignment(Alignment::Center);
        para.add_run().set_text("Page ");
        para.add_page_number_field(&props);

        let summary = inspect_docx(&doc.to_bytes().unwrap()).unwrap();
        assert_eq!(summary.body.paragraphs[0].text(), "body");
        assert_eq!(summary.footers.len(), 1);

        let footer = &summary.footers[0].paragraphs[0];
        assert_eq!(footer.alignment, Some(Alignment::Center));
        let items: Vec<&RunItem> = footer.runs.iter().flat_map(|r| r.items.iter()).collect();
        assert_eq!(
            items,
            vec![
                &RunItem::Text { text: "Page ".to_string() },
                &RunItem::FieldChar { field: "begin".to_string() },
                &RunItem::Instruction { text: r"PAGE  \* MERGEFORMAT".to_string() },
                &RunItem::FieldChar { field: "end".to_string() },
            ]
        );
        assert_eq!(footer.runs[2].color.as_deref(), Some("FF0000"));
    }

    #[test]
    fn test_inspect_rejects_non_zip() {
        assert!(inspect_docx(b"not a zip").is_err());
    }
}
