//! Relationship parts (`_rels/*.rels`)
//!
//! OOXML parts reference each other through relationship IDs. The document
//! part points at its media and footers this way; `inspect` walks the same
//! mapping backwards to find them again.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};

/// OOXML namespace for relationships
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

impl Relationships {
    /// Main document relationship type (package level)
    pub const TYPE_OFFICE_DOCUMENT: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    /// Image relationship type
    pub const TYPE_IMAGE: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    /// Footer relationship type
    pub const TYPE_FOOTER: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
}

/// Ordered relationship table of one part
#[derive(Debug, Clone)]
pub struct Relationships {
    /// Relationship IDs in insertion order
    order: Vec<String>,
    /// Relationship ID to target
    map: HashMap<String, RelationshipTarget>,
    /// Next numeric suffix for `rIdN`
    next_id_counter: u32,
}

impl Default for Relationships {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            map: HashMap::new(),
            next_id_counter: 1,
        }
    }
}

/// A relationship target with its type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipTarget {
    /// Target path, relative to the owning part's folder
    pub target: String,
    /// Relationship type URI
    pub rel_type: String,
}

impl Relationships {
    /// Create an empty relationship table
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a relationship part
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut rels = Self::new();
        let mut max_id: u32 = 0;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"Relationship" {
                        let mut id = None;
                        let mut target = None;
                        let mut rel_type = None;

                        for attr in e.attributes().filter_map(|a| a.ok()) {
                            let value = attr.unescape_value().ok().map(|s| s.to_string());
                            match attr.key.as_ref() {
                                b"Id" => id = value,
                                b"Target" => target = value,
                                b"Type" => rel_type = value,
                                _ => {}
                            }
                        }

                        if let (Some(id), Some(target)) = (id, target) {
                            if let Some(num) = extract_id_number(&id) {
                                max_id = max_id.max(num);
                            }
                            rels.insert(
                                id,
                                RelationshipTarget {
                                    target,
                                    rel_type: rel_type.unwrap_or_default(),
                                },
                            );
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        rels.next_id_counter = max_id + 1;
        Ok(rels)
    }

    fn insert(&mut self, id: String, target: RelationshipTarget) {
        if self.map.insert(id.clone(), target).is_none() {
            self.order.push(id);
        }
    }

    /// Add a relationship and return its generated ID (e.g. `rId3`)
    pub fn add(&mut self, target: impl Into<String>, rel_type: impl Into<String>) -> String {
        let id = format!("rId{}", self.next_id_counter);
        self.next_id_counter += 1;
        self.insert(
            id.clone(),
            RelationshipTarget {
                target: target.into(),
                rel_type: rel_type.into(),
            },
        );
        id
    }

    /// Add an image relationship
    pub fn add_image(&mut self, target: &str) -> String {
        self.add(target, Self::TYPE_IMAGE)
    }

    /// Add a footer relationship
    pub fn add_footer(&mut self, target: &str) -> String {
        self.add(target, Self::TYPE_FOOTER)
    }

    /// Get the target for a relationship ID
    pub fn get(&self, id: &str) -> Option<&str> {
        self.map.get(id).map(|r| r.target.as_str())
    }

    /// Get the full relationship for an ID
    pub fn get_target(&self, id: &str) -> Option<&RelationshipTarget> {
        self.map.get(id)
    }

    /// Targets of every relationship with the given type, in order
    pub fn targets_of_type<'a>(&'a self, rel_type: &'a str) -> impl Iterator<Item = &'a str> {
        self.iter()
            .filter(move |(_, rel)| rel.rel_type == rel_type)
            .map(|(_, rel)| rel.target.as_str())
    }

    /// Number of relationships
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if there are no relationships
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over relationships in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RelationshipTarget)> {
        self.order
            .iter()
            .filter_map(|id| self.map.get(id).map(|rel| (id.as_str(), rel)))
    }

    /// Serialize to a `.rels` part
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, RELATIONSHIPS_NS));
        xml.push('\n');

        for (id, rel) in self.iter() {
            xml.push_str(&format!(
                "  <Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>\n",
                crate::writer::escape_xml(id),
                crate::writer::escape_xml(&rel.rel_type),
                crate::writer::escape_xml(&rel.target)
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }
}

/// Numeric portion of a relationship ID (`rId5` -> 5)
fn extract_id_number(id: &str) -> Option<u32> {
    id.strip_prefix("rId").and_then(|num| num.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_generates_sequential_ids() {
        let mut rels = Relationships::new();

        assert_eq!(rels.add_image("media/image1.png"), "rId1");
        assert_eq!(rels.add_footer("footer1.xml"), "rId2");
        assert_eq!(rels.get("rId1"), Some("media/image1.png"));
        assert_eq!(
            rels.get_target("rId2").map(|r| r.rel_type.as_str()),
            Some(Relationships::TYPE_FOOTER)
        );
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_parse_continues_numbering() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="footer1.xml"/>
            <Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
        </Relationships>"#;

        let mut rels = Relationships::parse(xml).unwrap();
        assert_eq!(rels.len(), 2);
        assert_eq!(rels.add_image("media/image2.png"), "rId5");
    }

    #[test]
    fn test_targets_of_type() {
        let mut rels = Relationships::new();
        rels.add_image("media/image1.png");
        rels.add_footer("footer1.xml");
        rels.add_image("media/image2.jpeg");

        let images: Vec<_> = rels.targets_of_type(Relationships::TYPE_IMAGE).collect();
        assert_eq!(images, vec!["media/image1.png", "media/image2.jpeg"]);
    }

    #[test]
    fn test_to_xml_roundtrip() {
        let mut rels = Relationships::new();
        rels.add_footer("footer1.xml");
        rels.add_image("media/image1.png");

        let xml = rels.to_xml();
        assert!(xml.contains(RELATIONSHIPS_NS));

        let parsed = Relationships::parse(xml.as_bytes()).unwrap();
        assert_eq!(parsed.get("rId1"), Some("footer1.xml"));
        assert_eq!(parsed.get("rId2"), Some("media/image1.png"));
    }

    #[test]
    fn test_empty_relationships() {
        let xml = br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"></Relationships>"#;
        let rels = Relationships::parse(xml).unwrap();
        assert!(rels.is_empty());
    }
}
