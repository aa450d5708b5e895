//! Archive handling for DOCX files
//!
//! A DOCX file is a ZIP archive of XML parts and media. `OoxmlArchive` keeps
//! every part in memory keyed by its path inside the package.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use zip::read::ZipArchive;
use zip::write::ZipWriter;
use zip::CompressionMethod;

use crate::error::{OoxmlError, Result};

/// Path of the main document part
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Path of the main document relationships part
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";

/// An unpacked (or not yet packed) OOXML package
#[derive(Debug, Default)]
pub struct OoxmlArchive {
    /// All parts in the archive, keyed by path
    files: HashMap<String, Vec<u8>>,
}

impl OoxmlArchive {
    /// Create an empty package
    pub fn new() -> Self {
        Self::default()
    }

    /// Open and unpack a DOCX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Unpack from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut files = HashMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(name, contents);
        }

        Ok(Self { files })
    }

    /// Unpack from an in-memory DOCX
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(std::io::Cursor::new(bytes))
    }

    /// Get a part's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|v| v.as_slice())
    }

    /// Get a part's contents as a string
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Get the main document part (word/document.xml)
    pub fn document_xml(&self) -> Result<&[u8]> {
        self.get(DOCUMENT_PART)
            .ok_or_else(|| OoxmlError::MissingFile(DOCUMENT_PART.to_string()))
    }

    /// Get the document relationships part, if any
    pub fn document_rels_xml(&self) -> Option<&[u8]> {
        self.get(DOCUMENT_RELS_PART)
    }

    /// Check if a part exists in the archive
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// List all part paths, sorted
    pub fn file_list(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.files.keys().map(|s| s.as_str()).collect();
        paths.sort_unstable();
        paths
    }

    /// Set or replace a part
    pub fn set(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        self.files.insert(path.into(), contents);
    }

    /// Set a part from a string
    pub fn set_string(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into().into_bytes());
    }

    /// Write the archive to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Write the archive to any writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated);

        // [Content_Types].xml sorts first, which some readers expect
        for path in self.file_list() {
            zip.start_file(path, options)?;
            zip.write_all(&self.files[path])?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Pack the archive into an in-memory DOCX
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = std::io::Cursor::new(Vec::new());
        self.write_to(&mut output)?;
        Ok(output.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_operations() {
        let mut archive = OoxmlArchive::new();

        archive.set_string("word/document.xml", "<w:document/>");
        assert!(archive.contains("word/document.xml"));
        assert_eq!(
            archive.get_string("word/document.xml"),
            Some("<w:document/>".to_string())
        );
        assert!(archive.document_xml().is_ok());
        assert!(archive.document_rels_xml().is_none());
    }

    #[test]
    fn test_missing_document_part() {
        let archive = OoxmlArchive::new();
        let err = archive.document_xml().unwrap_err();
        assert!(matches!(err, OoxmlError::MissingFile(ref p) if p == DOCUMENT_PART));
    }

    #[test]
    fn test_file_list_is_sorted() {
        let mut archive = OoxmlArchive::new();
        archive.set_string("word/document.xml", "");
        archive.set_string("[Content_Types].xml", "");
        archive.set_string("_rels/.rels", "");

        assert_eq!(
            archive.file_list(),
            vec!["[Content_Types].xml", "_rels/.rels", "word/document.xml"]
        );
    }

    #[test]
    fn test_roundtrip_through_zip() {
        let mut archive = OoxmlArchive::new();
        archive.set_string("word/document.xml", "<w:document/>");
        archive.set("word/media/image1.png", vec![0x89, b'P', b'N', b'G']);

        let bytes = archive.to_bytes().unwrap();
        let restored = OoxmlArchive::from_bytes(&bytes).unwrap();

        assert_eq!(restored.file_list().len(), 2);
        assert_eq!(
            restored.get("word/media/image1.png"),
            Some(&[0x89, b'P', b'N', b'G'][..])
        );
    }
}
