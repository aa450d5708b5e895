//! Complex field tokens
//!
//! A complex field is spread over several runs: a `begin` field char, one or
//! more runs of instruction text, and an `end` field char. Word evaluates the
//! instruction when the document is laid out, which is how live page numbers
//! reach the footer.

/// `w:fldChar/@w:fldCharType` values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCharType {
    Begin,
    Separate,
    End,
}

impl FieldCharType {
    /// Attribute value as written to XML
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::Separate => "separate",
            Self::End => "end",
        }
    }

    /// Parse the attribute value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "begin" => Some(Self::Begin),
            "separate" => Some(Self::Separate),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

/// Instruction of the current page number field
///
/// The double space is part of what Word itself writes and must survive, so
/// the run carrying it is written with `xml:space="preserve"`.
pub const PAGE_FIELD_INSTRUCTION: &str = "PAGE  \\* MERGEFORMAT";

/// `xml:space` value that keeps whitespace intact
pub const SPACE_PRESERVE: &str = "preserve";
