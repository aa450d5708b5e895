//! Page-number footer
//!
//! The page number is a live `PAGE` field evaluated by the word processor,
//! so it stays correct however the document paginates.

use htw_ooxml::{Alignment, Docx, HeaderFooterType, Paragraph};

use crate::style::{BlockKind, StyleParams};

/// Install the default footer: `prefix`, live page number, `suffix`
///
/// Replaces any default footer already installed. Alignment defaults to
/// centered. Prefix and suffix runs are only written when non-empty; all
/// text runs and the field instruction share the resolved style.
pub fn install_footer<'d>(
    doc: &'d mut Docx,
    params: &StyleParams,
    alignment: Option<Alignment>,
    prefix: &str,
    suffix: &str,
) -> &'d mut Paragraph {
    let props = params.resolve(BlockKind::Paragraph).to_run_properties();

    let para = doc
        .create_footer(HeaderFooterType::Default)
        .add_paragraph();
    para.set_alignment(alignment.unwrap_or_default());

    if !prefix.is_empty() {
        para.add_run().set_text(prefix).set_properties(props.clone());
    }
    para.add_page_number_field(&props);
    if !suffix.is_empty() {
        para.add_run().set_text(suffix).set_properties(props);
    }

    log::debug!("Installed page-number footer ('{}' PAGE '{}')", prefix, suffix);
    para
}
