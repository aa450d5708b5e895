//! Page setup

use htw_ooxml::{Docx, PageMargins};

pub use htw_ooxml::units::cm_to_twips;

/// Set the page margins, in twentieths of a point
pub fn set_page_margins(doc: &mut Docx, left: i64, right: i64, top: i64, bottom: i64) {
    doc.set_page_margins(PageMargins {
        left,
        right,
        top,
        bottom,
    });
}

/// Set the page margins from centimetres
pub fn set_page_margins_cm(doc: &mut Docx, left: f64, right: f64, top: f64, bottom: f64) {
    set_page_margins(
        doc,
        cm_to_twips(left),
        cm_to_twips(right),
        cm_to_twips(top),
        cm_to_twips(bottom),
    );
}
