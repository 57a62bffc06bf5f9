//! Click-to-toggle header color

use crate::consts::{HEADER_COLOR_OFF, HEADER_COLOR_ON, HEADER_SELECTOR};
use crate::platform::{Document, Element};

/// Color to apply after a click, given the current one.
///
/// Anything other than [`HEADER_COLOR_ON`] (including an unset color) turns
/// the header on.
pub fn next_color(current: &str) -> &'static str {
    if current == HEADER_COLOR_ON {
        HEADER_COLOR_OFF
    } else {
        HEADER_COLOR_ON
    }
}

/// Attach the toggle to the first header of `document`.
///
/// Returns the header, or `None` (and registers nothing) if the page has none.
pub fn attach_header_toggle<D: Document>(document: &D) -> Option<D::Element> {
    let header = document.query_selector(HEADER_SELECTOR)?;
    let target = header.clone();
    header.on_click(move || {
        let next = next_color(&target.color());
        target.set_color(next);
    });
    Some(header)
}
