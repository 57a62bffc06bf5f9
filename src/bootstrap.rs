//! Page bootstrap

use crate::consts::{APP_NAME, HEADER_SELECTOR};
use crate::header::attach_header_toggle;
use crate::platform::Document;
use crate::utils::Utils;

/// Log startup, wire the header toggle for when the DOM is ready, and hand
/// back the helper set for `document`.
pub fn bootstrap<D: Document>(document: D) -> Utils<D> {
    log::info!("{} loaded successfully!", APP_NAME);

    let ready_document = document.clone();
    document.on_content_loaded(move || {
        log::info!("DOM is fully loaded and parsed");
        if attach_header_toggle(&ready_document).is_none() {
            log::debug!("No {} element, header toggle not attached", HEADER_SELECTOR);
        }
    });

    Utils::new(document)
}
