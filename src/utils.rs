//! DOM lookup and logging helpers
//!
//! Handed to callers explicitly rather than published on `window`.

use std::fmt::Display;

use crate::consts::LOG_PREFIX;
use crate::platform::Document;

/// Helper set bound to one document.
#[derive(Debug, Clone)]
pub struct Utils<D: Document> {
    document: D,
}

impl<D: Document> Utils<D> {
    pub fn new(document: D) -> Self {
        Self { document }
    }

    /// Element with the given id, if any
    pub fn get_id(&self, id: &str) -> Option<D::Element> {
        self.document.get_element_by_id(id)
    }

    /// Live collection of elements carrying `class_name` (possibly empty)
    pub fn get_class(&self, class_name: &str) -> D::Collection {
        self.document.get_elements_by_class_name(class_name)
    }

    /// Log `message` with the application prefix
    pub fn log(&self, message: impl Display) {
        log::info!("{}", format_message(message));
    }
}

pub fn format_message(message: impl Display) -> String {
    format!("{} {}", LOG_PREFIX, message)
}
