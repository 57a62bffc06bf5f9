//! DOM access traits
//!
//! Handlers registered here live for the rest of the page; there is no way to
//! unregister them.

/// A handle to a single node in the document.
///
/// Cloning the handle does not clone the node.
pub trait Element: Clone + 'static {
    /// Current inline `color` style value (empty when unset)
    fn color(&self) -> String;

    /// Set the inline `color` style value
    fn set_color(&self, color: &str);

    /// Run `handler` on every click of this element
    fn on_click<F>(&self, handler: F)
    where
        F: FnMut() + 'static;
}

/// A live list of elements: it reflects the document at the time of each call.
pub trait ElementCollection {
    type Element: Element;

    fn len(&self) -> usize;

    fn item(&self, index: usize) -> Option<Self::Element>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the collection's current contents
    fn to_vec(&self) -> Vec<Self::Element> {
        (0..self.len()).filter_map(|i| self.item(i)).collect()
    }
}

/// The page document.
pub trait Document: Clone + 'static {
    type Element: Element;
    type Collection: ElementCollection<Element = Self::Element>;

    fn get_element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn get_elements_by_class_name(&self, class_name: &str) -> Self::Collection;

    /// First element matching `selectors`, `None` on no match or invalid selector
    fn query_selector(&self, selectors: &str) -> Option<Self::Element>;

    /// Run `handler` once the document has finished parsing.
    ///
    /// If that already happened, `handler` runs immediately.
    fn on_content_loaded<F>(&self, handler: F)
    where
        F: FnOnce() + 'static;
}
