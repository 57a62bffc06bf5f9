//! Browser bindings over `web_sys` (wasm32 only)

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCollection, HtmlElement, MouseEvent};

use super::dom::{Document, Element, ElementCollection};
use super::storage::KeyValueStore;
use crate::storage::StorageError;

/// The page's `document`.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// `window.document`, if running with a window
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::new(document))
    }

    pub fn inner(&self) -> &web_sys::Document {
        &self.document
    }
}

impl Document for WebDocument {
    type Element = WebElement;
    type Collection = WebCollection;

    fn get_element_by_id(&self, id: &str) -> Option<WebElement> {
        self.document.get_element_by_id(id).map(WebElement::new)
    }

    fn get_elements_by_class_name(&self, class_name: &str) -> WebCollection {
        WebCollection {
            collection: self.document.get_elements_by_class_name(class_name),
        }
    }

    fn query_selector(&self, selectors: &str) -> Option<WebElement> {
        self.document
            .query_selector(selectors)
            .ok()
            .flatten()
            .map(WebElement::new)
    }

    fn on_content_loaded<F>(&self, handler: F)
    where
        F: FnOnce() + 'static,
    {
        // The module may start after parsing finished, in which case
        // DOMContentLoaded has already been dispatched.
        if self.document.ready_state() != "loading" {
            handler();
            return;
        }

        let callback = Closure::once_into_js(move |_event: web_sys::Event| handler());
        if let Err(err) = self
            .document
            .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        {
            log::error!("Failed to register DOMContentLoaded listener: {:?}", err);
        }
    }
}

/// A DOM element. Color access only applies to HTML elements.
#[derive(Debug, Clone, PartialEq)]
pub struct WebElement {
    element: web_sys::Element,
}

impl WebElement {
    pub fn new(element: web_sys::Element) -> Self {
        Self { element }
    }

    pub fn into_inner(self) -> web_sys::Element {
        self.element
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.element.dyn_ref::<HtmlElement>()
    }
}

impl Element for WebElement {
    fn color(&self) -> String {
        self.html()
            .and_then(|el| el.style().get_property_value("color").ok())
            .unwrap_or_default()
    }

    fn set_color(&self, color: &str) {
        if let Some(el) = self.html() {
            if let Err(err) = el.style().set_property("color", color) {
                log::warn!("Failed to set color {}: {:?}", color, err);
            }
        }
    }

    fn on_click<F>(&self, mut handler: F)
    where
        F: FnMut() + 'static,
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        if let Err(err) = self
            .element
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to register click listener: {:?}", err);
        }
        closure.forget();
    }
}

/// Live `HTMLCollection`.
#[derive(Debug, Clone)]
pub struct WebCollection {
    collection: HtmlCollection,
}

impl WebCollection {
    pub fn into_inner(self) -> HtmlCollection {
        self.collection
    }
}

impl ElementCollection for WebCollection {
    type Element = WebElement;

    fn len(&self) -> usize {
        self.collection.length() as usize
    }

    fn item(&self, index: usize) -> Option<WebElement> {
        let index = u32::try_from(index).ok()?;
        self.collection.item(index).map(WebElement::new)
    }
}

/// `window.localStorage`.
#[derive(Debug, Clone)]
pub struct WebStorage {
    storage: web_sys::Storage,
}

impl WebStorage {
    /// Fails when there is no window or storage access is denied
    pub fn local() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

fn backend_error(operation: &'static str, key: &str, err: JsValue) -> StorageError {
    StorageError::Backend {
        operation,
        key: key.to_string(),
        message: format!("{:?}", err),
    }
}

impl KeyValueStore for WebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|err| backend_error("getItem", key, err))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| backend_error("setItem", key, err))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|err| backend_error("removeItem", key, err))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_storage_is_available() {
        assert!(WebStorage::local().is_ok());
    }

    #[wasm_bindgen_test]
    fn local_storage_set_get_remove() {
        let storage = WebStorage::local().unwrap();
        storage.set_item("wasm_test_key", "42").unwrap();
        assert_eq!(storage.get_item("wasm_test_key").unwrap(), Some("42".to_string()));
        storage.remove_item("wasm_test_key").unwrap();
        assert_eq!(storage.get_item("wasm_test_key").unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn element_color_round_trip() {
        let doc = WebDocument::current().unwrap();
        let el = doc.inner().create_element("h1").unwrap();
        doc.inner().body().unwrap().append_child(&el).unwrap();
        let el = WebElement::new(el);

        assert_eq!(el.color(), "");
        el.set_color("blue");
        assert_eq!(el.color(), "blue");
    }

    #[wasm_bindgen_test]
    fn content_loaded_runs_immediately_once_parsed() {
        use std::cell::Cell;
        use std::rc::Rc;

        let doc = WebDocument::current().unwrap();
        assert_ne!(doc.inner().ready_state(), "loading");

        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        doc.on_content_loaded(move || flag.set(true));
        assert!(ran.get());
    }

    #[wasm_bindgen_test]
    fn click_dispatch_toggles_color() {
        let doc = WebDocument::current().unwrap();
        let el = doc.inner().create_element("h1").unwrap();
        doc.inner().body().unwrap().append_child(&el).unwrap();
        let html: HtmlElement = el.clone().dyn_into().unwrap();
        let header = WebElement::new(el);

        let target = header.clone();
        header.on_click(move || {
            let next = crate::header::next_color(&target.color());
            target.set_color(next);
        });

        html.click();
        assert_eq!(header.color(), "blue");
        html.click();
        assert_eq!(header.color(), "black");
    }

    #[wasm_bindgen_test]
    fn missing_id_is_none() {
        let doc = WebDocument::current().unwrap();
        assert!(doc.get_element_by_id("definitely-not-present").is_none());
    }
}
