//! In-process DOM and storage
//!
//! Mirrors the browser behavior the boilerplate relies on closely enough to
//! run the bootstrap natively: handlers are dispatched synchronously, class
//! collections are live, and the content-loaded signal fires at most once.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::dom::{Document, Element, ElementCollection};
use super::storage::KeyValueStore;
use crate::storage::StorageError;

struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    color: String,
    click_handlers: Vec<Box<dyn FnMut()>>,
}

#[derive(Default)]
struct Tree {
    nodes: Vec<Node>,
    loaded: bool,
    ready_handlers: Vec<Box<dyn FnOnce()>>,
}

impl Tree {
    fn matches(&self, index: usize, selectors: &str) -> bool {
        let node = &self.nodes[index];
        if let Some(id) = selectors.strip_prefix('#') {
            node.id.as_deref() == Some(id)
        } else if let Some(class) = selectors.strip_prefix('.') {
            node.classes.iter().any(|c| c == class)
        } else {
            node.tag.eq_ignore_ascii_case(selectors)
        }
    }
}

/// Document held in memory, nodes kept in insertion (document) order.
#[derive(Clone, Default)]
pub struct MemoryDocument {
    tree: Rc<RefCell<Tree>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new element with the given tag name
    pub fn append(&self, tag: &str) -> MemoryElement {
        let mut tree = self.tree.borrow_mut();
        tree.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            color: String::new(),
            click_handlers: Vec::new(),
        });
        MemoryElement {
            tree: self.tree.clone(),
            index: tree.nodes.len() - 1,
        }
    }

    /// Whether the content-loaded signal has fired
    pub fn is_loaded(&self) -> bool {
        self.tree.borrow().loaded
    }

    /// Fire the content-loaded signal.
    ///
    /// Returns the number of handlers run; zero on every call after the first.
    pub fn fire_content_loaded(&self) -> usize {
        let handlers = {
            let mut tree = self.tree.borrow_mut();
            if tree.loaded {
                return 0;
            }
            tree.loaded = true;
            std::mem::take(&mut tree.ready_handlers)
        };

        let count = handlers.len();
        for handler in handlers {
            handler();
        }
        count
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree.borrow();
        f.debug_struct("MemoryDocument")
            .field("nodes", &tree.nodes.len())
            .field("loaded", &tree.loaded)
            .finish()
    }
}

impl Document for MemoryDocument {
    type Element = MemoryElement;
    type Collection = MemoryCollection;

    fn get_element_by_id(&self, id: &str) -> Option<MemoryElement> {
        let tree = self.tree.borrow();
        let index = tree
            .nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(id))?;
        Some(MemoryElement {
            tree: self.tree.clone(),
            index,
        })
    }

    fn get_elements_by_class_name(&self, class_name: &str) -> MemoryCollection {
        MemoryCollection {
            tree: self.tree.clone(),
            class_name: class_name.to_string(),
        }
    }

    fn query_selector(&self, selectors: &str) -> Option<MemoryElement> {
        let selectors = selectors.trim();
        if selectors.is_empty() {
            return None;
        }
        let tree = self.tree.borrow();
        let index = (0..tree.nodes.len()).find(|&i| tree.matches(i, selectors))?;
        Some(MemoryElement {
            tree: self.tree.clone(),
            index,
        })
    }

    fn on_content_loaded<F>(&self, handler: F)
    where
        F: FnOnce() + 'static,
    {
        {
            let mut tree = self.tree.borrow_mut();
            if !tree.loaded {
                tree.ready_handlers.push(Box::new(handler));
                return;
            }
        }
        handler();
    }
}

/// Handle to a node of a [`MemoryDocument`].
#[derive(Clone)]
pub struct MemoryElement {
    tree: Rc<RefCell<Tree>>,
    index: usize,
}

impl MemoryElement {
    pub fn with_id(self, id: &str) -> Self {
        self.tree.borrow_mut().nodes[self.index].id = Some(id.to_string());
        self
    }

    pub fn with_class(self, class_name: &str) -> Self {
        self.add_class(class_name);
        self
    }

    pub fn add_class(&self, class_name: &str) {
        let mut tree = self.tree.borrow_mut();
        let classes = &mut tree.nodes[self.index].classes;
        if !classes.iter().any(|c| c == class_name) {
            classes.push(class_name.to_string());
        }
    }

    pub fn remove_class(&self, class_name: &str) {
        self.tree.borrow_mut().nodes[self.index]
            .classes
            .retain(|c| c != class_name);
    }

    pub fn tag_name(&self) -> String {
        self.tree.borrow().nodes[self.index].tag.clone()
    }

    pub fn id(&self) -> Option<String> {
        self.tree.borrow().nodes[self.index].id.clone()
    }

    /// Dispatch a click to every registered handler, in registration order
    pub fn click(&self) {
        // Handlers may read or write this element, so the tree must not stay
        // borrowed while they run.
        let mut handlers =
            std::mem::take(&mut self.tree.borrow_mut().nodes[self.index].click_handlers);
        for handler in handlers.iter_mut() {
            handler();
        }

        let mut tree = self.tree.borrow_mut();
        let node = &mut tree.nodes[self.index];
        handlers.append(&mut node.click_handlers);
        node.click_handlers = handlers;
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.index == other.index
    }
}

impl Eq for MemoryElement {}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree.borrow();
        let node = &tree.nodes[self.index];
        f.debug_struct("MemoryElement")
            .field("tag", &node.tag)
            .field("id", &node.id)
            .field("color", &node.color)
            .finish()
    }
}

impl Element for MemoryElement {
    fn color(&self) -> String {
        self.tree.borrow().nodes[self.index].color.clone()
    }

    fn set_color(&self, color: &str) {
        self.tree.borrow_mut().nodes[self.index].color = color.to_string();
    }

    fn on_click<F>(&self, handler: F)
    where
        F: FnMut() + 'static,
    {
        self.tree.borrow_mut().nodes[self.index]
            .click_handlers
            .push(Box::new(handler));
    }
}

/// Live view of the elements carrying one class name.
#[derive(Clone)]
pub struct MemoryCollection {
    tree: Rc<RefCell<Tree>>,
    class_name: String,
}

impl MemoryCollection {
    fn indices(&self) -> Vec<usize> {
        let tree = self.tree.borrow();
        (0..tree.nodes.len())
            .filter(|&i| tree.nodes[i].classes.iter().any(|c| *c == self.class_name))
            .collect()
    }
}

impl fmt::Debug for MemoryCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCollection")
            .field("class_name", &self.class_name)
            .field("len", &self.len())
            .finish()
    }
}

impl ElementCollection for MemoryCollection {
    type Element = MemoryElement;

    fn len(&self) -> usize {
        self.indices().len()
    }

    fn item(&self, index: usize) -> Option<MemoryElement> {
        let index = *self.indices().get(index)?;
        Some(MemoryElement {
            tree: self.tree.clone(),
            index,
        })
    }
}

/// LocalStorage stand-in.
///
/// Clones share the same items. An optional quota (in bytes of keys plus
/// values) makes oversized writes fail the way a full browser store does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<BTreeMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: Rc::default(),
            quota: Some(quota),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.items.borrow().keys().cloned().collect()
    }

    fn used_bytes(items: &BTreeMap<String, String>) -> usize {
        items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.borrow_mut();
        if let Some(quota) = self.quota {
            let replaced = items.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = Self::used_bytes(&items) - replaced + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::Backend {
                    operation: "setItem",
                    key: key.to_string(),
                    message: format!("quota of {quota} bytes exceeded ({needed} needed)"),
                });
            }
        }
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
