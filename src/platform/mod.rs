//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - DOM lookups and event registration (`dom`)
//! - Key-value storage (`storage`, LocalStorage on web)
//!
//! `web` binds the traits to `web_sys` and only exists on wasm32. `memory`
//! is an in-process rendition used by the native binary and by tests.

pub mod dom;
pub mod memory;
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use dom::{Document, Element, ElementCollection};
pub use memory::{MemoryCollection, MemoryDocument, MemoryElement, MemoryStorage};
pub use storage::KeyValueStore;
#[cfg(target_arch = "wasm32")]
pub use web::{WebCollection, WebDocument, WebElement, WebStorage};
