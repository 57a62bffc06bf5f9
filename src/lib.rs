//! Template Boilerplate - minimal front-end starter compiled to WebAssembly
//!
//! Core modules:
//! - `bootstrap`: Page startup (load logging, DOM-ready wiring)
//! - `header`: Click-to-toggle header color
//! - `utils`: DOM lookup and logging helpers
//! - `storage`: JSON save/load/remove over LocalStorage
//! - `platform`: Browser/native platform abstraction

pub mod bootstrap;
pub mod header;
pub mod platform;
pub mod storage;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod bindings;

pub use bootstrap::bootstrap;
pub use storage::{StorageError, load, remove, save};
pub use utils::Utils;

/// Application constants
pub mod consts {
    /// Name used in startup logging
    pub const APP_NAME: &str = "Template Boilerplate";
    /// Prefix for `Utils::log` messages
    pub const LOG_PREFIX: &str = "[Template Boilerplate]:";

    /// LocalStorage key written by `storage::save`
    pub const SAVE_KEY: &str = "saveDataModule";

    /// Header that receives the color toggle
    pub const HEADER_SELECTOR: &str = "h1";
    pub const HEADER_COLOR_ON: &str = "blue";
    pub const HEADER_COLOR_OFF: &str = "black";
}
