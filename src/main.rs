//! Template Boilerplate entry point
//!
//! Handles platform-specific initialization and runs the bootstrap.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use template_boilerplate::bootstrap;
    use template_boilerplate::platform::WebDocument;

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {err}").into());
        }

        let Some(document) = WebDocument::current() else {
            log::error!("No window.document, bootstrap skipped");
            return;
        };

        let utils = bootstrap(document);
        utils.log("Utils ready");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Template Boilerplate (native) starting...");
    log::info!("Native mode runs against an in-memory document - build for wasm32 for the browser");

    if let Err(err) = demo() {
        log::error!("Demo failed: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo() -> Result<(), template_boilerplate::StorageError> {
    use serde_json::{Value, json};
    use template_boilerplate::consts::SAVE_KEY;
    use template_boilerplate::platform::{Element, ElementCollection, MemoryDocument, MemoryStorage};
    use template_boilerplate::{bootstrap, load, remove, save};

    let document = MemoryDocument::new();
    let header = document.append("h1").with_id("title");
    document.append("p").with_class("note");
    document.append("p").with_class("note");

    let utils = bootstrap(document.clone());
    document.fire_content_loaded();

    for _ in 0..2 {
        header.click();
        utils.log(format!("header color is now {}", header.color()));
    }
    utils.log(format!(
        "#title found: {}, .note count: {}",
        utils.get_id("title").is_some(),
        utils.get_class("note").len()
    ));

    let storage = MemoryStorage::new();
    save(&storage, &json!({"a": 1}))?;
    let loaded: Option<Value> = load(&storage, SAVE_KEY)?;
    utils.log(format!("loaded {SAVE_KEY}: {loaded:?}"));

    remove(&storage, SAVE_KEY)?;
    let loaded: Option<Value> = load(&storage, SAVE_KEY)?;
    utils.log(format!("after remove: {loaded:?}"));

    Ok(())
}
