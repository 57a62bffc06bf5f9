//! JavaScript module exports (wasm32 only)
//!
//! Other scripts import these from the generated module instead of reaching
//! for a global helper object.

use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::platform::{WebDocument, WebElement, WebStorage};
use crate::storage::{self, StorageError};
use crate::utils::Utils;

fn to_js(err: StorageError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn local_storage() -> Result<WebStorage, JsValue> {
    WebStorage::local().map_err(to_js)
}

/// Save `data` under the fixed key. `undefined`, functions and cyclic
/// objects are rejected. Object key order is kept as given.
#[wasm_bindgen]
pub fn save(data: JsValue) -> Result<(), JsValue> {
    let text: JsValue = js_sys::JSON::stringify(&data)?.into();
    let text = text
        .as_string()
        .ok_or_else(|| JsValue::from_str("value has no JSON representation"))?;
    let value: Value =
        serde_json::from_str(&text).map_err(|err| to_js(StorageError::Serialize(err)))?;
    storage::save(&local_storage()?, &value).map_err(to_js)
}

/// Load the value under `key`; `undefined` if nothing is stored there
#[wasm_bindgen]
pub fn load(key: &str) -> Result<JsValue, JsValue> {
    match storage::load::<_, Value>(&local_storage()?, key).map_err(to_js)? {
        Some(value) => js_sys::JSON::parse(&value.to_string()),
        None => Ok(JsValue::UNDEFINED),
    }
}

#[wasm_bindgen]
pub fn remove(key: &str) -> Result<(), JsValue> {
    storage::remove(&local_storage()?, key).map_err(to_js)
}

#[wasm_bindgen]
pub fn get_id(id: &str) -> Option<web_sys::Element> {
    let utils = Utils::new(WebDocument::current()?);
    utils.get_id(id).map(WebElement::into_inner)
}

#[wasm_bindgen]
pub fn get_class(class_name: &str) -> Option<web_sys::HtmlCollection> {
    let utils = Utils::new(WebDocument::current()?);
    Some(utils.get_class(class_name).into_inner())
}

#[wasm_bindgen]
pub fn log_message(message: &str) {
    match WebDocument::current() {
        Some(document) => Utils::new(document).log(message),
        None => log::info!("{}", crate::utils::format_message(message)),
    }
}
