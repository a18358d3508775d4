//! `localStorage`-backed key/value store.

use crate::core::session::KeyValueStore;
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;

/// Raw string access to `window.localStorage`.
///
/// Values are stored unencoded so tokens written by other scripts stay
/// readable; gloo's typed API would JSON-wrap them.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).unwrap_or_else(|err| {
            log_storage_error("get", key, err);
            None
        })
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::raw().set_item(key, value) {
            log_storage_error("set", key, err);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(err) = LocalStorage::raw().remove_item(key) {
            log_storage_error("remove", key, err);
        }
    }
}

fn log_storage_error(operation: &'static str, key: &str, detail: JsValue) {
    console::error!("storage operation failed", operation, key, detail);
}
