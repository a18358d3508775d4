//! History API adapter.

use crate::core::navigation::History;
use gloo::console;
use gloo::utils::window;
use wasm_bindgen::JsValue;

/// `window.history` and `window.location`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserHistory;

impl History for BrowserHistory {
    fn location(&self) -> String {
        let location = window().location();
        let path = location.pathname().unwrap_or_else(|_| "/".to_string());
        let search = location.search().unwrap_or_default();
        format!("{path}{search}")
    }

    fn push(&self, path: &str) {
        let pushed = window()
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(path)));
        if let Err(err) = pushed {
            console::error!("history push failed", path, err);
        }
    }

    fn replace(&self, path: &str) {
        let replaced = window()
            .history()
            .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(path)));
        if let Err(err) = replaced {
            console::error!("history replace failed", path, err);
        }
    }
}
