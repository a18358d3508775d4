//! Storage-backed settings for the app shell.

use crate::core::config::UiConfig;
use gloo::console;
use gloo::storage::{LocalStorage, Storage};

/// Local storage key holding partial JSON config overrides.
pub(crate) const CONFIG_KEY: &str = "keyscope.config";

/// Defaults merged with any stored overrides; a bad override is reported and ignored.
pub(crate) fn load_config() -> UiConfig {
    let raw = match LocalStorage::raw().get_item(CONFIG_KEY) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => return UiConfig::default(),
        Err(err) => {
            console::error!("storage operation failed", "get", CONFIG_KEY, err);
            return UiConfig::default();
        }
    };
    UiConfig::default()
        .with_overrides(&raw)
        .unwrap_or_else(|err| {
            console::error!("ignoring config override", err.to_string());
            UiConfig::default()
        })
}
