//! HTTP transport port and the API client built on it.
pub mod api;
pub mod http;

#[cfg(target_arch = "wasm32")]
pub(crate) mod fetch;
