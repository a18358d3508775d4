#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Keyscope keyword dashboard client.
//!
//! The crate is split the same way on every target: `core`, `services`,
//! `features` and `router` are DOM-free and talk to the browser only through
//! ports (storage, HTTP transport, rendering, history, timers). The wasm32-only
//! `app` module provides the browser implementations and boots the router.

pub mod context;
pub mod core;
pub mod features;
pub mod router;
pub mod services;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
