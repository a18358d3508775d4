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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Browser entry point for the Keyscope dashboard; native builds only explain
//! how to build for the browser.

#[cfg(target_arch = "wasm32")]
fn main() -> Result<(), std::io::Error> {
    keyscope_ui::run_app();
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), std::io::Error> {
    use std::io::{self, Write};

    writeln!(
        io::stderr().lock(),
        "keyscope-ui runs in the browser only; target wasm32-unknown-unknown to build the dashboard."
    )
}
