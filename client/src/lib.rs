//! AI dashboard-mockup generator.
//!
//! SYSTEM CONTEXT
//! ==============
//! `state` owns sessions, undo history and UI descriptors; `util` holds pure
//! HTML and persistence helpers; `net` talks to the model and the preview
//! iframes; `components` and `app` are the Leptos view layer on top.
//! Browser-only code sits behind the `csr` feature so everything else
//! builds and tests natively.

pub mod app;
pub mod components;
pub mod net;
pub mod state;
pub mod util;

/// Browser entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("logger init failed: {e}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
