//! Pure helpers shared by state, operations and views.
//!
//! SYSTEM CONTEXT
//! ==============
//! HTML surgery, layout wrapping and preview composition live here so they
//! can be tested without a browser. `persistence` and `time` hide the browser
//! APIs behind the `csr` feature.

pub mod export;
pub mod html_fragments;
pub mod layout;
pub mod persistence;
pub mod preview;
pub mod time;
