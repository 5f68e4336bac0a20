//! Application state and the session reducer.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` defines the persisted records, `artifacts` the actions and pure
//! reducer over them, `history` the undo stack they run through, and `app`
//! the single state object views share. The remaining modules are view state
//! and catalogs consumed by the drawer panels.

pub mod app;
pub mod artifacts;
pub mod catalog;
pub mod commands;
pub mod drawer;
pub mod history;
pub mod session;
pub mod settings;
pub mod templates;
pub mod ui;
