//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Chrome components (`top_bar`, `stage`, `artifact_card`, `prompt_bar`,
//! `action_bar`) read and write the shared [`crate::state::app::AppState`]
//! signal from context. Drawer panels are mounted by `side_drawer` and only
//! see the props and callbacks it hands them.

pub mod action_bar;
pub mod artifact_card;
pub mod code_editor_panel;
pub mod enhance_panel;
pub mod history_panel;
pub mod import_panel;
pub mod layouts_panel;
pub mod prompt_bar;
pub mod settings_panel;
pub mod side_drawer;
pub mod stage;
pub mod templates_panel;
pub mod top_bar;
pub mod variations_panel;
