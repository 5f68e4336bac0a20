//! Application state for the workspace.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `AppState` is provided to the component tree as an
//! `RwSignal<AppState>`. The session list lives inside a bounded
//! [`History`] and only changes through [`AppState::dispatch`]; everything
//! else here is view state that never enters undo history or storage.
//!
//! DESIGN
//! ======
//! The current session is tracked by id, not position, so deletes, imports
//! and undo cannot silently retarget it. When the tracked id disappears the
//! newest session becomes current.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::collections::VecDeque;

use crate::state::artifacts::{SessionAction, interrupt_streaming, reduce};
use crate::state::drawer::{DrawerData, DrawerMode, DrawerState};
use crate::state::history::History;
use crate::state::session::{Artifact, Session};
use crate::state::settings::GenerationSettings;
use crate::state::ui::UiState;

/// Maximum number of iframe runtime errors retained.
pub const RUNTIME_ERROR_CAP: usize = 50;

/// Script error reported by a preview iframe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeErrorReport {
    pub error: String,
    pub source: Option<String>,
    pub timestamp: i64,
}

/// Element picked in inspect mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedElement {
    pub html: String,
    pub tag_name: String,
}

#[derive(Clone, Debug)]
pub struct AppState {
    history: History<Vec<Session>>,
    current_session_id: Option<String>,
    pub ui: UiState,
    /// An AI operation is in flight; new ones are refused.
    pub is_loading: bool,
    pub drawer: DrawerState,
    pub settings: GenerationSettings,
    pub selected_element: Option<SelectedElement>,
    /// Newest last, bounded by [`RUNTIME_ERROR_CAP`].
    pub runtime_errors: VecDeque<RuntimeErrorReport>,
    /// One-line user-facing status (import results, configuration errors).
    pub notice: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Vec::new(), GenerationSettings::default())
    }
}

impl AppState {
    /// State seeded from storage. The newest session becomes current.
    #[must_use]
    pub fn new(sessions: Vec<Session>, settings: GenerationSettings) -> Self {
        let current_session_id = sessions.last().map(|s| s.id.clone());
        Self {
            history: History::new(sessions),
            current_session_id,
            ui: UiState::default(),
            is_loading: false,
            drawer: DrawerState::default(),
            settings,
            selected_element: None,
            runtime_errors: VecDeque::new(),
            notice: None,
        }
    }

    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        self.history.present()
    }

    /// Apply `action` through the history store.
    ///
    /// Returns whether the session list changed.
    pub fn dispatch(&mut self, action: SessionAction) -> bool {
        let changed = self.history.update(action.checkpoint(), |prev| reduce(prev, &action));
        match &action {
            SessionAction::BeginGeneration { session } | SessionAction::AddSession { session } => {
                self.current_session_id = Some(session.id.clone());
                self.ui.unfocus();
            }
            SessionAction::ClearAll => {
                self.current_session_id = None;
                self.ui.unfocus();
                self.drawer.close();
                self.selected_element = None;
            }
            SessionAction::ApplyChunk { .. } => {}
            other => log::debug!("dispatched {}: changed={changed}", other.name()),
        }
        self.repair_pointers();
        changed
    }

    /// Step back one checkpoint. Refused while an operation is running.
    pub fn undo(&mut self) -> bool {
        if self.is_loading {
            log::debug!("undo refused while an operation is running");
            return false;
        }
        let moved = self.history.undo();
        self.settle_restored();
        moved
    }

    /// Step forward one checkpoint. Refused while an operation is running.
    pub fn redo(&mut self) -> bool {
        if self.is_loading {
            log::debug!("redo refused while an operation is running");
            return false;
        }
        let moved = self.history.redo();
        self.settle_restored();
        moved
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.is_loading && self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.is_loading && self.history.can_redo()
    }

    #[must_use]
    pub fn current_session(&self) -> Option<&Session> {
        let id = self.current_session_id.as_deref()?;
        self.sessions().iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn current_session_index(&self) -> Option<usize> {
        let id = self.current_session_id.as_deref()?;
        self.sessions().iter().position(|s| s.id == id)
    }

    /// Focused artifact of the current session.
    #[must_use]
    pub fn focused_artifact(&self) -> Option<(&Session, &Artifact)> {
        let session = self.current_session()?;
        let artifact = session.artifacts.get(self.ui.focused_artifact?)?;
        Some((session, artifact))
    }

    /// Make `session_id` current, back on the grid with the drawer closed.
    pub fn jump_to_session(&mut self, session_id: &str) {
        if self.sessions().iter().any(|s| s.id == session_id) {
            self.current_session_id = Some(session_id.to_owned());
            self.ui.unfocus();
            self.drawer.close();
        }
    }

    /// Focus artifact `index` of the current session; out-of-range is ignored.
    pub fn focus_artifact(&mut self, index: usize) {
        if self.current_session().is_some_and(|s| index < s.artifacts.len()) {
            self.ui.focus(index);
        }
    }

    pub fn unfocus(&mut self) {
        self.ui.unfocus();
    }

    /// Set inspect mode. Returns the toggle to post into previews when the
    /// flag actually changed.
    pub fn set_inspect(&mut self, enabled: bool) -> Option<bridge::Message> {
        if self.ui.inspect_mode == enabled {
            return None;
        }
        self.ui.inspect_mode = enabled;
        Some(bridge::Message::ToggleInspect { value: enabled })
    }

    /// Claim the busy flag. `false` when another operation holds it.
    pub fn try_begin_loading(&mut self) -> bool {
        if self.is_loading {
            return false;
        }
        self.is_loading = true;
        true
    }

    pub fn finish_loading(&mut self) {
        self.is_loading = false;
    }

    /// Open `mode`, handing it the slice of state it edits.
    pub fn open_drawer(&mut self, mode: DrawerMode) {
        let focused_html = self.focused_artifact().map(|(_, a)| (a.html.clone(), a.base_html().to_owned()));
        let data = match (mode, focused_html) {
            (DrawerMode::CodeEditor, Some((html, _))) => {
                DrawerData::Code { html, selected: self.selected_element.as_ref().map(|e| e.html.clone()) }
            }
            (DrawerMode::Layouts, Some((_, base))) => DrawerData::Artifact { html: base },
            _ => DrawerData::None,
        };
        self.drawer.open(mode, data);
    }

    pub fn close_drawer(&mut self) {
        self.drawer.close();
    }

    pub fn record_runtime_error(&mut self, error: String, source: Option<String>, timestamp: i64) {
        log::warn!("preview runtime error: error={error} source={}", source.as_deref().unwrap_or("-"));
        if self.runtime_errors.len() >= RUNTIME_ERROR_CAP {
            self.runtime_errors.pop_front();
        }
        self.runtime_errors.push_back(RuntimeErrorReport { error, source, timestamp });
    }

    pub fn clear_runtime_errors(&mut self) {
        self.runtime_errors.clear();
    }

    /// Remember an inspected element and hand it to an open code editor.
    pub fn select_element(&mut self, html: String, tag_name: String) {
        log::info!("element selected: tag={tag_name}");
        self.drawer.attach_selection(&html);
        self.selected_element = Some(SelectedElement { html, tag_name });
    }

    pub fn update_settings(&mut self, f: impl FnOnce(&mut GenerationSettings)) {
        f(&mut self.settings);
    }

    // No operation is running here, so a restored `streaming` artifact has
    // no stream left to finish it.
    fn settle_restored(&mut self) {
        let mut settled = 0;
        self.history.patch_present(|sessions| settled = interrupt_streaming(sessions));
        if settled > 0 {
            log::info!("restored snapshot had unfinished artifacts: settled={settled}");
        }
        self.repair_pointers();
    }

    fn repair_pointers(&mut self) {
        let sessions = self.history.present();
        let current_exists = self
            .current_session_id
            .as_deref()
            .is_some_and(|id| sessions.iter().any(|s| s.id == id));
        if !current_exists {
            self.current_session_id = sessions.last().map(|s| s.id.clone());
            self.ui.unfocus();
        }
        let artifact_count = self.current_session().map_or(0, |s| s.artifacts.len());
        if self.ui.focused_artifact.is_some_and(|i| i >= artifact_count) {
            self.ui.unfocus();
        }
    }
}
