//! Synchronous session commands extracted from `app`.
//!
//! Each command validates its target, then goes through
//! [`AppState::dispatch`] so it lands in undo history like any other change.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::collections::BTreeSet;

use crate::state::app::AppState;
use crate::state::artifacts::SessionAction;
use crate::state::session::{Artifact, Session, new_session_id};
use crate::state::templates::DashboardTemplate;
use crate::util::export::{self, ImportError};
use crate::util::layout::Layout;

impl AppState {
    /// Restore the focused artifact's snapshot.
    pub fn revert_focused(&mut self) -> bool {
        let Some((session_id, artifact_id)) = self.focused_ids() else {
            return false;
        };
        self.dispatch(SessionAction::RevertArtifact { session_id, artifact_id })
    }

    /// Save code-editor text into the focused artifact.
    pub fn edit_focused_html(&mut self, html: String) -> bool {
        let Some((session_id, artifact_id)) = self.focused_ids() else {
            return false;
        };
        self.dispatch(SessionAction::EditArtifactHtml { session_id, artifact_id, html })
    }

    /// Re-wrap the focused artifact under `layout` and close the drawer.
    pub fn apply_layout_to_focused(&mut self, layout: &'static Layout) -> bool {
        let Some((session_id, artifact_id)) = self.focused_ids() else {
            return false;
        };
        let changed = self.dispatch(SessionAction::ApplyLayout { session_id, artifact_id, layout });
        if changed {
            log::info!("layout applied: layout={}", layout.name);
            self.close_drawer();
        }
        changed
    }

    /// Add an imported `.html` file as a single-artifact session.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::NotHtml`] for other file types.
    pub fn import_html(&mut self, html: String, file_name: &str, now_ms: i64) -> Result<String, ImportError> {
        export::check_html_file_name(file_name)?;
        let session = single_artifact_session(format!("Imported: {file_name}"), "Imported", html, now_ms);
        let session_id = session.id.clone();
        self.dispatch(SessionAction::AddSession { session });
        self.close_drawer();
        log::info!("html imported: file={file_name} session_id={session_id}");
        Ok(session_id)
    }

    /// Start a session from a built-in template.
    pub fn apply_template(&mut self, template: &DashboardTemplate, now_ms: i64) -> String {
        let session =
            single_artifact_session(format!("Template: {}", template.name), template.name, template.html.to_owned(), now_ms);
        let session_id = session.id.clone();
        self.dispatch(SessionAction::AddSession { session });
        self.close_drawer();
        log::info!("template applied: template={} session_id={session_id}", template.id);
        session_id
    }

    pub fn delete_session(&mut self, session_id: &str) -> bool {
        self.dispatch(SessionAction::DeleteSession { session_id: session_id.to_owned() })
    }

    pub fn update_session_meta(&mut self, session_id: &str, name: Option<String>, tags: BTreeSet<String>) -> bool {
        self.dispatch(SessionAction::UpdateSessionMeta { session_id: session_id.to_owned(), name, tags })
    }

    /// Drop every session. Durable storage is cleared by the caller's
    /// session saver.
    pub fn clear_all(&mut self) {
        self.dispatch(SessionAction::ClearAll);
        log::info!("workspace cleared");
    }

    /// Append sessions from an exported file; returns how many were new.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError`] when `json` is not a session list.
    pub fn import_sessions(&mut self, json: &str) -> Result<usize, ImportError> {
        let sessions = export::parse_sessions(json)?;
        let before = self.sessions().len();
        self.dispatch(SessionAction::ImportSessions { sessions });
        let added = self.sessions().len() - before;
        self.notice = Some(format!("Imported {added} session(s)"));
        log::info!("sessions imported: added={added}");
        Ok(added)
    }

    /// # Errors
    ///
    /// Returns the serializer error, which session records never produce.
    pub fn export_sessions(&self) -> Result<String, serde_json::Error> {
        export::sessions_json(self.sessions())
    }

    fn focused_ids(&self) -> Option<(String, String)> {
        self.focused_artifact().map(|(s, a)| (s.id.clone(), a.id.clone()))
    }
}

fn single_artifact_session(prompt: String, style_name: &str, html: String, now_ms: i64) -> Session {
    let id = new_session_id();
    let artifact = Artifact::complete(&id, 0, style_name, html);
    Session { artifacts: vec![artifact], ..Session::with_placeholders(id, prompt, now_ms, 0) }
}
