//! Session list reducer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every change to the session list is expressed as a [`SessionAction`] and
//! applied by [`reduce`], a pure function from the latest list to the next
//! one. Streaming operations address a single artifact by
//! `(session id, artifact id)`, so any number of interleaved streams can
//! write through the same reducer without clobbering each other.
//!
//! DESIGN
//! ======
//! Artifact lifecycle is `streaming -> complete | error`. Chunks, finals and
//! failures are only accepted while the target is streaming; the only way
//! back to streaming is [`SessionAction::RestartArtifact`], issued by a new
//! operation on that artifact. Writes that miss (unknown ids, stale streams
//! after undo) leave the list unchanged.

#[cfg(test)]
#[path = "artifacts_test.rs"]
mod artifacts_test;

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::state::history::Checkpoint;
use crate::state::session::{Artifact, ArtifactStatus, Session};
use crate::util::layout::{self, Layout};

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```(?:html)?").expect("Invalid code fence regex"));

/// One transition of the session list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    /// Append a freshly created session with streaming placeholders.
    BeginGeneration { session: Session },
    /// Append a finished session (import, template).
    AddSession { session: Session },
    /// Replace placeholder style labels in order.
    SetStyleNames { session_id: String, names: Vec<String> },
    /// Append artifacts to an existing session.
    AppendArtifacts { session_id: String, artifacts: Vec<Artifact> },
    /// Put a settled artifact back into `streaming` for a new operation.
    RestartArtifact { session_id: String, artifact_id: String, clear_html: bool },
    ApplyChunk { session_id: String, artifact_id: String, delta: String },
    /// Settle a stream. `snapshot` becomes `original_html` for revertible
    /// operations.
    FinalizeArtifact { session_id: String, artifact_id: String, final_html: String, snapshot: Option<String> },
    /// Settle a stream as failed; `message` replaces the html.
    FailArtifact { session_id: String, artifact_id: String, message: String, snapshot: Option<String> },
    /// Code editor save.
    EditArtifactHtml { session_id: String, artifact_id: String, html: String },
    ApplyLayout { session_id: String, artifact_id: String, layout: &'static Layout },
    /// Restore `original_html` and drop the snapshot.
    RevertArtifact { session_id: String, artifact_id: String },
    DeleteSession { session_id: String },
    UpdateSessionMeta { session_id: String, name: Option<String>, tags: BTreeSet<String> },
    /// Append sessions whose ids are not already present.
    ImportSessions { sessions: Vec<Session> },
    ClearAll,
}

impl SessionAction {
    /// Whether applying this action records an undo step.
    ///
    /// Stream progress amends the step recorded when the operation began, so
    /// one undo reverts a whole generation.
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        match self {
            Self::SetStyleNames { .. }
            | Self::ApplyChunk { .. }
            | Self::FinalizeArtifact { .. }
            | Self::FailArtifact { .. } => Checkpoint::Amend,
            _ => Checkpoint::Push,
        }
    }

    /// Short tag for log lines.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeginGeneration { .. } => "begin_generation",
            Self::AddSession { .. } => "add_session",
            Self::SetStyleNames { .. } => "set_style_names",
            Self::AppendArtifacts { .. } => "append_artifacts",
            Self::RestartArtifact { .. } => "restart_artifact",
            Self::ApplyChunk { .. } => "apply_chunk",
            Self::FinalizeArtifact { .. } => "finalize_artifact",
            Self::FailArtifact { .. } => "fail_artifact",
            Self::EditArtifactHtml { .. } => "edit_artifact_html",
            Self::ApplyLayout { .. } => "apply_layout",
            Self::RevertArtifact { .. } => "revert_artifact",
            Self::DeleteSession { .. } => "delete_session",
            Self::UpdateSessionMeta { .. } => "update_session_meta",
            Self::ImportSessions { .. } => "import_sessions",
            Self::ClearAll => "clear_all",
        }
    }
}

/// Apply `action` to `sessions`, returning the next list.
#[must_use]
pub fn reduce(sessions: &[Session], action: &SessionAction) -> Vec<Session> {
    let mut next = sessions.to_vec();
    match action {
        SessionAction::BeginGeneration { session } | SessionAction::AddSession { session } => {
            if !next.iter().any(|s| s.id == session.id) {
                next.push(session.clone());
            }
        }
        SessionAction::SetStyleNames { session_id, names } => {
            if let Some(session) = find_session(&mut next, session_id) {
                for (artifact, name) in session.artifacts.iter_mut().zip(names) {
                    artifact.style_name.clone_from(name);
                }
            }
        }
        SessionAction::AppendArtifacts { session_id, artifacts } => {
            if let Some(session) = find_session(&mut next, session_id) {
                for artifact in artifacts {
                    if session.artifact(&artifact.id).is_none() {
                        session.artifacts.push(artifact.clone());
                    }
                }
            }
        }
        SessionAction::RestartArtifact { session_id, artifact_id, clear_html } => {
            patch(&mut next, session_id, artifact_id, |artifact| {
                artifact.status = ArtifactStatus::Streaming;
                if *clear_html {
                    artifact.html.clear();
                }
            });
        }
        SessionAction::ApplyChunk { session_id, artifact_id, delta } => {
            patch_streaming(&mut next, session_id, artifact_id, |artifact| artifact.html.push_str(delta));
        }
        SessionAction::FinalizeArtifact { session_id, artifact_id, final_html, snapshot } => {
            patch_streaming(&mut next, session_id, artifact_id, |artifact| {
                if let Some(snapshot) = snapshot {
                    artifact.original_html = Some(snapshot.clone());
                }
                artifact.html = strip_code_fences(final_html);
                artifact.status = ArtifactStatus::Complete;
            });
        }
        SessionAction::FailArtifact { session_id, artifact_id, message, snapshot } => {
            patch_streaming(&mut next, session_id, artifact_id, |artifact| {
                if let Some(snapshot) = snapshot {
                    artifact.original_html = Some(snapshot.clone());
                }
                artifact.html = error_html(message);
                artifact.status = ArtifactStatus::Error;
            });
        }
        SessionAction::EditArtifactHtml { session_id, artifact_id, html } => {
            patch(&mut next, session_id, artifact_id, |artifact| artifact.html.clone_from(html));
        }
        SessionAction::ApplyLayout { session_id, artifact_id, layout } => {
            patch(&mut next, session_id, artifact_id, |artifact| {
                if artifact.is_streaming() {
                    return;
                }
                let base = artifact.base_html().to_owned();
                artifact.html = layout::wrap_layout(&base, layout);
                artifact.original_html = Some(base);
                artifact.status = ArtifactStatus::Complete;
            });
        }
        SessionAction::RevertArtifact { session_id, artifact_id } => {
            patch(&mut next, session_id, artifact_id, |artifact| {
                if artifact.is_streaming() {
                    return;
                }
                if let Some(original) = artifact.original_html.take() {
                    artifact.html = original;
                    artifact.status = ArtifactStatus::Complete;
                }
            });
        }
        SessionAction::DeleteSession { session_id } => {
            next.retain(|s| &s.id != session_id);
        }
        SessionAction::UpdateSessionMeta { session_id, name, tags } => {
            if let Some(session) = find_session(&mut next, session_id) {
                session.name = name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(str::to_owned);
                session.tags.clone_from(tags);
            }
        }
        SessionAction::ImportSessions { sessions } => {
            for session in sessions {
                if !next.iter().any(|s| s.id == session.id) {
                    let mut session = session.clone();
                    interrupt_streaming(std::slice::from_mut(&mut session));
                    next.push(session);
                }
            }
        }
        SessionAction::ClearAll => next.clear(),
    }
    next
}

/// Remove markdown code-fence markers models wrap around html, then trim.
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_owned()
}

/// Display html for a failed artifact.
#[must_use]
pub fn error_html(message: &str) -> String {
    format!(
        "<div style=\"font-family:system-ui,sans-serif;color:#b91c1c;padding:24px\"><strong>Generation failed</strong><p>{}</p></div>",
        escape_html(message)
    )
}

/// Failure text for an artifact whose stream can no longer finish.
pub const INTERRUPTED_MESSAGE: &str = "Generation was interrupted before it finished. Regenerate to try again.";

/// Fail every `streaming` artifact in `sessions` with [`INTERRUPTED_MESSAGE`].
///
/// Only valid where no stream can still be writing: restored snapshots,
/// freshly loaded storage, imported backups. `original_html` is kept so a
/// rewrite that was cut short can still be reverted. Returns how many
/// artifacts were settled.
pub fn interrupt_streaming(sessions: &mut [Session]) -> usize {
    let mut settled = 0;
    for artifact in sessions.iter_mut().flat_map(|s| s.artifacts.iter_mut()) {
        if artifact.is_streaming() {
            artifact.html = error_html(INTERRUPTED_MESSAGE);
            artifact.status = ArtifactStatus::Error;
            settled += 1;
        }
    }
    settled
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn find_session<'a>(sessions: &'a mut [Session], session_id: &str) -> Option<&'a mut Session> {
    sessions.iter_mut().find(|s| s.id == session_id)
}

fn patch(sessions: &mut [Session], session_id: &str, artifact_id: &str, f: impl FnOnce(&mut Artifact)) {
    if let Some(artifact) =
        find_session(sessions, session_id).and_then(|s| s.artifacts.iter_mut().find(|a| a.id == artifact_id))
    {
        f(artifact);
    }
}

fn patch_streaming(sessions: &mut [Session], session_id: &str, artifact_id: &str, f: impl FnOnce(&mut Artifact)) {
    patch(sessions, session_id, artifact_id, |artifact| {
        if artifact.is_streaming() {
            f(artifact);
        } else {
            log::debug!("dropping write to settled artifact: session_id={session_id} artifact_id={artifact_id}");
        }
    });
}
