//! Session and artifact records.
//!
//! SYSTEM CONTEXT
//! ==============
//! A session is one prompt cycle; its artifacts are the HTML candidates the
//! model produced for it. Both records are persisted as camelCase JSON so the
//! stored workspace stays readable by hand and by the export panel.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Style label shown on placeholders before concept names resolve.
pub const PLACEHOLDER_STYLE: &str = "Designing...";

/// Number of candidates created for a fresh prompt.
pub const ARTIFACTS_PER_SESSION: usize = 3;

/// Lifecycle of one artifact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    /// Text is still arriving; `html` is a growing prefix.
    #[default]
    Streaming,
    /// Final HTML is in place.
    Complete,
    /// The producing operation failed; `html` carries the message.
    Error,
}

/// One rendered HTML candidate belonging to a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// `<session id>_<index>`; stable address for reducer updates.
    pub id: String,
    /// Human label for the design concept.
    pub style_name: String,
    /// Current HTML text, possibly partial while streaming.
    #[serde(default)]
    pub html: String,
    /// Snapshot taken before the last revertible operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_html: Option<String>,
    #[serde(default)]
    pub status: ArtifactStatus,
}

impl Artifact {
    /// Empty streaming placeholder at `index` inside `session_id`.
    #[must_use]
    pub fn placeholder(session_id: &str, index: usize, style_name: &str) -> Self {
        Self {
            id: artifact_id(session_id, index),
            style_name: style_name.to_owned(),
            html: String::new(),
            original_html: None,
            status: ArtifactStatus::Streaming,
        }
    }

    /// Finished artifact, used for imports and templates.
    #[must_use]
    pub fn complete(session_id: &str, index: usize, style_name: &str, html: String) -> Self {
        Self {
            id: artifact_id(session_id, index),
            style_name: style_name.to_owned(),
            html,
            original_html: None,
            status: ArtifactStatus::Complete,
        }
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.status == ArtifactStatus::Streaming
    }

    /// HTML a revertible operation should build on: the snapshot if one
    /// exists, otherwise the current text.
    #[must_use]
    pub fn base_html(&self) -> &str {
        self.original_html.as_deref().unwrap_or(&self.html)
    }
}

/// One user request cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    /// Normalized request text.
    pub prompt: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub artifacts: Vec<Artifact>,
    /// User-assigned display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// User-assigned labels.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl Session {
    /// New session with `count` streaming placeholders.
    #[must_use]
    pub fn with_placeholders(id: String, prompt: String, timestamp: i64, count: usize) -> Self {
        let artifacts = (0..count)
            .map(|index| Artifact::placeholder(&id, index, PLACEHOLDER_STYLE))
            .collect();
        Self { id, prompt, timestamp, artifacts, name: None, tags: BTreeSet::new() }
    }

    /// Name shown in lists: the user's name when set, else the prompt.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.prompt)
    }

    #[must_use]
    pub fn artifact(&self, artifact_id: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id == artifact_id)
    }

    /// Index the next appended artifact will occupy.
    #[must_use]
    pub fn next_artifact_index(&self) -> usize {
        self.artifacts.len()
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.artifacts.iter().any(Artifact::is_streaming)
    }
}

/// Artifact address derived from its session and position.
#[must_use]
pub fn artifact_id(session_id: &str, index: usize) -> String {
    format!("{session_id}_{index}")
}

/// Fresh unique session identifier.
#[must_use]
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
