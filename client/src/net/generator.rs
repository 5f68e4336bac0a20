//! Boundary to the generative model.
//!
//! SYSTEM CONTEXT
//! ==============
//! Operations talk to the model only through [`Generator`]: a one-shot
//! `complete` call and an incremental `stream` of UTF-8 text deltas. The
//! browser build implements it over HTTP; tests script it in memory.
//!
//! ERROR HANDLING
//! ==============
//! [`GenerateError`] covers both the fail-fast cases an operation refuses up
//! front (no credential, busy, nothing focused) and the transport failures
//! that end up as a per-artifact `error` status.

#[cfg(test)]
#[path = "generator_test.rs"]
mod generator_test;

use std::sync::LazyLock;

use futures::stream::LocalBoxStream;
use regex::Regex;

use super::config::AiConfig;

/// Concept names used when the naming call fails, times out or returns
/// something other than three strings.
pub const FALLBACK_STYLES: [&str; 3] = ["Concept Alpha", "Concept Beta", "Concept Gamma"];

/// Concept names for generations driven by an image or data attachment.
pub const ATTACHMENT_STYLES: [&str; 3] = ["Exact Representation", "Modern Refinement", "Dark Theme variant"];

static JSON_ARRAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[\s\S]*\]").expect("Invalid JSON array regex"));

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// No API key in settings or in the build environment.
    #[error("missing API key: set {var} at build time or add a key in settings")]
    MissingApiKey { var: String },

    /// The request failed or the response could not be read.
    #[error("generation request failed: {0}")]
    Transport(String),

    /// The model finished without producing any text.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// Another AI operation is still running.
    #[error("another generation is already in progress")]
    Busy,

    /// The operation needs a focused artifact and none is focused.
    #[error("no artifact is focused")]
    NoTarget,
}

// =============================================================================
// REQUEST
// =============================================================================

/// Model class a request runs on; [`AiConfig`] maps it to a model name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Fast model for naming and light rewrites.
    Flash,
    /// Stronger model for attachments, variations and deep rewrites.
    Pro,
}

/// One part of a multimodal prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    /// Base64 file contents.
    InlineData { mime_type: String, data: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub model: ModelTier,
    pub parts: Vec<Part>,
}

impl GenerateRequest {
    /// Single text part on `model`.
    #[must_use]
    pub fn text(model: ModelTier, text: impl Into<String>) -> Self {
        Self { model, parts: vec![Part::Text(text.into())] }
    }

    /// All text parts joined by newlines.
    #[must_use]
    pub fn prompt_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Text(text) => Some(text.as_str()),
                Part::InlineData { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[must_use]
    pub fn has_inline_data(&self) -> bool {
        self.parts.iter().any(|part| matches!(part, Part::InlineData { .. }))
    }
}

// =============================================================================
// GENERATOR TRAIT
// =============================================================================

/// Text deltas in arrival order; the stream ends when the response ends.
pub type TextStream = LocalBoxStream<'static, Result<String, GenerateError>>;

/// Model client. Single-threaded, so futures need not be `Send`.
#[async_trait::async_trait(?Send)]
pub trait Generator {
    /// Start a streaming generation.
    fn stream(&self, config: &AiConfig, request: GenerateRequest) -> TextStream;

    /// Run a one-shot generation and return the whole text.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Transport`] when the call fails.
    async fn complete(&self, config: &AiConfig, request: GenerateRequest) -> Result<String, GenerateError>;
}

// =============================================================================
// RESPONSE SHAPING
// =============================================================================

/// Concept names from a naming response: the first `[...]` span must be a
/// JSON array of exactly three non-blank strings.
#[must_use]
pub fn parse_style_names(text: &str) -> Option<Vec<String>> {
    let span = JSON_ARRAY.find(text)?;
    let names: Vec<String> = serde_json::from_str(span.as_str()).ok()?;
    let names: Vec<String> = names.into_iter().map(|n| n.trim().to_owned()).collect();
    (names.len() == FALLBACK_STYLES.len() && names.iter().all(|n| !n.is_empty())).then_some(names)
}

#[must_use]
pub fn fallback_styles(with_attachment: bool) -> Vec<String> {
    let names = if with_attachment { ATTACHMENT_STYLES } else { FALLBACK_STYLES };
    names.iter().map(|&n| n.to_owned()).collect()
}
