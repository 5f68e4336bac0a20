//! Message contract between the host page and sandboxed preview iframes.
//!
//! This crate owns the wire representation used by the host (`dashgen`) and
//! by the script the preview composer injects into every rendered artifact.
//! Messages travel over `window.postMessage` as plain JSON objects tagged by
//! a `type` field, so the shapes here are bit-exact with the injected script.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `type` tag for host → iframe inspect-mode toggles.
pub const TOGGLE_INSPECT: &str = "TOGGLE_INSPECT";
/// `type` tag for iframe → host script error reports.
pub const RUNTIME_ERROR: &str = "RUNTIME_ERROR";
/// `type` tag for iframe → host inspect-mode element picks.
pub const ELEMENT_SELECTED: &str = "ELEMENT_SELECTED";

/// Error returned by [`decode`] and [`decode_for`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The payload is not JSON or does not match the message shape.
    #[error("failed to decode bridge message: {0}")]
    Json(#[from] serde_json::Error),
    /// The payload has no string `type` field.
    #[error("bridge message has no type tag")]
    MissingType,
    /// The `type` tag is not part of this protocol.
    #[error("unknown bridge message type: {0}")]
    UnknownType(String),
    /// A known message arrived travelling the wrong way.
    #[error("{kind} is not valid for {expected:?} delivery")]
    WrongDirection {
        /// Wire tag of the rejected message.
        kind: &'static str,
        /// Direction the receiver accepts.
        expected: Direction,
    },
}

/// Which side of the frame boundary sends a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Host page posting into a preview iframe.
    HostToFrame,
    /// Preview iframe posting to its parent.
    FrameToHost,
}

/// A single message on the iframe bridge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Flip the inspect flag inside the iframe without reloading it.
    ToggleInspect {
        /// New inspect-mode state.
        value: bool,
    },
    /// An uncaught script error inside the rendered artifact.
    RuntimeError {
        /// Error text as reported by `window.onerror`.
        #[serde(default, deserialize_with = "lenient_string")]
        error: String,
        /// Script URL the error came from, when the browser exposes it.
        #[serde(default)]
        source: Option<String>,
    },
    /// The user clicked an element while inspect mode was on.
    ElementSelected {
        /// `outerHTML` of the clicked element.
        html: String,
        /// Lower-cased tag name of the clicked element.
        #[serde(rename = "tagName")]
        tag_name: String,
    },
}

impl Message {
    /// Wire `type` tag of this message.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ToggleInspect { .. } => TOGGLE_INSPECT,
            Self::RuntimeError { .. } => RUNTIME_ERROR,
            Self::ElementSelected { .. } => ELEMENT_SELECTED,
        }
    }

    /// Direction this message is allowed to travel.
    #[must_use]
    pub fn direction(&self) -> Direction {
        match self {
            Self::ToggleInspect { .. } => Direction::HostToFrame,
            Self::RuntimeError { .. } | Self::ElementSelected { .. } => Direction::FrameToHost,
        }
    }
}

/// Encode a message as the JSON text posted across the frame boundary.
#[must_use]
pub fn encode(message: &Message) -> String {
    // Serializing these plain enums cannot fail; the fallback is unreachable.
    serde_json::to_string(message).unwrap_or_default()
}

/// Decode JSON text into a bridge message.
///
/// # Errors
///
/// Returns [`CodecError::MissingType`] or [`CodecError::UnknownType`] for
/// payloads that belong to some other `postMessage` user, and
/// [`CodecError::Json`] for malformed bridge payloads.
pub fn decode(raw: &str) -> Result<Message, CodecError> {
    let value: Value = serde_json::from_str(raw)?;
    decode_value(value)
}

/// Decode an already-parsed JSON value into a bridge message.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_value(value: Value) -> Result<Message, CodecError> {
    let Some(kind) = value.get("type").and_then(Value::as_str) else {
        return Err(CodecError::MissingType);
    };
    if !matches!(kind, TOGGLE_INSPECT | RUNTIME_ERROR | ELEMENT_SELECTED) {
        return Err(CodecError::UnknownType(kind.to_owned()));
    }
    Ok(serde_json::from_value(value)?)
}

/// Decode a message and require that it travels in `expected` direction.
///
/// # Errors
///
/// Returns [`CodecError::WrongDirection`] for a valid message sent the wrong
/// way, plus every error [`decode`] can return.
pub fn decode_for(expected: Direction, raw: &str) -> Result<Message, CodecError> {
    let message = decode(raw)?;
    if message.direction() != expected {
        return Err(CodecError::WrongDirection { kind: message.kind(), expected });
    }
    Ok(message)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
