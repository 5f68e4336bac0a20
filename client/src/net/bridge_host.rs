//! Host side of the preview iframe bridge.
//!
//! SYSTEM CONTEXT
//! ==============
//! One window `message` listener receives everything preview iframes post.
//! Payloads are decoded with the `bridge` codec; anything that is not a
//! frame-to-host bridge message is ignored, so other `postMessage` users on
//! the page cannot disturb the app. Decoded messages are applied to
//! [`AppState`] by [`apply_frame_message`].

#[cfg(test)]
#[path = "bridge_host_test.rs"]
mod bridge_host_test;

use bridge::{CodecError, Direction, Message};

use crate::state::app::AppState;

/// Decode a payload posted by a preview iframe.
///
/// # Errors
///
/// Returns the codec error for foreign, malformed or host-bound payloads.
pub fn decode_frame_message(raw: &str) -> Result<Message, CodecError> {
    bridge::decode_for(Direction::FrameToHost, raw)
}

/// Whether a decode failure just means the payload belongs to someone else.
#[must_use]
pub fn is_foreign(err: &CodecError) -> bool {
    match err {
        CodecError::MissingType | CodecError::UnknownType(_) => true,
        CodecError::Json(e) => !e.is_data(),
        CodecError::WrongDirection { .. } => false,
    }
}

/// Route a decoded iframe message into application state.
pub fn apply_frame_message(state: &mut AppState, message: Message, now_ms: i64) {
    match message {
        Message::RuntimeError { error, source } => state.record_runtime_error(error, source, now_ms),
        Message::ElementSelected { html, tag_name } => state.select_element(html, tag_name),
        Message::ToggleInspect { .. } => {}
    }
}

/// Decode and apply in one step. Foreign payloads are ignored silently,
/// malformed bridge payloads are logged.
pub fn route_frame_payload(state: &mut AppState, raw: &str, now_ms: i64) -> bool {
    match decode_frame_message(raw) {
        Ok(message) => {
            apply_frame_message(state, message, now_ms);
            true
        }
        Err(err) => {
            log_rejected(&err);
            false
        }
    }
}

fn log_rejected(err: &CodecError) {
    if is_foreign(err) {
        log::debug!("ignoring foreign window message: {err}");
    } else {
        log::warn!("rejected bridge message: {err}");
    }
}

/// Listen for iframe messages for the lifetime of the calling owner.
#[cfg(feature = "csr")]
pub fn install_listener(state: leptos::prelude::RwSignal<AppState>) -> leptos::prelude::WindowListenerHandle {
    use leptos::prelude::{Update, window_event_listener};

    window_event_listener(leptos::ev::message, move |event: web_sys::MessageEvent| {
        let data = event.data();
        let raw = data
            .as_string()
            .or_else(|| js_sys::JSON::stringify(&data).ok().and_then(|s| s.as_string()));
        let Some(raw) = raw else {
            return;
        };
        match decode_frame_message(&raw) {
            Ok(message) => state.update(|s| apply_frame_message(s, message, crate::util::time::now_ms())),
            Err(err) => log_rejected(&err),
        }
    })
}

/// Post a host-to-frame message into `iframe` without reloading it.
#[cfg(feature = "csr")]
pub fn post_to_frame(iframe: &web_sys::HtmlIFrameElement, message: &Message) {
    let Some(target) = iframe.content_window() else {
        return;
    };
    let Ok(payload) = js_sys::JSON::parse(&bridge::encode(message)) else {
        return;
    };
    if let Err(err) = target.post_message(&payload, "*") {
        log::warn!("failed to post {} to preview: {err:?}", message.kind());
    }
}
