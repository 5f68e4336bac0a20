//! Preview document composition for sandboxed artifact iframes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Artifact HTML is untrusted model output and is often incomplete while it
//! streams. `compose` turns it into the `srcdoc` of a sandboxed iframe:
//! picks the diff side, optionally applies a layout, and injects the
//! inspector/error-reporting instrumentation that talks back to the host
//! over the bridge protocol.
//!
//! The function is pure and total: any input string yields a string.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use crate::util::html_fragments::{self, INSPECTOR_ATTR};
use crate::util::layout::{self, Layout};

/// Sandbox tokens for artifact previews. No same-origin, no top navigation.
pub const PREVIEW_SANDBOX: &str = "allow-scripts allow-forms allow-modals allow-popups allow-presentation";
/// Sandbox tokens for layout thumbnails.
pub const THUMBNAIL_SANDBOX: &str = "allow-scripts";

const INSPECT_INITIAL: &str = "__INSPECT_INITIAL__";

const INSPECTOR_SCRIPT: &str = r#"<script data-dashgen-inspector>
(function () {
  window.__INSPECT_MODE__ = __INSPECT_INITIAL__;
  var post = function (payload) { window.parent.postMessage(payload, '*'); };
  window.onerror = function (msg, source) {
    post({ type: 'RUNTIME_ERROR', error: String(msg), source: source || null });
  };
  window.addEventListener('unhandledrejection', function (e) {
    post({ type: 'RUNTIME_ERROR', error: String(e.reason), source: null });
  });
  var cursor = document.createElement('style');
  cursor.setAttribute('data-dashgen-inspector', '');
  var paint = function () {
    cursor.textContent = window.__INSPECT_MODE__ ? '* { cursor: crosshair !important; }' : '';
  };
  paint();
  (document.head || document.documentElement).appendChild(cursor);
  document.addEventListener('mouseover', function (e) {
    if (!window.__INSPECT_MODE__) return;
    e.stopPropagation();
    e.target.style.outline = '2px solid #3b82f6';
    e.target.style.cursor = 'crosshair';
  });
  document.addEventListener('mouseout', function (e) {
    if (!window.__INSPECT_MODE__) return;
    e.stopPropagation();
    e.target.style.outline = '';
    e.target.style.cursor = '';
  });
  document.addEventListener('click', function (e) {
    if (!window.__INSPECT_MODE__) return;
    e.preventDefault();
    e.stopPropagation();
    e.target.style.outline = '';
    e.target.style.cursor = '';
    post({ type: 'ELEMENT_SELECTED', html: e.target.outerHTML, tagName: e.target.tagName.toLowerCase() });
  }, true);
  window.addEventListener('message', function (event) {
    var data = event.data;
    if (data && data.type === 'TOGGLE_INSPECT') {
      window.__INSPECT_MODE__ = !!data.value;
      paint();
    }
  });
})();
</script>"#;

/// Rendering options for one preview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreviewMode<'a> {
    /// Initial inspect flag baked into the document. Later changes travel as
    /// `TOGGLE_INSPECT` messages instead of a new document.
    pub inspect_enabled: bool,
    /// Render the pre-operation snapshot instead of the current html.
    pub diff_show_original: bool,
    pub layout: Option<&'a Layout>,
}

/// Compose the `srcdoc` for an artifact preview.
///
/// `original` is only consulted when `mode.diff_show_original` is set and a
/// snapshot exists. Empty source html yields an empty document.
#[must_use]
pub fn compose(html: &str, original: Option<&str>, mode: &PreviewMode<'_>) -> String {
    let source = select_source(html, original, mode.diff_show_original);
    if source.trim().is_empty() {
        return String::new();
    }
    let laid_out = match mode.layout {
        Some(layout) => layout::wrap_layout(source, layout),
        None => source.to_owned(),
    };
    instrument(&laid_out, mode.inspect_enabled)
}

/// Pick which side of the diff to show. Never mutates either input.
#[must_use]
pub fn select_source<'a>(html: &'a str, original: Option<&'a str>, show_original: bool) -> &'a str {
    match original {
        Some(snapshot) if show_original => snapshot,
        _ => html,
    }
}

/// Inject exactly one copy of the inspector script.
#[must_use]
pub fn instrument(html: &str, inspect_enabled: bool) -> String {
    let cleaned = html_fragments::remove_marked_blocks(html, INSPECTOR_ATTR);
    let script = INSPECTOR_SCRIPT.replace(INSPECT_INITIAL, if inspect_enabled { "true" } else { "false" });
    html_fragments::insert_before_body_close(&cleaned, &script)
}

/// Iframe identity. A change remounts the iframe; inspect toggles do not
/// participate.
#[must_use]
pub fn preview_key(artifact_id: &str, show_original: bool) -> String {
    format!("{artifact_id}-{show_original}")
}
