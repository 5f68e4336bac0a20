//! Artifact and workspace export, plus parsing of imported files.
//!
//! DESIGN
//! ======
//! Everything here turns state into text or text into state; the browser
//! download itself is a thin `csr` helper at the bottom.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value;

use crate::state::session::{Artifact, Session};
use crate::util::html_fragments;

/// Version stamped into exported configuration files.
pub const CONFIG_VERSION: &str = "1.0.0";

const SLUG_MAX: usize = 48;

static STYLE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?style\b[^>]*>").expect("Invalid style tag regex"));

static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Invalid html comment regex"));

static JSX_RENAMED_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\s)(class|for)\s*=").expect("Invalid jsx attribute regex"));

static VOID_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(area|br|col|hr|img|input|link|meta|source|wbr)\b([^>]*?)\s*/?>")
        .expect("Invalid void element regex")
});

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// Only `.html` files can become artifacts.
    #[error("not an HTML file: {0}")]
    NotHtml(String),
    /// The session file is not valid JSON or does not match the schema.
    #[error("invalid session file: {0}")]
    Parse(#[from] serde_json::Error),
    /// The session file is JSON but not a list of sessions.
    #[error("session file must contain a JSON array")]
    NotAnArray,
}

/// Configuration export of one artifact.
#[derive(Debug, Serialize)]
pub struct ExportConfig<'a> {
    pub name: &'a str,
    pub version: &'static str,
    pub html: &'a str,
    pub components: Vec<&'static str>,
}

/// Download name for an artifact: the slugified session prompt.
#[must_use]
pub fn html_file_name(prompt: &str) -> String {
    format!("{}.html", file_stem(prompt))
}

/// Download name for the React export of an artifact.
#[must_use]
pub fn jsx_file_name(prompt: &str) -> String {
    format!("{}.jsx", file_stem(prompt))
}

fn file_stem(prompt: &str) -> String {
    let mut slug = String::new();
    for word in prompt.split(|c: char| !c.is_ascii_alphanumeric()).filter(|w| !w.is_empty()) {
        if slug.len() + word.len() + 1 > SLUG_MAX {
            break;
        }
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(&word.to_ascii_lowercase());
    }
    if slug.is_empty() {
        slug.push_str("dashboard");
    }
    slug
}

/// Component kinds recognisable in `html`, in a fixed order.
#[must_use]
pub fn detect_components(html: &str) -> Vec<&'static str> {
    let lower = html.to_ascii_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));
    let mut out = Vec::new();
    if has(&["<aside", "sidebar"]) {
        out.push("sidebar");
    }
    if has(&["kpi", "metric", "stat-card"]) {
        out.push("metrics");
    }
    if has(&["<table"]) {
        out.push("table");
    }
    if has(&["<canvas", "chart.js", "new chart("]) {
        out.push("charts");
    }
    out
}

/// Pretty JSON configuration for `artifact` of `session`.
///
/// # Errors
///
/// Returns the serializer error, which plain strings never produce.
pub fn config_json(session: &Session, artifact: &Artifact) -> Result<String, serde_json::Error> {
    let config = ExportConfig {
        name: session.display_name(),
        version: CONFIG_VERSION,
        html: &artifact.html,
        components: detect_components(&artifact.html),
    };
    serde_json::to_string_pretty(&config)
}

/// Single-file React component rendering the static markup of `html`.
///
/// Authored styles move into one `<style>` element; body scripts are not
/// carried over. Attribute names React spells differently are renamed and
/// void elements are self-closed.
#[must_use]
pub fn react_component(html: &str) -> String {
    let parts = html_fragments::extract(html);
    let css = parts
        .styles
        .iter()
        .map(|block| STYLE_TAG.replace_all(block, "").trim().to_owned())
        .filter(|css| !css.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    let markup = HTML_COMMENT.replace_all(&parts.body, "");
    let markup = JSX_RENAMED_ATTR.replace_all(&markup, |caps: &Captures<'_>| {
        let name = if caps[2].eq_ignore_ascii_case("class") { "className" } else { "htmlFor" };
        format!("{}{name}=", &caps[1])
    });
    let markup = VOID_ELEMENT.replace_all(&markup, "<$1$2 />");

    let mut out = String::from("import React from 'react';\n\nexport default function Dashboard() {\n  return (\n    <>\n");
    if !css.is_empty() {
        out.push_str("      <style>{`\n");
        out.push_str(&escape_template_literal(&css));
        out.push_str("\n      `}</style>\n");
    }
    for line in markup.trim().lines() {
        out.push_str("      ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("    </>\n  );\n}\n");
    out
}

fn escape_template_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('`', "\\`").replace("${", "\\${")
}

/// # Errors
///
/// Returns [`ImportError::NotHtml`] for anything but a `.html` file name.
pub fn check_html_file_name(file_name: &str) -> Result<(), ImportError> {
    let is_html = file_name
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case("html"));
    if is_html { Ok(()) } else { Err(ImportError::NotHtml(file_name.to_owned())) }
}

/// Parse an exported session list.
///
/// # Errors
///
/// [`ImportError::NotAnArray`] when the top level is not an array, and
/// [`ImportError::Parse`] for malformed JSON or session records.
pub fn parse_sessions(json: &str) -> Result<Vec<Session>, ImportError> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(ImportError::NotAnArray);
    }
    Ok(serde_json::from_value(value)?)
}

/// # Errors
///
/// Returns the serializer error, which session records never produce.
pub fn sessions_json(sessions: &[Session]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(sessions)
}

/// Offer `contents` to the user as a file download. No-op off-browser.
pub fn download(file_name: &str, mime_type: &str, contents: &str) {
    #[cfg(feature = "csr")]
    start_download(file_name, mime_type, contents);
    #[cfg(not(feature = "csr"))]
    let _ = (file_name, mime_type, contents);
}

#[cfg(feature = "csr")]
fn start_download(file_name: &str, mime_type: &str, contents: &str) {
    use wasm_bindgen::JsCast;

    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options) else {
        log::warn!("download failed: could not build blob for {file_name}");
        return;
    };
    let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
        log::warn!("download failed: could not create object url for {file_name}");
        return;
    };
    let anchor = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.create_element("a").ok())
        .and_then(|el| el.dyn_into::<web_sys::HtmlAnchorElement>().ok());
    if let Some(anchor) = anchor {
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();
        log::info!("download started: file={file_name}");
    }
    let _ = web_sys::Url::revoke_object_url(&url);
}
