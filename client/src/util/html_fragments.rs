//! Structure-aware extraction of `<head>`, `<style>`, `<script>` and body
//! content from arbitrary HTML text.
//!
//! SYSTEM CONTEXT
//! ==============
//! Model output arrives as free text and is frequently incomplete while it
//! streams. Layout wrapping, layout thumbnails and the preview composer all
//! need the same split of a document into parts; this module is the only
//! place that performs it.
//!
//! ERROR HANDLING
//! ==============
//! Extraction never fails. Missing `<head>`/`<body>` tags, unclosed blocks
//! and stray closing tags degrade to treating the remaining text as body
//! content.

#[cfg(test)]
#[path = "html_fragments_test.rs"]
mod html_fragments_test;

use std::sync::LazyLock;

use regex::Regex;

/// Attribute marking the `<style>` block a layout contributes.
pub const LAYOUT_STYLE_ATTR: &str = "data-dashgen-layout";
/// Attribute marking blocks the preview composer injects.
pub const INSPECTOR_ATTR: &str = "data-dashgen-inspector";
/// Class of the wrapper element layouts place around body content.
pub const LAYOUT_CONTAINER_CLASS: &str = "layout-container";

static STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?(?:</style\s*>|$)").expect("Invalid style block regex")
});

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?(?:</script\s*>|$)").expect("Invalid script block regex")
});

static HEAD_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<head\b[^>]*>(.*?)</head\s*>").expect("Invalid head block regex"));

static BODY_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body\b([^>]*)>").expect("Invalid body open regex"));

static DOCUMENT_CHROME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!doctype[^>]*>|</?html\b[^>]*>|<head\b[^>]*>|</head\s*>|</?body\b[^>]*>")
        .expect("Invalid document chrome regex")
});

static LAYOUT_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<div\b[^>]*\bclass\s*=\s*["'](?:[^"']*\s)?layout-container(?:\s[^"']*)?["'][^>]*>"#)
        .expect("Invalid layout container regex")
});

static DIV_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<div\b[^>]*>|</div\s*>").expect("Invalid div tag regex"));

/// A document split into the parts layout wrapping re-assembles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmlParts {
    /// Inner `<head>` markup with style blocks removed (links, meta and
    /// head scripts stay in place).
    pub head: String,
    /// Every authored `<style>` block, in document order.
    pub styles: Vec<String>,
    /// Every `<script>` block found in the body, in document order.
    pub scripts: Vec<String>,
    /// Raw attribute text of the `<body>` tag, with a leading space when
    /// non-empty.
    pub body_attrs: String,
    /// Body markup without styles, scripts or a layout wrapper.
    pub body: String,
}

/// Split `html` into head, styles, scripts and body content.
#[must_use]
pub fn extract(html: &str) -> HtmlParts {
    if html.trim().is_empty() {
        return HtmlParts::default();
    }

    let (head_inner, after_head) = match HEAD_BLOCK.captures(html) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let inner = caps.get(1).map_or("", |m| m.as_str());
            (inner, whole.end)
        }
        None => ("", 0),
    };

    let (body_attrs, region) = match BODY_OPEN.captures_at(html, after_head) {
        Some(caps) => {
            let open_end = caps.get(0).map_or(after_head, |m| m.end());
            let attrs = caps.get(1).map_or("", |m| m.as_str()).trim();
            let close = find_last_ci(&html[open_end..], "</body").map_or(html.len(), |at| open_end + at);
            let attrs = if attrs.is_empty() { String::new() } else { format!(" {attrs}") };
            (attrs, html[open_end..close].to_owned())
        }
        None => {
            let without_head = if after_head > 0 {
                let start = HEAD_BLOCK.find(html).map_or(0, |m| m.start());
                format!("{}{}", &html[..start], &html[after_head..])
            } else {
                html.to_owned()
            };
            (String::new(), DOCUMENT_CHROME.replace_all(&without_head, "").into_owned())
        }
    };

    let mut styles = authored_blocks(&STYLE_BLOCK, head_inner);
    styles.extend(authored_blocks(&STYLE_BLOCK, &region));
    let scripts = authored_blocks(&SCRIPT_BLOCK, &region);

    let head = remove_marked_blocks(&STYLE_BLOCK.replace_all(head_inner, ""), INSPECTOR_ATTR);
    let body = SCRIPT_BLOCK.replace_all(&STYLE_BLOCK.replace_all(&region, ""), "").into_owned();

    HtmlParts {
        head: head.trim().to_owned(),
        styles,
        scripts,
        body_attrs,
        body: unwrap_layout_container(&body).trim().to_owned(),
    }
}

/// Remove every `layout-container` wrapper element, keeping its children.
///
/// Nested wrappers are all removed. An unclosed wrapper (partial stream)
/// keeps everything after its opening tag.
#[must_use]
pub fn unwrap_layout_container(body: &str) -> String {
    let mut out = body.to_owned();
    while let Some(open) = LAYOUT_OPEN.find(&out) {
        let inner_start = open.end();
        let mut depth = 1usize;
        let mut inner_end = out.len();
        let mut close_end = out.len();
        for tag in DIV_TAG.find_iter(&out[inner_start..]) {
            if tag.as_str().starts_with("</") {
                depth -= 1;
                if depth == 0 {
                    inner_end = inner_start + tag.start();
                    close_end = inner_start + tag.end();
                    break;
                }
            } else {
                depth += 1;
            }
        }
        out = format!("{}{}{}", &out[..open.start()], &out[inner_start..inner_end], &out[close_end..]);
    }
    out
}

/// Count how deeply `layout-container` wrappers nest in `html`.
#[must_use]
pub fn layout_container_depth(html: &str) -> usize {
    let mut depth = 0usize;
    let mut open_layouts: Vec<usize> = Vec::new();
    let mut max_depth = 0usize;
    for tag in DIV_TAG.find_iter(html) {
        if tag.as_str().starts_with("</") {
            depth = depth.saturating_sub(1);
            if open_layouts.last() == Some(&depth) {
                open_layouts.pop();
            }
        } else {
            if LAYOUT_OPEN.is_match(tag.as_str()) {
                open_layouts.push(depth);
                max_depth = max_depth.max(open_layouts.len());
            }
            depth += 1;
        }
    }
    max_depth
}

/// Remove `<style>`/`<script>` blocks whose opening tag carries `attr`.
#[must_use]
pub fn remove_marked_blocks(html: &str, attr: &str) -> String {
    let strip = |re: &Regex, text: &str| {
        re.replace_all(text, |caps: &regex::Captures<'_>| {
            let block = caps.get(0).map_or("", |m| m.as_str());
            if opening_tag(block).contains(attr) { String::new() } else { block.to_owned() }
        })
        .into_owned()
    };
    strip(&SCRIPT_BLOCK, &strip(&STYLE_BLOCK, html))
}

/// Insert `snippet` before the last `</body>`, or append it when the
/// document has no closing body tag.
#[must_use]
pub fn insert_before_body_close(html: &str, snippet: &str) -> String {
    match find_last_ci(html, "</body") {
        Some(at) => format!("{}{snippet}{}", &html[..at], &html[at..]),
        None => format!("{html}{snippet}"),
    }
}

fn authored_blocks(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text)
        .map(|m| m.as_str())
        .filter(|block| {
            let tag = opening_tag(block);
            !tag.contains(LAYOUT_STYLE_ATTR) && !tag.contains(INSPECTOR_ATTR)
        })
        .map(str::to_owned)
        .collect()
}

fn opening_tag(block: &str) -> &str {
    block.find('>').map_or(block, |end| &block[..end])
}

fn find_last_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().rfind(needle)
}
