//! Named dashboard layouts and idempotent layout wrapping.
//!
//! DESIGN
//! ======
//! A layout is CSS plus a `layout-container` wrapper around the artifact's
//! body. Wrapping always starts from the extracted parts of the source, and
//! extraction drops both the previous wrapper and the previous layout's
//! style block, so applying layouts repeatedly never nests wrappers or
//! stacks stale CSS.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::util::html_fragments::{self, HtmlParts, LAYOUT_CONTAINER_CLASS, LAYOUT_STYLE_ATTR};

/// Name of the layout that leaves the artifact's structure untouched.
pub const DEFAULT_LAYOUT: &str = "Standard Sidebar";

/// One entry of the layout catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub name: &'static str,
    /// Empty for the default layout.
    pub css: &'static str,
    /// Skeleton markup rendered in the thumbnail when no artifact is focused.
    pub preview_html: &'static str,
}

impl Layout {
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_LAYOUT
    }
}

pub static LAYOUTS: [Layout; 6] = [
    Layout {
        name: DEFAULT_LAYOUT,
        css: "",
        preview_html: r#"<div class="preview-box standard"><div class="dash-sidebar"></div><div class="dash-content"><div class="dash-header"></div><div class="dash-grid"><div class="dash-widget"></div><div class="dash-widget"></div><div class="dash-widget lg"></div></div></div></div>"#,
    },
    Layout {
        name: "Top Navigation",
        css: "body { margin: 0; background: #f8fafc; font-family: system-ui, sans-serif; display: flex; flex-direction: column; min-height: 100vh; }
nav { background: #fff; border-bottom: 1px solid #e2e8f0; padding: 0 24px; height: 64px; display: flex; align-items: center; justify-content: space-between; position: fixed; top: 0; width: 100%; z-index: 50; box-sizing: border-box; }
.layout-container { margin-top: 64px; padding: 24px; max-width: 1400px; margin-left: auto; margin-right: auto; width: 100%; box-sizing: border-box; }
.sidebar, aside { display: none !important; }",
        preview_html: r#"<div class="preview-box topnav"><div class="dash-top-bar"></div><div class="dash-content-full"><div class="dash-grid"><div class="dash-widget"></div><div class="dash-widget"></div><div class="dash-widget lg"></div></div></div></div>"#,
    },
    Layout {
        name: "Glass Command",
        css: "body { margin: 0; min-height: 100vh; background: #0f172a; color: #fff; background-image: radial-gradient(at 0% 0%, hsla(253,16%,7%,1) 0, transparent 50%), radial-gradient(at 50% 0%, hsla(225,39%,30%,1) 0, transparent 50%), radial-gradient(at 100% 0%, hsla(339,49%,30%,1) 0, transparent 50%); font-family: 'Inter', sans-serif; padding: 20px; box-sizing: border-box; }
.layout-container { background: rgba(255, 255, 255, 0.05); backdrop-filter: blur(12px); border: 1px solid rgba(255, 255, 255, 0.1); border-radius: 24px; height: calc(100vh - 40px); overflow: hidden; display: flex; }",
        preview_html: r#"<div class="preview-box glass"><div class="glass-sidebar"></div><div class="glass-content"><div class="glass-widget"></div><div class="glass-widget"></div></div></div>"#,
    },
    Layout {
        name: "Neo-Brutalist",
        css: "body { margin: 0; background: #FFDEE9; background-image: linear-gradient(0deg, #FFDEE9 0%, #B5FFFC 100%); font-family: 'Courier New', monospace; padding: 0; }
.layout-container { display: flex; min-height: 100vh; }
* { border-color: #000 !important; }",
        preview_html: r#"<div class="preview-box brutal"><div class="brutal-sidebar"></div><div class="brutal-content"><div class="brutal-header"></div><div class="brutal-widget"></div></div></div>"#,
    },
    Layout {
        name: "Enterprise Light",
        css: r#"body { margin: 0; background: #f1f5f9; color: #0f172a; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; }
.layout-container { display: grid; grid-template-columns: 240px 1fr; min-height: 100vh; }
.layout-container > *:first-child { background: #fff; border-right: 1px solid #e2e8f0; }"#,
        preview_html: r#"<div class="preview-box enterprise"><div class="ent-sidebar"></div><div class="ent-content"><div class="ent-widget"></div><div class="ent-widget"></div><div class="ent-table"></div></div></div>"#,
    },
    Layout {
        name: "Mobile Stack",
        css: "body { margin: 0; background: #f3f4f6; display: flex; justify-content: center; padding: 20px; }
.layout-container { width: 375px; background: #fff; min-height: 812px; border-radius: 40px; box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.25); overflow: hidden; position: relative; display: flex; flex-direction: column; }
.sidebar, aside { display: none; }",
        preview_html: r#"<div class="preview-box mobile"><div class="mobile-frame"><div class="mobile-header"></div><div class="mobile-widget"></div><div class="mobile-widget"></div></div></div>"#,
    },
];

const THUMBNAIL_RESET_CSS: &str =
    "body { margin: 0; padding: 0; overflow: hidden; background: transparent; }\n::-webkit-scrollbar { width: 0px; background: transparent; }";

/// Look up a layout by its display name.
#[must_use]
pub fn find_layout(name: &str) -> Option<&'static Layout> {
    LAYOUTS.iter().find(|layout| layout.name == name)
}

/// Re-assemble `html` under `layout`.
///
/// The result keeps the source head, its authored styles and scripts, and
/// body attributes. Any previous layout wrapper and layout CSS are dropped
/// first.
#[must_use]
pub fn wrap_layout(html: &str, layout: &Layout) -> String {
    let parts = html_fragments::extract(html);
    let layout_style = if layout.is_default() {
        String::new()
    } else {
        format!("<style {LAYOUT_STYLE_ATTR}=\"{}\">\n{}\n</style>", layout.name, layout.css)
    };
    assemble(&parts, &layout_style, layout)
}

/// Document rendered inside a layout thumbnail: `base` (or the layout's own
/// skeleton) under `layout`, with scrollbars and margins suppressed.
#[must_use]
pub fn thumbnail_document(base: Option<&str>, layout: &Layout) -> String {
    let source = base.filter(|b| !b.trim().is_empty()).unwrap_or(layout.preview_html);
    let parts = html_fragments::extract(source);
    let mut style = format!("<style>\n{THUMBNAIL_RESET_CSS}\n</style>");
    if !layout.is_default() {
        style.push_str(&format!("<style {LAYOUT_STYLE_ATTR}=\"{}\">\n{}\n</style>", layout.name, layout.css));
    }
    assemble(&parts, &style, layout)
}

fn assemble(parts: &HtmlParts, layout_style: &str, layout: &Layout) -> String {
    let mut head = String::new();
    if !parts.head.is_empty() {
        head.push_str(&parts.head);
        head.push('\n');
    }
    for style in &parts.styles {
        head.push_str(style);
        head.push('\n');
    }
    head.push_str(layout_style);

    let body = if layout.is_default() {
        parts.body.clone()
    } else {
        format!("<div class=\"{LAYOUT_CONTAINER_CLASS}\">{}</div>", parts.body)
    };
    let scripts = parts.scripts.join("\n");

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n{head}\n</head>\n<body{attrs}>\n{body}\n{scripts}\n</body>\n</html>",
        attrs = parts.body_attrs,
    )
}
